//! The seam between the session lifecycle and an external identity provider.

use async_trait::async_trait;
use oauth2::AccessToken;
use std::sync::Arc;

use crate::credential::Credential;
use crate::error::{ExchangeError, ProfileError, RevokeError};
use crate::profile::Profile;

/// The three calls the lifecycle makes against an identity provider.
///
/// Each call is a single outbound request. Implementations must not retry:
/// codes and credentials are often single-use, and a blind retry can turn a
/// transient failure into a duplicate-use error.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Exchanges an authorization code for an access token.
    async fn exchange_code(&self, code: &str) -> Result<AccessToken, ExchangeError>;

    /// Fetches the profile that owns `credential`.
    async fn fetch_profile(&self, credential: &Credential) -> Result<Profile, ProfileError>;

    /// Revokes the application grant behind `credential`.
    async fn revoke(&self, credential: &Credential) -> Result<(), RevokeError>;
}

#[async_trait]
impl<P: IdentityProvider + ?Sized> IdentityProvider for Arc<P> {
    async fn exchange_code(&self, code: &str) -> Result<AccessToken, ExchangeError> {
        (**self).exchange_code(code).await
    }

    async fn fetch_profile(&self, credential: &Credential) -> Result<Profile, ProfileError> {
        (**self).fetch_profile(credential).await
    }

    async fn revoke(&self, credential: &Credential) -> Result<(), RevokeError> {
        (**self).revoke(credential).await
    }
}
