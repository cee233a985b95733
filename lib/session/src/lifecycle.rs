//! Session lifecycle: anonymous, exchanging, authenticated, revoked.
//!
//! The lifecycle owns no state of its own. Each operation reads or writes the
//! single credential held by a [`CredentialStore`] and asks the
//! [`IdentityProvider`] whether that credential is still good:
//! - `check_status` never caches; a logged-in answer means the provider
//!   accepted the credential during this call.
//! - Only an explicit rejection from the provider clears the store. Outages
//!   and unclassified responses leave the credential in place.
//! - `logout` clears the store before it talks to the provider, so the local
//!   session ends even when revocation fails.

use chrono::Duration;
use tracing::{debug, info, instrument, warn};

use crate::credential::{Credential, CredentialStore, DEFAULT_CREDENTIAL_TTL_HOURS};
use crate::error::{LoginError, ProfileError, StatusError};
use crate::profile::SessionStatus;
use crate::provider::IdentityProvider;

/// What happened to the provider-side grant during logout.
///
/// The client sees the same successful logout in every case; this is for
/// logs and operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoutOutcome {
    /// There was no credential to revoke.
    NoSession,
    /// The provider revoked the grant.
    Revoked,
    /// Revocation failed; the local session was still cleared.
    RevocationFailed,
}

/// Orchestrates login, status checks and logout against one provider.
#[derive(Debug, Clone)]
pub struct SessionLifecycle<P> {
    provider: P,
    credential_ttl: Duration,
}

impl<P: IdentityProvider> SessionLifecycle<P> {
    /// Creates a lifecycle issuing credentials with the default 24 hour TTL.
    #[must_use]
    pub fn new(provider: P) -> Self {
        Self::with_credential_ttl(provider, Duration::hours(DEFAULT_CREDENTIAL_TTL_HOURS))
    }

    /// Creates a lifecycle issuing credentials valid for `credential_ttl`.
    #[must_use]
    pub fn with_credential_ttl(provider: P, credential_ttl: Duration) -> Self {
        Self {
            provider,
            credential_ttl,
        }
    }

    /// Returns the identity provider.
    #[must_use]
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Returns the TTL applied to newly issued credentials.
    #[must_use]
    pub fn credential_ttl(&self) -> Duration {
        self.credential_ttl
    }

    /// Reports whether the stored credential is still accepted by the provider.
    ///
    /// # Errors
    ///
    /// Returns `StatusError` when the provider could not give a definite
    /// answer. The stored credential is left untouched in that case.
    #[instrument(skip_all)]
    pub async fn check_status<S>(&self, store: &mut S) -> Result<SessionStatus, StatusError>
    where
        S: CredentialStore + ?Sized,
    {
        let Some(credential) = store.read() else {
            return Ok(SessionStatus::Anonymous);
        };

        match self.provider.fetch_profile(&credential).await {
            Ok(profile) => {
                debug!(login = %profile.login, "credential accepted");
                Ok(SessionStatus::Authenticated(profile))
            }
            Err(ProfileError::InvalidCredential { status }) => {
                info!(status, "provider rejected credential, clearing session");
                store.clear();
                Ok(SessionStatus::Anonymous)
            }
            Err(err @ ProfileError::Unavailable { .. }) => Err(StatusError::ProviderUnavailable {
                reason: err.to_string(),
            }),
            Err(err @ ProfileError::UnexpectedResponse { .. }) => {
                Err(StatusError::UnclassifiedProviderError {
                    reason: err.to_string(),
                })
            }
        }
    }

    /// Exchanges an authorization code and stores the resulting credential.
    ///
    /// Any credential left over from an earlier session is overwritten.
    ///
    /// # Errors
    ///
    /// - `MissingCode` if `code` is absent or blank; the provider is not called.
    /// - `InvalidCode` if the provider's grant carried no credential.
    /// - `ProviderUnavailable` on transport failure or an undecodable response.
    #[instrument(skip_all)]
    pub async fn complete_login<S>(
        &self,
        code: Option<&str>,
        store: &mut S,
    ) -> Result<Credential, LoginError>
    where
        S: CredentialStore + ?Sized,
    {
        let code = code
            .filter(|code| !code.trim().is_empty())
            .ok_or(LoginError::MissingCode)?;

        let token = self.provider.exchange_code(code).await?;

        let credential = Credential::issue(token.secret().clone(), self.credential_ttl);
        store.write(&credential);
        info!("login completed, credential stored");

        Ok(credential)
    }

    /// Ends the session locally, then revokes the grant on a best-effort basis.
    ///
    /// Never fails from the caller's point of view. The store is cleared before
    /// any network call is made.
    #[instrument(skip_all)]
    pub async fn logout<S>(&self, store: &mut S) -> LogoutOutcome
    where
        S: CredentialStore + ?Sized,
    {
        let credential = store.read();
        store.clear();

        let Some(credential) = credential else {
            return LogoutOutcome::NoSession;
        };

        match self.provider.revoke(&credential).await {
            Ok(()) => {
                debug!("credential revoked");
                LogoutOutcome::Revoked
            }
            Err(err) => {
                warn!(error = %err, "credential revocation failed, local session already cleared");
                LogoutOutcome::RevocationFailed
            }
        }
    }
}
