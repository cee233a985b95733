//! The opaque bearer credential and the store that carries it between requests.

use chrono::{DateTime, Duration, Utc};
use oauth2::AccessToken;

/// How long a freshly issued credential stays in the store.
pub const DEFAULT_CREDENTIAL_TTL_HOURS: i64 = 24;

/// An opaque bearer token issued by the identity provider.
///
/// The secret is wrapped in [`AccessToken`] so it never shows up in `Debug`
/// output or logs.
#[derive(Debug, Clone)]
pub struct Credential {
    token: AccessToken,
    expires_at: Option<DateTime<Utc>>,
}

impl Credential {
    /// Wraps a token read back from a store. Its expiry is not known.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: AccessToken::new(token.into()),
            expires_at: None,
        }
    }

    /// Wraps a token just issued by the provider, valid for `ttl` from now.
    ///
    /// If `now + ttl` is out of range the expiry is left unknown.
    #[must_use]
    pub fn issue(token: impl Into<String>, ttl: Duration) -> Self {
        Self {
            token: AccessToken::new(token.into()),
            expires_at: Utc::now().checked_add_signed(ttl),
        }
    }

    /// Returns the raw token value.
    #[must_use]
    pub fn secret(&self) -> &str {
        self.token.secret()
    }

    /// Returns when the credential expires, if known.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    /// Returns the time left before expiry, clamped at zero.
    #[must_use]
    pub fn remaining_ttl(&self) -> Option<Duration> {
        self.expires_at
            .map(|expires_at| (expires_at - Utc::now()).max(Duration::zero()))
    }
}

/// Scoped access to the single credential bound to the current client.
///
/// Implementations hold at most one credential: `write` replaces whatever was
/// there before, and `clear` must leave the client without a credential.
pub trait CredentialStore {
    /// Returns the stored credential, if any.
    fn read(&self) -> Option<Credential>;

    /// Stores `credential`, replacing any previous one.
    fn write(&mut self, credential: &Credential);

    /// Removes the stored credential.
    fn clear(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_redacts_secret() {
        let credential = Credential::new("gho_supersecret");
        let debug = format!("{credential:?}");
        assert!(!debug.contains("gho_supersecret"));
    }

    #[test]
    fn read_back_credential_has_no_expiry() {
        let credential = Credential::new("abc123");
        assert_eq!(credential.secret(), "abc123");
        assert!(credential.expires_at().is_none());
        assert!(credential.remaining_ttl().is_none());
    }

    #[test]
    fn issued_credential_expires_after_ttl() {
        let before = Utc::now();
        let credential = Credential::issue("abc123", Duration::hours(DEFAULT_CREDENTIAL_TTL_HOURS));
        let after = Utc::now();

        let expires_at = credential.expires_at().expect("issued credential has expiry");
        assert!(expires_at >= before + Duration::hours(24));
        assert!(expires_at <= after + Duration::hours(24));

        let remaining = credential.remaining_ttl().expect("remaining ttl");
        assert!(remaining > Duration::hours(23));
        assert!(remaining <= Duration::hours(24));
    }

    #[test]
    fn issue_with_out_of_range_ttl_has_no_expiry() {
        let ttl = Duration::try_hours(10_000_000_000).expect("representable duration");
        let credential = Credential::issue("abc123", ttl);
        assert_eq!(credential.secret(), "abc123");
        assert!(credential.expires_at().is_none());
    }

    #[test]
    fn remaining_ttl_never_negative() {
        let credential = Credential::issue("abc123", Duration::seconds(-5));
        assert_eq!(credential.remaining_ttl(), Some(Duration::zero()));
    }
}
