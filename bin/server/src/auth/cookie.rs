//! Signed-cookie credential store.
//!
//! The credential travels in a single HMAC-signed cookie. A cookie whose
//! signature does not verify reads as absent.

use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};
use orchestrator_auth_session::{Credential, CredentialStore};
use time::Duration as TimeDuration;

use crate::config::SessionConfig;

/// Attributes applied to the credential cookie.
#[derive(Debug, Clone)]
pub struct CookieSettings {
    /// Cookie name.
    pub name: String,
    /// Whether to set the Secure flag.
    pub secure: bool,
}

impl From<&SessionConfig> for CookieSettings {
    fn from(config: &SessionConfig) -> Self {
        Self {
            name: config.cookie_name.clone(),
            secure: config.secure_cookies,
        }
    }
}

/// Credential store backed by the request's signed cookie jar.
///
/// Writes and clears accumulate in the jar; return it from the handler with
/// [`CookieCredentialStore::into_jar`] so the changes reach the client.
pub struct CookieCredentialStore<'a> {
    jar: SignedCookieJar,
    settings: &'a CookieSettings,
}

impl<'a> CookieCredentialStore<'a> {
    /// Wraps the jar extracted from the current request.
    #[must_use]
    pub fn new(jar: SignedCookieJar, settings: &'a CookieSettings) -> Self {
        Self { jar, settings }
    }

    /// Returns the jar carrying any pending cookie changes.
    #[must_use]
    pub fn into_jar(self) -> SignedCookieJar {
        self.jar
    }
}

impl CredentialStore for CookieCredentialStore<'_> {
    fn read(&self) -> Option<Credential> {
        self.jar
            .get(&self.settings.name)
            .map(|cookie| cookie.value().to_string())
            .filter(|value| !value.is_empty())
            .map(Credential::new)
    }

    fn write(&mut self, credential: &Credential) {
        let mut cookie = Cookie::build((self.settings.name.clone(), credential.secret().to_string()))
            .path("/")
            .http_only(true)
            .secure(self.settings.secure)
            .same_site(SameSite::Lax);

        if let Some(ttl) = credential.remaining_ttl() {
            cookie = cookie.max_age(TimeDuration::seconds(ttl.num_seconds()));
        }

        self.jar = self.jar.clone().add(cookie);
    }

    fn clear(&mut self) {
        let removal = Cookie::build((self.settings.name.clone(), ""))
            .path("/")
            .http_only(true)
            .secure(self.settings.secure)
            .same_site(SameSite::Lax)
            .max_age(TimeDuration::ZERO);

        self.jar = self.jar.clone().add(removal);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_extra::extract::cookie::Key;
    use chrono::Duration;

    fn settings() -> CookieSettings {
        CookieSettings {
            name: "github_token".to_string(),
            secure: true,
        }
    }

    #[test]
    fn empty_jar_reads_nothing() {
        let settings = settings();
        let store = CookieCredentialStore::new(SignedCookieJar::new(Key::generate()), &settings);
        assert!(store.read().is_none());
    }

    #[test]
    fn write_sets_hardened_cookie() {
        let settings = settings();
        let mut store =
            CookieCredentialStore::new(SignedCookieJar::new(Key::generate()), &settings);

        store.write(&Credential::issue("abc123", Duration::hours(24)));

        assert_eq!(store.read().unwrap().secret(), "abc123");
        let jar = store.into_jar();
        let cookie = jar.get("github_token").unwrap();
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));
        let max_age = cookie.max_age().unwrap();
        assert!(max_age > TimeDuration::hours(23));
        assert!(max_age <= TimeDuration::hours(24));
    }

    #[test]
    fn write_replaces_previous_credential() {
        let settings = settings();
        let mut store =
            CookieCredentialStore::new(SignedCookieJar::new(Key::generate()), &settings);

        store.write(&Credential::issue("stale", Duration::hours(24)));
        store.write(&Credential::issue("fresh", Duration::hours(24)));

        assert_eq!(store.read().unwrap().secret(), "fresh");
    }

    #[test]
    fn clear_expires_cookie() {
        let settings = settings();
        let mut store =
            CookieCredentialStore::new(SignedCookieJar::new(Key::generate()), &settings);

        store.write(&Credential::issue("abc123", Duration::hours(24)));
        store.clear();

        assert!(store.read().is_none());
        let jar = store.into_jar();
        let cookie = jar.get("github_token").unwrap();
        assert_eq!(cookie.max_age(), Some(TimeDuration::ZERO));
    }

    #[test]
    fn insecure_cookies_when_configured() {
        let settings = CookieSettings {
            name: "github_token".to_string(),
            secure: false,
        };
        let mut store =
            CookieCredentialStore::new(SignedCookieJar::new(Key::generate()), &settings);

        store.write(&Credential::issue("abc123", Duration::hours(24)));

        let jar = store.into_jar();
        assert_eq!(jar.get("github_token").unwrap().secure(), Some(false));
    }
}
