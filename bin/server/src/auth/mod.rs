//! Authentication module for the orchestrator server.
//!
//! This module provides:
//! - The GitHub implementation of the identity provider
//! - The signed-cookie credential store
//! - The `/auth/status`, `/auth/callback` and `/auth/logout` handlers
//!
//! GitHub is the source of truth for whether a session is valid. The server
//! keeps nothing but the credential cookie.

pub mod cookie;
pub mod github;
pub mod routes;

use axum::extract::FromRef;
use chrono::Duration;
use axum_extra::extract::cookie::Key;
use orchestrator_auth_session::{IdentityProvider, SessionLifecycle};
use reqwest::Url;
use rootcause::prelude::Report;
use std::sync::Arc;
use tracing::warn;

use crate::config::SessionConfig;
use crate::error::SetupError;

pub use cookie::{CookieCredentialStore, CookieSettings};
pub use github::GithubClient;
pub use routes::{callback, logout, status};

/// Identity provider shared by all requests.
pub type SharedProvider = Arc<dyn IdentityProvider>;

/// Longest credential lifetime accepted from configuration: one year.
pub const MAX_CREDENTIAL_TTL_HOURS: i64 = 24 * 365;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Session lifecycle driving every auth route.
    pub lifecycle: Arc<SessionLifecycle<SharedProvider>>,
    /// Credential cookie attributes.
    pub cookies: Arc<CookieSettings>,
    /// Where to send the browser after a successful login.
    pub login_redirect: Arc<str>,
    /// Key signing the credential cookie.
    cookie_key: Key,
}

impl AppState {
    /// Creates a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the frontend URL is invalid, the cookie secret is
    /// too short, or the credential TTL is out of range.
    pub fn new(
        provider: SharedProvider,
        session_config: &SessionConfig,
        frontend_url: &str,
    ) -> Result<Self, Report<SetupError>> {
        let lifecycle = SessionLifecycle::with_credential_ttl(
            provider,
            credential_ttl(session_config.credential_ttl_hours)?,
        );

        Ok(Self {
            lifecycle: Arc::new(lifecycle),
            cookies: Arc::new(CookieSettings::from(session_config)),
            login_redirect: login_redirect(frontend_url)?.into(),
            cookie_key: cookie_key(session_config.cookie_secret.as_deref())?,
        })
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

/// Builds the post-login redirect: the frontend URL with `authed=1` appended.
fn login_redirect(frontend_url: &str) -> Result<String, SetupError> {
    let mut url = Url::parse(frontend_url).map_err(|e| SetupError::InvalidUrl {
        field: "frontend_url",
        reason: e.to_string(),
    })?;
    url.query_pairs_mut().append_pair("authed", "1");
    Ok(url.into())
}

fn credential_ttl(hours: i64) -> Result<Duration, SetupError> {
    if !(1..=MAX_CREDENTIAL_TTL_HOURS).contains(&hours) {
        return Err(SetupError::InvalidTtl { hours });
    }
    Duration::try_hours(hours).ok_or(SetupError::InvalidTtl { hours })
}

fn cookie_key(secret: Option<&str>) -> Result<Key, SetupError> {
    match secret {
        Some(secret) => Key::try_from(secret.as_bytes()).map_err(|e| SetupError::CookieKey {
            reason: e.to_string(),
        }),
        None => {
            warn!("no cookie secret configured, sessions will not survive a restart");
            Ok(Key::generate())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_redirect_appends_marker() {
        assert_eq!(
            login_redirect("http://localhost:5173").unwrap(),
            "http://localhost:5173/?authed=1"
        );
        assert_eq!(
            login_redirect("https://app.example.com/dashboard?tab=servers").unwrap(),
            "https://app.example.com/dashboard?tab=servers&authed=1"
        );
    }

    #[test]
    fn login_redirect_rejects_relative_url() {
        assert!(matches!(
            login_redirect("/dashboard"),
            Err(SetupError::InvalidUrl {
                field: "frontend_url",
                ..
            })
        ));
    }

    #[test]
    fn credential_ttl_accepts_default_and_maximum() {
        assert_eq!(credential_ttl(24).unwrap(), Duration::hours(24));
        assert_eq!(
            credential_ttl(MAX_CREDENTIAL_TTL_HOURS).unwrap(),
            Duration::hours(MAX_CREDENTIAL_TTL_HOURS)
        );
    }

    #[test]
    fn credential_ttl_rejects_out_of_range_hours() {
        for hours in [0, -1, MAX_CREDENTIAL_TTL_HOURS + 1, 10_000_000_000] {
            assert!(matches!(
                credential_ttl(hours),
                Err(SetupError::InvalidTtl { hours: h }) if h == hours
            ));
        }
    }

    #[test]
    fn app_state_rejects_out_of_range_ttl() {
        use async_trait::async_trait;
        use oauth2::AccessToken;
        use orchestrator_auth_session::{
            Credential, ExchangeError, Profile, ProfileError, RevokeError,
        };

        struct Unreachable;

        #[async_trait]
        impl IdentityProvider for Unreachable {
            async fn exchange_code(&self, _code: &str) -> Result<AccessToken, ExchangeError> {
                unreachable!()
            }

            async fn fetch_profile(&self, _credential: &Credential) -> Result<Profile, ProfileError> {
                unreachable!()
            }

            async fn revoke(&self, _credential: &Credential) -> Result<(), RevokeError> {
                unreachable!()
            }
        }

        for hours in [-1, 10_000_000_000] {
            let config = SessionConfig {
                credential_ttl_hours: hours,
                ..SessionConfig::default()
            };
            let result = AppState::new(Arc::new(Unreachable), &config, "http://localhost:5173");
            assert!(result.is_err());
        }

        let state = AppState::new(
            Arc::new(Unreachable),
            &SessionConfig::default(),
            "http://localhost:5173",
        )
        .unwrap();
        assert_eq!(state.lifecycle.credential_ttl(), Duration::hours(24));
    }

    #[test]
    fn short_cookie_secret_is_rejected() {
        assert!(matches!(
            cookie_key(Some("too-short")),
            Err(SetupError::CookieKey { .. })
        ));
    }

    #[test]
    fn long_cookie_secret_is_accepted() {
        let secret = "x".repeat(64);
        assert!(cookie_key(Some(&secret)).is_ok());
    }
}
