//! Delegated-authentication session lifecycle for the orchestrator.
//!
//! This crate provides:
//! - The opaque provider credential (`Credential`) and the store seam that
//!   carries it between requests (`CredentialStore`)
//! - The identity provider seam (`IdentityProvider`)
//! - The session lifecycle (`SessionLifecycle`): status checks, login
//!   completion and logout
//! - Provider and lifecycle error types
//!
//! # State Model
//!
//! A client is anonymous until a login exchanges an authorization code for a
//! credential, and authenticated for as long as the provider keeps accepting
//! that credential. Nothing beyond the credential is persisted: profile data
//! is fetched live on every status check.
//!
//! # Example
//!
//! ```
//! use orchestrator_auth_session::{Profile, SessionStatus};
//!
//! let status = SessionStatus::Authenticated(Profile {
//!     login: "octocat".to_string(),
//!     name: None,
//!     avatar_url: None,
//!     id: 583231,
//! });
//!
//! let body = serde_json::to_value(&status).unwrap();
//! assert_eq!(body["loggedIn"], true);
//! assert_eq!(body["login"], "octocat");
//! ```

pub mod credential;
pub mod error;
pub mod lifecycle;
pub mod profile;
pub mod provider;

// Re-export main types at crate root
pub use credential::{Credential, CredentialStore, DEFAULT_CREDENTIAL_TTL_HOURS};
pub use error::{ExchangeError, LoginError, ProfileError, RevokeError, StatusError};
pub use lifecycle::{LogoutOutcome, SessionLifecycle};
pub use profile::{Profile, SessionStatus};
pub use provider::IdentityProvider;
