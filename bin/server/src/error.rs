//! Startup error types for the server.
//!
//! Request-time failures are mapped to HTTP responses in `auth::routes`;
//! everything here happens before the listener is bound and is reported
//! through `rootcause::Report<SetupError>`.

use std::fmt;

/// Errors building the server's collaborators from configuration.
#[derive(Debug)]
pub enum SetupError {
    /// A configured URL does not parse.
    InvalidUrl { field: &'static str, reason: String },
    /// The outbound HTTP client could not be built.
    HttpClient { reason: String },
    /// The cookie signing secret is unusable.
    CookieKey { reason: String },
    /// The credential lifetime is not positive or exceeds the allowed maximum.
    InvalidTtl { hours: i64 },
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidUrl { field, reason } => {
                write!(f, "invalid URL in '{}': {}", field, reason)
            }
            Self::HttpClient { reason } => {
                write!(f, "failed to build HTTP client: {}", reason)
            }
            Self::CookieKey { reason } => {
                write!(f, "invalid cookie signing secret: {}", reason)
            }
            Self::InvalidTtl { hours } => {
                write!(f, "credential TTL of {} hours is out of range", hours)
            }
        }
    }
}

impl std::error::Error for SetupError {}
