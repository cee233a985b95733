//! Error types for the session crate.
//!
//! Two layers of errors live here:
//! - Provider errors (`ExchangeError`, `ProfileError`, `RevokeError`): what a
//!   single call to the identity provider can report.
//! - Lifecycle errors (`LoginError`, `StatusError`): what the session lifecycle
//!   reports to the HTTP layer after applying its invalidate-vs-preserve policy.

use std::fmt;

/// Errors from exchanging an authorization code for a credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExchangeError {
    /// The provider answered, but the grant carried no usable credential.
    NoCredential {
        /// Provider error code, e.g. `bad_verification_code`.
        error: Option<String>,
    },
    /// The response could not be decoded.
    MalformedResponse { status: u16, reason: String },
    /// Network failure, timeout or provider-side outage.
    Unavailable { reason: String },
}

impl fmt::Display for ExchangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCredential { error: Some(error) } => {
                write!(f, "token response carried no credential: {error}")
            }
            Self::NoCredential { error: None } => {
                write!(f, "token response carried no credential")
            }
            Self::MalformedResponse { status, reason } => {
                write!(f, "malformed token response (status {status}): {reason}")
            }
            Self::Unavailable { reason } => {
                write!(f, "token endpoint unavailable: {reason}")
            }
        }
    }
}

impl std::error::Error for ExchangeError {}

/// Errors from fetching the profile that owns a credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileError {
    /// The provider explicitly rejected the credential (401/403).
    InvalidCredential { status: u16 },
    /// Network failure or timeout.
    Unavailable { reason: String },
    /// Any other status, or a body that is not a profile.
    UnexpectedResponse { status: Option<u16>, reason: String },
}

impl fmt::Display for ProfileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCredential { status } => {
                write!(f, "provider rejected credential (status {status})")
            }
            Self::Unavailable { reason } => {
                write!(f, "profile endpoint unavailable: {reason}")
            }
            Self::UnexpectedResponse {
                status: Some(status),
                reason,
            } => {
                write!(f, "unexpected profile response (status {status}): {reason}")
            }
            Self::UnexpectedResponse {
                status: None,
                reason,
            } => {
                write!(f, "unexpected profile response: {reason}")
            }
        }
    }
}

impl std::error::Error for ProfileError {}

/// Errors from revoking a credential's application grant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevokeError {
    /// The provider refused the revocation.
    Rejected { status: u16 },
    /// Network failure or timeout.
    Unavailable { reason: String },
}

impl fmt::Display for RevokeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected { status } => {
                write!(f, "provider rejected revocation (status {status})")
            }
            Self::Unavailable { reason } => {
                write!(f, "revocation endpoint unavailable: {reason}")
            }
        }
    }
}

impl std::error::Error for RevokeError {}

/// Errors from completing a login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginError {
    /// No authorization code was supplied.
    MissingCode,
    /// The provider did not turn the code into a credential.
    InvalidCode { error: Option<String> },
    /// The provider could not be reached or answered garbage.
    ProviderUnavailable { reason: String },
}

impl fmt::Display for LoginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCode => write!(f, "missing authorization code"),
            Self::InvalidCode { error: Some(error) } => {
                write!(f, "invalid authorization code: {error}")
            }
            Self::InvalidCode { error: None } => write!(f, "invalid authorization code"),
            Self::ProviderUnavailable { reason } => {
                write!(f, "identity provider unavailable: {reason}")
            }
        }
    }
}

impl std::error::Error for LoginError {}

impl From<ExchangeError> for LoginError {
    fn from(err: ExchangeError) -> Self {
        match err {
            ExchangeError::NoCredential { error } => Self::InvalidCode { error },
            other => Self::ProviderUnavailable {
                reason: other.to_string(),
            },
        }
    }
}

/// Errors from checking session status.
///
/// A rejected credential is not an error: it resolves to an anonymous status.
/// Both variants leave the stored credential in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusError {
    /// Network failure or timeout; worth retrying.
    ProviderUnavailable { reason: String },
    /// The provider answered with something we could not classify.
    UnclassifiedProviderError { reason: String },
}

impl fmt::Display for StatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProviderUnavailable { reason } => {
                write!(f, "identity provider unavailable: {reason}")
            }
            Self::UnclassifiedProviderError { reason } => {
                write!(f, "unclassified identity provider error: {reason}")
            }
        }
    }
}

impl std::error::Error for StatusError {}
