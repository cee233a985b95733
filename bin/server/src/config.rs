//! Centralized server configuration.
//!
//! This module provides strongly-typed configuration for the server,
//! loaded via the `config` crate from environment variables
//! (`GITHUB__CLIENT_ID`, `SESSION__SECURE_COOKIES`, `FRONTEND_URL`, ...).

use orchestrator_auth_session::DEFAULT_CREDENTIAL_TTL_HOURS;
use serde::Deserialize;

/// Server configuration.
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    /// Socket address to listen on.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Frontend URL users are sent back to after login.
    #[serde(default = "default_frontend_url")]
    pub frontend_url: String,

    /// Session cookie configuration.
    #[serde(default)]
    pub session: SessionConfig,

    /// GitHub OAuth application configuration.
    pub github: GithubConfig,
}

/// Session-related configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Lifetime of a freshly issued credential cookie, in hours.
    #[serde(default = "default_credential_ttl_hours")]
    pub credential_ttl_hours: i64,

    /// Whether to set the Secure flag on cookies (requires HTTPS).
    /// Defaults to true for production safety; set to false for local HTTP development.
    #[serde(default = "default_secure_cookies")]
    pub secure_cookies: bool,

    /// Name of the cookie carrying the credential.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// Secret used to sign the credential cookie (at least 64 bytes).
    /// A random key is generated at startup when unset.
    #[serde(default)]
    pub cookie_secret: Option<String>,
}

fn default_bind_addr() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_frontend_url() -> String {
    "http://localhost:5173".to_string()
}

fn default_credential_ttl_hours() -> i64 {
    DEFAULT_CREDENTIAL_TTL_HOURS
}

fn default_secure_cookies() -> bool {
    true
}

fn default_cookie_name() -> String {
    "github_token".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            credential_ttl_hours: default_credential_ttl_hours(),
            secure_cookies: default_secure_cookies(),
            cookie_name: default_cookie_name(),
            cookie_secret: None,
        }
    }
}

/// GitHub OAuth application configuration.
///
/// Fields with defaults can be omitted when loading from environment variables.
#[derive(Clone, Deserialize)]
pub struct GithubConfig {
    /// OAuth application client ID.
    pub client_id: String,

    /// OAuth application client secret.
    pub client_secret: String,

    /// Base URL hosting `/login/oauth/access_token`.
    #[serde(default = "default_oauth_base_url")]
    pub oauth_base_url: String,

    /// Base URL of the REST API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// User-Agent sent with every request (GitHub rejects requests without one).
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Upper bound on each provider call, in milliseconds.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

fn default_oauth_base_url() -> String {
    "https://github.com".to_string()
}

fn default_api_base_url() -> String {
    "https://api.github.com".to_string()
}

fn default_user_agent() -> String {
    "MCP-Orchestrator".to_string()
}

fn default_request_timeout_ms() -> u64 {
    5000
}

impl GithubConfig {
    /// Creates a configuration for the public GitHub endpoints.
    #[must_use]
    pub fn new(client_id: String, client_secret: String) -> Self {
        Self {
            client_id,
            client_secret,
            oauth_base_url: default_oauth_base_url(),
            api_base_url: default_api_base_url(),
            user_agent: default_user_agent(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

impl std::fmt::Debug for GithubConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GithubConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[redacted]")
            .field("oauth_base_url", &self.oauth_base_url)
            .field("api_base_url", &self.api_base_url)
            .field("user_agent", &self.user_agent)
            .field("request_timeout_ms", &self.request_timeout_ms)
            .finish()
    }
}

impl ServerConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required configuration is missing or invalid.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
