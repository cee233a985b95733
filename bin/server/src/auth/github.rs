//! GitHub implementation of the identity provider.
//!
//! - `POST /login/oauth/access_token` exchanges an authorization code
//! - `GET /user` resolves a credential to its profile
//! - `DELETE /applications/{client_id}/grant` revokes the application grant
//!
//! Every call is a single request bounded by the configured timeout.

use async_trait::async_trait;
use oauth2::{AccessToken, ClientId, ClientSecret};
use orchestrator_auth_session::{
    Credential, ExchangeError, IdentityProvider, Profile, ProfileError, RevokeError,
};
use reqwest::{Client, StatusCode, Url, header};
use rootcause::prelude::Report;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

use crate::config::GithubConfig;
use crate::error::SetupError;

/// Media type for the GitHub REST API.
const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";

/// GitHub REST API version header name.
const GITHUB_API_VERSION_HEADER: &str = "X-GitHub-Api-Version";

/// GitHub REST API version we target.
const GITHUB_API_VERSION: &str = "2022-11-28";

/// GitHub OAuth application client.
pub struct GithubClient {
    http: Client,
    client_id: ClientId,
    client_secret: ClientSecret,
    token_url: Url,
    profile_url: Url,
    grant_url: Url,
}

#[derive(Serialize)]
struct TokenRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    code: &'a str,
}

/// GitHub answers a failed exchange with 200 and an `error` field, so every
/// field is optional.
#[derive(Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

#[derive(Serialize)]
struct RevokeRequest<'a> {
    access_token: &'a str,
}

impl GithubClient {
    /// Creates a new GitHub client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a base URL is invalid or the HTTP client cannot be built.
    pub fn new(config: &GithubConfig) -> Result<Self, Report<SetupError>> {
        let oauth_base = parse_base_url("github.oauth_base_url", &config.oauth_base_url)?;
        let api_base = parse_base_url("github.api_base_url", &config.api_base_url)?;

        let token_url = join_url(&oauth_base, "github.oauth_base_url", "login/oauth/access_token")?;
        let profile_url = join_url(&api_base, "github.api_base_url", "user")?;
        let grant_url = join_url(
            &api_base,
            "github.api_base_url",
            &format!("applications/{}/grant", config.client_id),
        )?;

        let http = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .user_agent(config.user_agent.clone())
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| SetupError::HttpClient {
                reason: e.to_string(),
            })?;

        Ok(Self {
            http,
            client_id: ClientId::new(config.client_id.clone()),
            client_secret: ClientSecret::new(config.client_secret.clone()),
            token_url,
            profile_url,
            grant_url,
        })
    }
}

fn parse_base_url(field: &'static str, raw: &str) -> Result<Url, SetupError> {
    // A trailing slash keeps `join` from replacing the last path segment.
    let normalized = format!("{}/", raw.trim_end_matches('/'));
    Url::parse(&normalized).map_err(|e| SetupError::InvalidUrl {
        field,
        reason: e.to_string(),
    })
}

fn join_url(base: &Url, field: &'static str, path: &str) -> Result<Url, SetupError> {
    base.join(path).map_err(|e| SetupError::InvalidUrl {
        field,
        reason: e.to_string(),
    })
}

#[async_trait]
impl IdentityProvider for GithubClient {
    #[instrument(skip_all)]
    async fn exchange_code(&self, code: &str) -> Result<AccessToken, ExchangeError> {
        let response = self
            .http
            .post(self.token_url.clone())
            .header(header::ACCEPT, "application/json")
            .json(&TokenRequest {
                client_id: self.client_id.as_str(),
                client_secret: self.client_secret.secret(),
                code,
            })
            .send()
            .await
            .map_err(|e| ExchangeError::Unavailable {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if status.is_server_error() {
            return Err(ExchangeError::Unavailable {
                reason: format!("token endpoint returned {status}"),
            });
        }

        let body: TokenResponse = response.json().await.map_err(|e| {
            if e.is_decode() {
                ExchangeError::MalformedResponse {
                    status: status.as_u16(),
                    reason: e.to_string(),
                }
            } else {
                ExchangeError::Unavailable {
                    reason: e.to_string(),
                }
            }
        })?;

        match body.access_token.filter(|token| !token.is_empty()) {
            Some(token) => Ok(AccessToken::new(token)),
            None => {
                debug!(
                    error = ?body.error,
                    description = ?body.error_description,
                    "token response carried no access token"
                );
                Err(ExchangeError::NoCredential { error: body.error })
            }
        }
    }

    #[instrument(skip_all)]
    async fn fetch_profile(&self, credential: &Credential) -> Result<Profile, ProfileError> {
        let response = self
            .http
            .get(self.profile_url.clone())
            .header(header::ACCEPT, GITHUB_MEDIA_TYPE)
            .header(GITHUB_API_VERSION_HEADER, GITHUB_API_VERSION)
            .bearer_auth(credential.secret())
            .send()
            .await
            .map_err(|e| ProfileError::Unavailable {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ProfileError::InvalidCredential {
                status: status.as_u16(),
            });
        }
        if !status.is_success() {
            return Err(ProfileError::UnexpectedResponse {
                status: Some(status.as_u16()),
                reason: format!("profile endpoint returned {status}"),
            });
        }

        response.json::<Profile>().await.map_err(|e| {
            if e.is_decode() {
                ProfileError::UnexpectedResponse {
                    status: Some(status.as_u16()),
                    reason: e.to_string(),
                }
            } else {
                ProfileError::Unavailable {
                    reason: e.to_string(),
                }
            }
        })
    }

    #[instrument(skip_all)]
    async fn revoke(&self, credential: &Credential) -> Result<(), RevokeError> {
        let response = self
            .http
            .delete(self.grant_url.clone())
            .header(header::ACCEPT, GITHUB_MEDIA_TYPE)
            .header(GITHUB_API_VERSION_HEADER, GITHUB_API_VERSION)
            .basic_auth(self.client_id.as_str(), Some(self.client_secret.secret()))
            .json(&RevokeRequest {
                access_token: credential.secret(),
            })
            .send()
            .await
            .map_err(|e| RevokeError::Unavailable {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(RevokeError::Rejected {
                status: status.as_u16(),
            })
        }
    }
}
