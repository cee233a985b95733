//! Authentication routes for status, callback, and logout.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::SignedCookieJar;
use orchestrator_auth_session::{LoginError, StatusError};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, error, info, warn};

use super::{AppState, cookie::CookieCredentialStore};

/// Query parameters for the OAuth callback.
///
/// GitHub sends `code` on success, and `error` plus `error_description` when
/// the user declines the consent screen.
#[derive(Debug, Default, Deserialize)]
pub struct CallbackQuery {
    code: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

/// Reports whether the current client is logged in, and as whom.
pub async fn status(State(state): State<AppState>, jar: SignedCookieJar) -> Response {
    let mut store = CookieCredentialStore::new(jar, &state.cookies);

    match state.lifecycle.check_status(&mut store).await {
        Ok(status) => (store.into_jar(), Json(status)).into_response(),
        Err(err) => (store.into_jar(), StatusRejection(err)).into_response(),
    }
}

/// Handles the OAuth callback after the user authorizes the application.
pub async fn callback(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
    jar: SignedCookieJar,
) -> Response {
    if let Some(provider_error) = &query.error {
        info!(
            error = %provider_error,
            description = ?query.error_description,
            "provider returned an error instead of a code"
        );
    }

    let mut store = CookieCredentialStore::new(jar, &state.cookies);

    match state
        .lifecycle
        .complete_login(query.code.as_deref(), &mut store)
        .await
    {
        Ok(_) => (store.into_jar(), Redirect::to(&state.login_redirect)).into_response(),
        Err(err) => LoginRejection(err).into_response(),
    }
}

/// Logs the user out and revokes the GitHub grant.
///
/// Always reports success; revocation failures are only logged.
pub async fn logout(State(state): State<AppState>, jar: SignedCookieJar) -> impl IntoResponse {
    let mut store = CookieCredentialStore::new(jar, &state.cookies);
    let outcome = state.lifecycle.logout(&mut store).await;
    debug!(?outcome, "logout finished");

    (store.into_jar(), Json(json!({ "ok": true })))
}

/// A failed status check.
struct StatusRejection(StatusError);

impl IntoResponse for StatusRejection {
    fn into_response(self) -> Response {
        error!(error = %self.0, "session status check failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "loggedIn": false })),
        )
            .into_response()
    }
}

/// A failed login completion.
struct LoginRejection(LoginError);

impl IntoResponse for LoginRejection {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            LoginError::MissingCode => (StatusCode::BAD_REQUEST, "Missing code"),
            LoginError::InvalidCode { .. } => {
                warn!(error = %self.0, "OAuth code exchange rejected");
                (StatusCode::BAD_REQUEST, "Invalid OAuth code")
            }
            LoginError::ProviderUnavailable { .. } => {
                error!(error = %self.0, "OAuth code exchange failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "OAuth failed")
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
