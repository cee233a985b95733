//! HTTP router for the authentication endpoints.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::auth::{self, AppState};

/// Builds the router serving `/auth/*`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/auth/status", get(auth::status))
        .route("/auth/callback", get(auth::callback))
        .route("/auth/logout", post(auth::logout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
