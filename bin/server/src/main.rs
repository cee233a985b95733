use orchestrator_auth_server::{
    app,
    auth::{AppState, GithubClient, SharedProvider},
    config::ServerConfig,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment
    let config = ServerConfig::from_env().expect("failed to load configuration");
    tracing::info!(github = ?config.github, "Loaded configuration");

    if !config.session.secure_cookies {
        tracing::warn!("Secure cookie flag disabled; only use this for local HTTP development");
    }

    let github = GithubClient::new(&config.github).expect("failed to build GitHub client");
    let provider: SharedProvider = Arc::new(github);

    let app_state = AppState::new(provider, &config.session, &config.frontend_url)
        .expect("failed to build application state");

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("failed to bind to address");

    tracing::info!("listening on http://{}", config.bind_addr);

    axum::serve(listener, app::router(app_state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutdown signal received"),
        Err(e) => tracing::error!(error = %e, "failed to listen for shutdown signal"),
    }
}
