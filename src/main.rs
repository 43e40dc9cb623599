//! Focus Timer server: runs the session timer and exposes it over HTTP

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use focus_timer::api::{create_app, AppState};
use focus_timer::config::Config;
use focus_timer::logging::{init_logging, log_error, log_startup};
use focus_timer::services::{InMemorySessionLog, SessionTimer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("failed to load configuration")?;

    init_logging(&config);
    log_startup();
    config.log_config();

    let sessions = Arc::new(InMemorySessionLog::with_capacity(
        config.session_history_limit,
    ));
    let timer = SessionTimer::new(sessions.clone());
    let app = create_app(AppState::new(timer.clone(), sessions), &config);

    let listener = TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("failed to bind {}", config.bind_address()))?;
    info!(url = %config.server_url(), "Focus Timer listening");

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    // Cancel the countdown before exiting so no timer task outlives the server
    timer.dispose().await;

    if let Err(e) = &served {
        log_error(&e.to_string(), "server");
    }
    served.context("server error")?;

    info!("Focus Timer stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log_error(&e.to_string(), "signal handler");
    }
    info!("Shutdown signal received");
}
