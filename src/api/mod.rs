//! API module for Focus Timer
//!
//! Local HTTP control surface for the session timer.

pub mod sessions;
pub mod timer;

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use crate::config::Config;
use crate::error::AppError;
use crate::services::{InMemorySessionLog, SessionTimer};

pub use sessions::create_session_routes;
pub use timer::create_timer_routes;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub timer: SessionTimer,
    pub sessions: Arc<InMemorySessionLog>,
}

impl AppState {
    pub fn new(timer: SessionTimer, sessions: Arc<InMemorySessionLog>) -> Self {
        Self { timer, sessions }
    }
}

/// Build the full application router
pub fn create_app(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .merge(create_timer_routes())
        .merge(create_session_routes())
        .route("/api/health", get(health_check))
        .fallback(fallback)
        .with_state(state);

    let cors = cors_layer(&config.cors_origins);
    if config.enable_request_logging {
        router.layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
    } else {
        router.layer(cors)
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(origins)
}

async fn health_check() -> &'static str {
    "OK"
}

async fn fallback() -> AppError {
    AppError::not_found("Route")
}
