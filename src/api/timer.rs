//! Timer API Endpoints
//!
//! REST endpoints for timer control. Every command answers with the timer
//! view after the command was applied.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::error::{AppError, AppResult};
use crate::models::timer_snapshot::TimerSnapshot;
use crate::services::timer_service::TimerCommand;

/// Body of `POST /api/timer`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerRequest {
    pub action: String,
}

/// Create timer API routes
pub fn create_timer_routes() -> Router<AppState> {
    Router::new()
        .route("/api/timer", get(get_timer).post(control_timer))
        .route("/api/timer/:action", post(timer_action))
}

/// Get current timer state
pub async fn get_timer(State(state): State<AppState>) -> Json<TimerSnapshot> {
    Json(state.timer.snapshot().await)
}

/// Apply the action named in the request body
pub async fn control_timer(
    State(state): State<AppState>,
    Json(request): Json<TimerRequest>,
) -> AppResult<Json<TimerSnapshot>> {
    let command = parse_command(&request.action)?;
    Ok(Json(state.timer.apply(command).await))
}

/// Apply the action named in the path
pub async fn timer_action(
    State(state): State<AppState>,
    Path(action): Path<String>,
) -> AppResult<Json<TimerSnapshot>> {
    let command = parse_command(&action)?;
    Ok(Json(state.timer.apply(command).await))
}

fn parse_command(action: &str) -> AppResult<TimerCommand> {
    action
        .trim()
        .to_ascii_lowercase()
        .parse()
        .map_err(|_| AppError::bad_request(&format!("Unknown timer action: {action}")))
}
