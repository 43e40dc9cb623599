//! Session history endpoint

use axum::{extract::State, response::Json, routing::get, Router};
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::error::AppResult;
use crate::models::session::Session;

/// Completed sessions with focus totals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionHistory {
    pub sessions: Vec<Session>,
    pub focus_count: usize,
    pub total_focus_seconds: u64,
}

pub fn create_session_routes() -> Router<AppState> {
    Router::new().route("/api/sessions", get(list_sessions))
}

pub async fn list_sessions(State(state): State<AppState>) -> AppResult<Json<SessionHistory>> {
    Ok(Json(SessionHistory {
        sessions: state.sessions.sessions()?,
        focus_count: state.sessions.focus_count()?,
        total_focus_seconds: state.sessions.total_focus_seconds()?,
    }))
}
