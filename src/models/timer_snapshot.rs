//! Display view of the timer, derived from [`TimerState`] on demand.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::session::SessionType;
use super::timer_state::{TimerPhase, TimerState};

/// Timer state for API responses and UI rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub time_left: u32,
    pub formatted_time: String,
    pub progress_percentage: f64,
    pub session_type: SessionType,
    pub session_label: String,
    pub session_count: u32,
    pub is_running: bool,
    pub phase: TimerPhase,
    pub started_at: Option<DateTime<Utc>>,
}

impl From<&TimerState> for TimerSnapshot {
    fn from(state: &TimerState) -> Self {
        Self {
            time_left: state.time_left,
            formatted_time: state.formatted_time_left(),
            progress_percentage: state.progress() * 100.0,
            session_type: state.session_type,
            session_label: state.session_label().to_string(),
            session_count: state.session_count,
            is_running: state.is_running,
            phase: state.phase,
            started_at: state.start_time,
        }
    }
}
