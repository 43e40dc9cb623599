//! Focus Timer
//!
//! Pomodoro-style focus/break session timer: a countdown state machine with
//! long-break cadence, completion reporting to a session log, and a small
//! HTTP surface for the UI layer.

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{Session, SessionType, TimerSnapshot, TimerState};
pub use services::{SessionLog, SessionTimer, TimerCommand, TimerEvent};
