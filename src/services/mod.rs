//! Services module for Focus Timer
//!
//! The real-time timer driver and its collaborators.

pub mod session_log;
pub mod time_provider;
pub mod timer_service;

// Re-export commonly used services
pub use session_log::{InMemorySessionLog, SessionLog, SessionLogError};
pub use time_provider::{MockTimeProvider, SystemTimeProvider, TimeProvider};
pub use timer_service::{SessionTimer, TimerCommand, TimerEvent};
