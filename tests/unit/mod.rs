//! Unit Tests Module
//!
//! Synchronous checks of the countdown state machine and the session log.

mod test_session_log;
mod test_timer_state;
