//! Models module for Focus Timer
//!
//! Session records, the countdown state machine and its display view.

pub mod session;
pub mod timer_snapshot;
pub mod timer_state;

// Re-export commonly used types
pub use session::{Session, SessionType};
pub use timer_snapshot::TimerSnapshot;
pub use timer_state::{TickOutcome, TimerPhase, TimerState, Transition, Trigger};
