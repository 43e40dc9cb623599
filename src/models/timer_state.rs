//! Timer State Model
//!
//! The focus/break countdown as a synchronous state machine. Every mutation
//! the session timer performs goes through the methods here, which keeps the
//! long-break cadence and completion reporting in one place regardless of
//! whether a transition came from the countdown or from a user command.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::Display;

use super::session::{Session, SessionType};

/// Focus period length in seconds (25 minutes)
pub const FOCUS_DURATION: u32 = 1500;

/// Short break length in seconds (5 minutes)
pub const SHORT_BREAK_DURATION: u32 = 300;

/// Long break length in seconds (15 minutes)
pub const LONG_BREAK_DURATION: u32 = 900;

/// Every Nth completed focus period is followed by a long break
pub const LONG_BREAK_INTERVAL: u32 = 4;

/// Upper bound for `time_left`
pub const MAX_DURATION: u32 = if FOCUS_DURATION > LONG_BREAK_DURATION {
    FOCUS_DURATION
} else {
    LONG_BREAK_DURATION
};

/// Whether the break following a focus period is long, given the number of
/// focus periods completed *before* that transition.
pub fn is_long_break(completed_focus: u32) -> bool {
    completed_focus > 0 && (completed_focus + 1) % LONG_BREAK_INTERVAL == 0
}

/// Whether the current period is still counting or waiting to be switched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TimerPhase {
    Active,
    /// Countdown hit zero; the automatic switch has not run yet
    Completed,
}

/// What caused a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Trigger {
    /// The countdown reached zero
    Natural,
    /// The user asked to switch
    Manual,
}

/// Record of a single transition, for logging and event fan-out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub from: SessionType,
    pub to: SessionType,
    pub trigger: Trigger,
    pub long_break: bool,
    pub session_count: u32,
    pub time_left: u32,
}

/// Result of advancing the countdown by one second
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Timer was not counting; nothing changed
    Idle,
    /// One second elapsed, more remain
    Counting { time_left: u32 },
    /// The period just finished. Carries the completion record when the
    /// period had been started.
    Completed(Option<Session>),
}

/// Mutable countdown state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub time_left: u32,
    pub is_running: bool,
    pub session_type: SessionType,
    pub session_count: u32,
    pub start_time: Option<DateTime<Utc>>,

    /// Nominal length of the current period, fixed when the period is entered
    pub period_duration: u32,

    pub phase: TimerPhase,
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerState {
    /// Fresh state: a stopped focus period with nothing completed
    pub fn new() -> Self {
        Self {
            time_left: FOCUS_DURATION,
            is_running: false,
            session_type: SessionType::Focus,
            session_count: 0,
            start_time: None,
            period_duration: FOCUS_DURATION,
            phase: TimerPhase::Active,
        }
    }

    /// Begin or resume the countdown. Returns true when the state changed.
    ///
    /// `start_time` is only stamped on the first start of a period, so a
    /// pause/resume cycle keeps the original start.
    pub fn start(&mut self, now: DateTime<Utc>) -> bool {
        if self.is_running || self.phase == TimerPhase::Completed {
            return false;
        }

        self.is_running = true;
        if self.start_time.is_none() {
            self.start_time = Some(now);
        }
        true
    }

    /// Stop the countdown in place. Returns true when the state changed.
    pub fn pause(&mut self) -> bool {
        if !self.is_running {
            return false;
        }
        self.is_running = false;
        true
    }

    /// Stop and rewind the current period.
    ///
    /// A long break rewinds to the short break length.
    pub fn reset(&mut self) {
        let duration = match self.session_type {
            SessionType::Focus => FOCUS_DURATION,
            SessionType::Break => SHORT_BREAK_DURATION,
        };

        self.is_running = false;
        self.time_left = duration;
        self.period_duration = duration;
        self.start_time = None;
        self.phase = TimerPhase::Active;
    }

    /// Compute the state after switching to the next period.
    ///
    /// Long-break eligibility is decided on the pre-transition
    /// `session_count`; the count is incremented afterwards, and only when
    /// leaving a focus period.
    pub fn transition(&self, trigger: Trigger) -> (TimerState, Transition) {
        let (session_count, period, long_break) = match self.session_type {
            SessionType::Focus => {
                let long_break = is_long_break(self.session_count);
                let period = if long_break {
                    LONG_BREAK_DURATION
                } else {
                    SHORT_BREAK_DURATION
                };
                (self.session_count + 1, period, long_break)
            }
            SessionType::Break => (self.session_count, FOCUS_DURATION, false),
        };

        let next = TimerState {
            time_left: period,
            is_running: false,
            session_type: self.session_type.next(),
            session_count,
            start_time: None,
            period_duration: period,
            phase: TimerPhase::Active,
        };

        let transition = Transition {
            from: self.session_type,
            to: next.session_type,
            trigger,
            long_break,
            session_count,
            time_left: period,
        };

        (next, transition)
    }

    /// Replace this state with the result of [`TimerState::transition`]
    pub fn apply_transition(&mut self, trigger: Trigger) -> Transition {
        let (next, transition) = self.transition(trigger);
        *self = next;
        transition
    }

    /// Advance the countdown by one second.
    ///
    /// On reaching zero the timer stops and enters [`TimerPhase::Completed`];
    /// the caller is responsible for the follow-up transition. The reported
    /// duration is the nominal period length, not the wall-clock time spent.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.is_running || self.phase == TimerPhase::Completed {
            return TickOutcome::Idle;
        }

        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left > 0 {
            return TickOutcome::Counting {
                time_left: self.time_left,
            };
        }

        self.is_running = false;
        self.phase = TimerPhase::Completed;

        let session = self
            .start_time
            .map(|started| Session::new(self.session_type, self.period_duration, started));
        TickOutcome::Completed(session)
    }

    /// Fraction of the current period already elapsed (0.0 to 1.0)
    pub fn progress(&self) -> f64 {
        if self.period_duration == 0 {
            return 0.0;
        }
        let elapsed = self.period_duration.saturating_sub(self.time_left);
        f64::from(elapsed) / f64::from(self.period_duration)
    }

    /// Remaining time as `mm:ss`
    pub fn formatted_time_left(&self) -> String {
        format_clock(self.time_left)
    }

    pub fn is_long_break_period(&self) -> bool {
        self.session_type == SessionType::Break && self.period_duration == LONG_BREAK_DURATION
    }

    /// Label for the current period, e.g. `Focus Time` or `Long Break`
    pub fn session_label(&self) -> &'static str {
        match self.session_type {
            SessionType::Focus => SessionType::Focus.display_name(),
            SessionType::Break if self.is_long_break_period() => "Long Break",
            SessionType::Break => "Short Break",
        }
    }

    /// Whether `time_left` respects its bounds
    pub fn within_bounds(&self) -> bool {
        self.time_left <= MAX_DURATION && self.time_left <= self.period_duration
    }
}

/// Format seconds as `mm:ss`
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
