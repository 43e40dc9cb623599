//! Time Provider Trait and Implementations
//!
//! Wall-clock source for session start timestamps. Countdown pacing uses the
//! tokio timer instead; this only answers "what time is it now".

use chrono::{DateTime, TimeZone, Utc};
use std::sync::{Arc, Mutex};

/// Trait for providing the current wall-clock time
pub trait TimeProvider: Send + Sync {
    /// Get the current UTC time
    fn now_utc(&self) -> DateTime<Utc>;
}

/// System time provider for production use
#[derive(Debug, Clone, Default)]
pub struct SystemTimeProvider;

impl SystemTimeProvider {
    pub fn new() -> Self {
        Self
    }
}

impl TimeProvider for SystemTimeProvider {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Mock time provider for testing
#[derive(Debug, Clone)]
pub struct MockTimeProvider {
    current_time: Arc<Mutex<DateTime<Utc>>>,
}

impl MockTimeProvider {
    /// Create a new mock time provider starting from the given time
    pub fn new(start_time: DateTime<Utc>) -> Self {
        Self {
            current_time: Arc::new(Mutex::new(start_time)),
        }
    }

    /// Create a mock time provider starting from a specific date/time
    pub fn new_from_ymd_hms(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        min: u32,
        sec: u32,
    ) -> Option<Self> {
        Utc.with_ymd_and_hms(year, month, day, hour, min, sec)
            .single()
            .map(Self::new)
    }

    /// Advance the mock time by the specified number of seconds
    pub fn advance_seconds(&self, seconds: i64) {
        if let Ok(mut time) = self.current_time.lock() {
            *time += chrono::Duration::seconds(seconds);
        }
    }

    /// Get the current mock time
    pub fn current_time(&self) -> DateTime<Utc> {
        match self.current_time.lock() {
            Ok(time) => *time,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

impl TimeProvider for MockTimeProvider {
    fn now_utc(&self) -> DateTime<Utc> {
        self.current_time()
    }
}
