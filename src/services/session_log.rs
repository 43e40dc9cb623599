//! Session Log
//!
//! Receiving side of completed sessions. The timer hands every naturally
//! completed period to a [`SessionLog`]; storage and aggregation live behind
//! the trait so the countdown never depends on them.

use std::collections::VecDeque;
use std::sync::RwLock;

use crate::models::session::Session;

/// Consumer of completed sessions
pub trait SessionLog: Send + Sync {
    /// Store a completed session
    fn record(&self, session: &Session) -> Result<(), SessionLogError>;
}

/// Session log errors
#[derive(Debug, thiserror::Error)]
pub enum SessionLogError {
    #[error("Session log lock poisoned")]
    Poisoned,

    #[error("Session log unavailable: {0}")]
    Unavailable(String),

    #[error("Session log panicked while recording")]
    Panicked,
}

/// In-process session history, newest last.
///
/// With a capacity set, the oldest entries are dropped once it is reached.
#[derive(Debug, Default)]
pub struct InMemorySessionLog {
    sessions: RwLock<VecDeque<Session>>,
    capacity: Option<usize>,
}

impl InMemorySessionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a log that keeps at most `capacity` sessions
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            sessions: RwLock::new(VecDeque::with_capacity(capacity)),
            capacity: Some(capacity),
        }
    }

    /// All stored sessions in completion order
    pub fn sessions(&self) -> Result<Vec<Session>, SessionLogError> {
        let sessions = self.sessions.read().map_err(|_| SessionLogError::Poisoned)?;
        Ok(sessions.iter().cloned().collect())
    }

    pub fn len(&self) -> Result<usize, SessionLogError> {
        let sessions = self.sessions.read().map_err(|_| SessionLogError::Poisoned)?;
        Ok(sessions.len())
    }

    pub fn is_empty(&self) -> Result<bool, SessionLogError> {
        Ok(self.len()? == 0)
    }

    /// Number of completed focus periods
    pub fn focus_count(&self) -> Result<usize, SessionLogError> {
        let sessions = self.sessions.read().map_err(|_| SessionLogError::Poisoned)?;
        Ok(sessions.iter().filter(|s| s.is_focus()).count())
    }

    /// Sum of nominal focus durations in seconds
    pub fn total_focus_seconds(&self) -> Result<u64, SessionLogError> {
        let sessions = self.sessions.read().map_err(|_| SessionLogError::Poisoned)?;
        Ok(sessions
            .iter()
            .filter(|s| s.is_focus())
            .map(|s| u64::from(s.duration))
            .sum())
    }
}

impl SessionLog for InMemorySessionLog {
    fn record(&self, session: &Session) -> Result<(), SessionLogError> {
        let mut sessions = self.sessions.write().map_err(|_| SessionLogError::Poisoned)?;

        if let Some(capacity) = self.capacity {
            if capacity == 0 {
                return Ok(());
            }
            while sessions.len() >= capacity {
                sessions.pop_front();
            }
        }

        sessions.push_back(session.clone());
        Ok(())
    }
}
