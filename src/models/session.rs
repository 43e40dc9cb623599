//! Session Model
//!
//! Completed focus and break periods as reported to the session log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

/// Kind of period the timer is counting down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SessionType {
    Focus,
    Break,
}

impl SessionType {
    /// The type the timer moves to on the next transition
    pub fn next(self) -> Self {
        match self {
            SessionType::Focus => SessionType::Break,
            SessionType::Break => SessionType::Focus,
        }
    }

    /// Get display name for this session type
    pub fn display_name(self) -> &'static str {
        match self {
            SessionType::Focus => "Focus Time",
            SessionType::Break => "Break Time",
        }
    }
}

/// A single completed period. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Unique identifier for the record
    pub id: Uuid,

    /// Type of the completed period
    #[serde(rename = "type")]
    pub session_type: SessionType,

    /// Nominal duration of the period in seconds
    pub duration: u32,

    /// When the period was first started
    pub timestamp: DateTime<Utc>,
}

impl Session {
    /// Create a new session record
    pub fn new(session_type: SessionType, duration: u32, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_type,
            duration,
            timestamp,
        }
    }

    pub fn is_focus(&self) -> bool {
        self.session_type == SessionType::Focus
    }
}
