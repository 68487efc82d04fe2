//! Focus (Pomodoro) session model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::id::{SessionId, UserId};
use crate::Time;

/// Kind of focus-timer session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionKind {
    /// A work interval
    Work,
    /// A short break
    Break,
    /// A long break
    LongBreak,
}

impl std::fmt::Display for SessionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Work => write!(f, "work"),
            Self::Break => write!(f, "break"),
            Self::LongBreak => write!(f, "longBreak"),
        }
    }
}

/// A completed focus-timer session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FocusSession {
    /// Unique identifier
    pub id: SessionId,

    /// Owning user
    pub user_id: UserId,

    /// Session kind
    pub kind: SessionKind,

    /// Duration in minutes (at least 1)
    pub duration_minutes: u32,

    /// When the session finished
    pub completed_at: Time,

    /// Calendar day of the session
    pub date: NaiveDate,
}

impl FocusSession {
    /// Record a session that finished at `at`.
    pub fn new(user_id: UserId, kind: SessionKind, duration_minutes: u32, at: Time) -> Self {
        Self {
            id: SessionId::new(),
            user_id,
            kind,
            duration_minutes: duration_minutes.max(1),
            completed_at: at,
            date: at.date_naive(),
        }
    }
}
