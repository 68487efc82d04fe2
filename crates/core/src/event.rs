//! Event payloads consumed by the gamification engine.

use serde::{Deserialize, Serialize};

use crate::id::{HabitId, UserId};
use crate::session::SessionKind;
use crate::Time;

/// A habit-completion toggle request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitCompletionEvent {
    /// Target habit
    pub habit_id: HabitId,

    /// Acting user
    pub user_id: UserId,

    /// When the completion happened
    pub completed_at: Time,
}

/// A finished focus-timer session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FocusSessionEvent {
    /// Acting user
    pub user_id: UserId,

    /// Session kind
    pub session_type: SessionKind,

    /// Session length in minutes
    pub duration_minutes: u32,
}
