//! Storage trait abstraction.

use async_trait::async_trait;
use chrono::NaiveDate;
use habitflow_core::{
    FocusSession, Habit, HabitCompletion, HabitId, UserId, UserProgress,
};

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Item not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Storage abstraction for HabitFlow data.
///
/// This trait allows different storage backends to be plugged in. All
/// entities are scoped to exactly one user; completions are unique per
/// (user, habit, calendar day).
#[async_trait]
pub trait Storage: Send + Sync {
    // === Habit operations ===

    /// Save a habit (create or update).
    async fn save_habit(&mut self, habit: &Habit) -> Result<()>;

    /// Load a habit by ID.
    async fn load_habit(&self, id: HabitId) -> Result<Option<Habit>>;

    /// List a user's habits, optionally restricted to active ones.
    async fn list_habits(&self, user_id: &UserId, active_only: bool) -> Result<Vec<Habit>>;

    /// Delete a habit.
    async fn delete_habit(&mut self, id: HabitId) -> Result<()>;

    // === Completion operations ===

    /// Save a completion record. Overwrites any record with the same
    /// (habit, date) key, which is what enforces per-day uniqueness.
    async fn save_completion(&mut self, completion: &HabitCompletion) -> Result<()>;

    /// Find the completion for a habit on a calendar day, if any.
    async fn find_completion(
        &self,
        habit_id: HabitId,
        date: NaiveDate,
    ) -> Result<Option<HabitCompletion>>;

    /// Delete the completion for a habit on a calendar day.
    async fn delete_completion(&mut self, habit_id: HabitId, date: NaiveDate) -> Result<()>;

    /// List a habit's completions, newest first.
    async fn list_completions(&self, habit_id: HabitId) -> Result<Vec<HabitCompletion>>;

    // === Progress operations ===

    /// Load a user's gamification aggregate.
    async fn load_progress(&self, user_id: &UserId) -> Result<Option<UserProgress>>;

    /// Save a user's gamification aggregate.
    async fn save_progress(&mut self, progress: &UserProgress) -> Result<()>;

    // === Focus session operations ===

    /// Save a focus session record.
    async fn save_session(&mut self, session: &FocusSession) -> Result<()>;

    /// List a user's focus sessions, newest first.
    async fn list_sessions(&self, user_id: &UserId) -> Result<Vec<FocusSession>>;
}
