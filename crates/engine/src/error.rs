//! Engine error type.

use habitflow_core::{HabitId, ValidationError};
use habitflow_storage::StorageError;

/// Errors from the gamification engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Underlying storage failure
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Referenced habit does not exist
    #[error("habit not found: {0}")]
    HabitNotFound(HabitId),

    /// Habit belongs to a different user
    #[error("habit {0} does not belong to this user")]
    WrongOwner(HabitId),

    /// Invalid input on a create/update path
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
