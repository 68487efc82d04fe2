//! HabitFlow core data models.
//!
//! This crate defines the fundamental data structures shared by the
//! habit-tracking and gamification subsystems.

#![warn(missing_docs)]

// Core identities
mod id;

// Habit tracking
mod habit;
mod session;

// Gamification
mod reward;
mod progress;

// Events and validation
mod event;
mod validation;

// Re-exports
pub use id::*;

// Habit & completions
pub use habit::{Category, Frequency, Habit, HabitCompletion};
pub use session::{FocusSession, SessionKind};

// Rewards & progress
pub use reward::{
    EvolutionChain, EvolutionRequirement, Rarity, RewardInstance, Species, TriggerType,
};
pub use progress::{
    experience_for_rarity, level_for_experience, required_experience, Achievement, UserProgress,
    UserStats, DEFAULT_TITLE,
};

// Events
pub use event::{FocusSessionEvent, HabitCompletionEvent};

// Validation
pub use validation::{validate_habit_fields, validate_reminder_time, ValidationError};

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
