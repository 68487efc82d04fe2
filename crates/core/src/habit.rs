//! Habit model - the tracked behavior at the center of everything.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::id::{CompletionId, HabitId, UserId};
use crate::validation::{validate_habit_fields, ValidationError};
use crate::Time;

/// How often a habit is expected to be completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    /// Once per calendar day
    Daily,
    /// Once per calendar week (Monday start)
    Weekly,
    /// Once per calendar month
    Monthly,
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Daily => write!(f, "daily"),
            Self::Weekly => write!(f, "weekly"),
            Self::Monthly => write!(f, "monthly"),
        }
    }
}

/// Habit category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// General health
    Health,
    /// Exercise and fitness
    Fitness,
    /// Work and productivity
    Productivity,
    /// Study and learning
    Learning,
    /// Meditation and mindfulness
    Mindfulness,
    /// Social connection
    Social,
    /// Creative practice
    Creativity,
    /// Money and finance
    Finance,
    /// Anything else
    Other,
}

impl Default for Category {
    fn default() -> Self {
        Self::Other
    }
}

/// A user-owned tracked behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Habit {
    /// Unique identifier
    pub id: HabitId,

    /// Owning user
    pub user_id: UserId,

    /// Habit name (trimmed, at most 100 characters)
    pub name: String,

    /// Optional description (at most 500 characters)
    pub description: Option<String>,

    /// Category
    pub category: Category,

    /// Target completions per period (at least 1)
    pub target_count: u32,

    /// Completion frequency
    pub frequency: Frequency,

    /// Total completions recorded over the habit's lifetime
    pub completed_count: u32,

    /// Current consecutive-period streak
    pub current_streak: u32,

    /// Best streak ever reached
    pub best_streak: u32,

    /// Whether the habit was completed in the current period
    pub completed_today: bool,

    /// Timestamp of the most recent completion
    pub last_completed_at: Option<Time>,

    /// Optional reminder time in HH:MM format
    pub reminder_time: Option<String>,

    /// Display color (hex)
    pub color: String,

    /// Soft-removal flag
    pub is_active: bool,

    /// Creation timestamp
    pub created_at: Time,

    /// Last update timestamp
    pub updated_at: Time,
}

impl Habit {
    /// Default display color.
    pub const DEFAULT_COLOR: &'static str = "#3B82F6";

    /// Create a new habit after validating its user-supplied fields.
    pub fn new(
        user_id: UserId,
        name: impl Into<String>,
        category: Category,
        frequency: Frequency,
    ) -> Result<Self, ValidationError> {
        let name = name.into().trim().to_string();
        validate_habit_fields(&name, None, None, 1)?;

        let now = chrono::Utc::now();
        Ok(Self {
            id: HabitId::new(),
            user_id,
            name,
            description: None,
            category,
            target_count: 1,
            frequency,
            completed_count: 0,
            current_streak: 0,
            best_streak: 0,
            completed_today: false,
            last_completed_at: None,
            reminder_time: None,
            color: Self::DEFAULT_COLOR.to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply a completion at `at`: bump counters and streaks together.
    pub fn record_completion(&mut self, at: Time) {
        self.current_streak += 1;
        self.best_streak = self.best_streak.max(self.current_streak);
        self.completed_count += 1;
        self.completed_today = true;
        self.last_completed_at = Some(at);
        self.updated_at = at;
    }

    /// Undo today's completion: decrement counters, streak floors at zero.
    pub fn remove_completion(&mut self, at: Time) {
        self.current_streak = self.current_streak.saturating_sub(1);
        self.completed_count = self.completed_count.saturating_sub(1);
        self.completed_today = false;
        self.updated_at = at;
    }
}

/// One completion record per (user, habit, calendar day).
///
/// Created on completion, deleted on un-completion, never updated otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitCompletion {
    /// Unique identifier
    pub id: CompletionId,

    /// The habit that was completed
    pub habit_id: HabitId,

    /// Owning user
    pub user_id: UserId,

    /// Calendar day of the completion
    pub date: NaiveDate,

    /// Exact completion timestamp
    pub completed_at: Time,
}

impl HabitCompletion {
    /// Create a completion record for `at`'s calendar day.
    pub fn new(habit_id: HabitId, user_id: UserId, at: Time) -> Self {
        Self {
            id: CompletionId::new(),
            habit_id,
            user_id,
            date: at.date_naive(),
            completed_at: at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_habit_starts_clean() {
        let habit = Habit::new(
            UserId::from("user_1"),
            "Morning run",
            Category::Fitness,
            Frequency::Daily,
        )
        .unwrap();

        assert_eq!(habit.current_streak, 0);
        assert_eq!(habit.best_streak, 0);
        assert!(!habit.completed_today);
        assert!(habit.is_active);
        assert_eq!(habit.color, Habit::DEFAULT_COLOR);
    }

    #[test]
    fn record_completion_updates_streaks_together() {
        let mut habit = Habit::new(
            UserId::from("user_1"),
            "Read",
            Category::Learning,
            Frequency::Daily,
        )
        .unwrap();

        let now = chrono::Utc::now();
        habit.record_completion(now);
        habit.record_completion(now);

        assert_eq!(habit.current_streak, 2);
        assert_eq!(habit.best_streak, 2);
        assert_eq!(habit.completed_count, 2);
        assert!(habit.completed_today);
        assert_eq!(habit.last_completed_at, Some(now));
    }

    #[test]
    fn remove_completion_floors_at_zero() {
        let mut habit = Habit::new(
            UserId::from("user_1"),
            "Read",
            Category::Learning,
            Frequency::Daily,
        )
        .unwrap();

        habit.remove_completion(chrono::Utc::now());
        assert_eq!(habit.current_streak, 0);
        assert_eq!(habit.completed_count, 0);
    }

    #[test]
    fn empty_name_is_rejected() {
        let result = Habit::new(
            UserId::from("user_1"),
            "   ",
            Category::Other,
            Frequency::Daily,
        );
        assert!(result.is_err());
    }
}
