//! Batched reset pass over a user's habits.

use habitflow_core::{Time, UserId};
use habitflow_storage::{Result, Storage};
use tracing::info;

use crate::calculator::{should_break_streak, should_reset};

/// What a reset pass changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResetSummary {
    /// Habits whose completed-today flag was cleared
    pub reset: usize,

    /// Habits whose streak was zeroed
    pub streaks_broken: usize,
}

/// Apply both predicates to all of a user's active habits in one pass.
///
/// The predicates are pure; this runner performs the writes: reset clears
/// `completed_today`, break zeroes `current_streak`. A habit can qualify
/// for one, both, or neither.
pub async fn run_reset_pass<S: Storage>(
    storage: &mut S,
    user_id: &UserId,
    now: Time,
) -> Result<ResetSummary> {
    let habits = storage.list_habits(user_id, true).await?;
    let mut summary = ResetSummary::default();

    for mut habit in habits {
        let reset = habit.completed_today && should_reset(&habit, now);
        let broke = should_break_streak(&habit, now);

        if !reset && !broke {
            continue;
        }

        if reset {
            habit.completed_today = false;
            summary.reset += 1;
        }
        if broke {
            habit.current_streak = 0;
            summary.streaks_broken += 1;
        }
        habit.updated_at = now;
        storage.save_habit(&habit).await?;
    }

    if summary.reset > 0 || summary.streaks_broken > 0 {
        info!(
            user = %user_id,
            reset = summary.reset,
            broken = summary.streaks_broken,
            "reset pass applied"
        );
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use habitflow_core::{Category, Frequency, Habit};
    use habitflow_storage::MemoryStorage;

    fn utc(y: i32, m: u32, d: u32, h: u32) -> Time {
        chrono::Utc.with_ymd_and_hms(y, m, d, h, 0, 0).single().unwrap()
    }

    #[tokio::test]
    async fn stale_habit_is_reset_and_broken() {
        let mut storage = MemoryStorage::new();
        let user = UserId::from("user_1");

        let mut habit =
            Habit::new(user.clone(), "Run", Category::Fitness, Frequency::Daily).unwrap();
        habit.completed_today = true;
        habit.current_streak = 5;
        habit.best_streak = 5;
        habit.last_completed_at = Some(utc(2024, 6, 13, 12));
        storage.save_habit(&habit).await.unwrap();

        let summary = run_reset_pass(&mut storage, &user, utc(2024, 6, 15, 8))
            .await
            .unwrap();

        assert_eq!(summary, ResetSummary { reset: 1, streaks_broken: 1 });

        let updated = storage.load_habit(habit.id).await.unwrap().unwrap();
        assert!(!updated.completed_today);
        assert_eq!(updated.current_streak, 0);
        assert_eq!(updated.best_streak, 5, "best streak is untouched");
    }

    #[tokio::test]
    async fn one_day_gap_resets_without_breaking() {
        let mut storage = MemoryStorage::new();
        let user = UserId::from("user_1");

        let mut habit =
            Habit::new(user.clone(), "Read", Category::Learning, Frequency::Daily).unwrap();
        habit.completed_today = true;
        habit.current_streak = 3;
        habit.last_completed_at = Some(utc(2024, 6, 14, 22));
        storage.save_habit(&habit).await.unwrap();

        let summary = run_reset_pass(&mut storage, &user, utc(2024, 6, 15, 8))
            .await
            .unwrap();

        assert_eq!(summary, ResetSummary { reset: 1, streaks_broken: 0 });

        let updated = storage.load_habit(habit.id).await.unwrap().unwrap();
        assert!(!updated.completed_today);
        assert_eq!(updated.current_streak, 3);
    }

    #[tokio::test]
    async fn fresh_habits_are_untouched() {
        let mut storage = MemoryStorage::new();
        let user = UserId::from("user_1");

        let now = utc(2024, 6, 15, 8);
        let mut habit =
            Habit::new(user.clone(), "Hydrate", Category::Health, Frequency::Daily).unwrap();
        habit.completed_today = true;
        habit.current_streak = 2;
        habit.last_completed_at = Some(now - chrono::Duration::hours(1));
        storage.save_habit(&habit).await.unwrap();

        let summary = run_reset_pass(&mut storage, &user, now).await.unwrap();
        assert_eq!(summary, ResetSummary::default());
    }
}
