//! In-memory storage backend, for tests and ephemeral sessions.

use std::collections::HashMap;

use chrono::NaiveDate;
use habitflow_core::{FocusSession, Habit, HabitCompletion, HabitId, UserId, UserProgress};

use super::{Result, Storage};

/// HashMap-backed storage with no persistence.
#[derive(Default)]
pub struct MemoryStorage {
    habits: HashMap<HabitId, Habit>,
    completions: HashMap<(HabitId, NaiveDate), HabitCompletion>,
    progress: HashMap<UserId, UserProgress>,
    sessions: Vec<FocusSession>,
}

impl MemoryStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl Storage for MemoryStorage {
    async fn save_habit(&mut self, habit: &Habit) -> Result<()> {
        self.habits.insert(habit.id, habit.clone());
        Ok(())
    }

    async fn load_habit(&self, id: HabitId) -> Result<Option<Habit>> {
        Ok(self.habits.get(&id).cloned())
    }

    async fn list_habits(&self, user_id: &UserId, active_only: bool) -> Result<Vec<Habit>> {
        Ok(self
            .habits
            .values()
            .filter(|h| h.user_id == *user_id && (!active_only || h.is_active))
            .cloned()
            .collect())
    }

    async fn delete_habit(&mut self, id: HabitId) -> Result<()> {
        self.habits.remove(&id);
        Ok(())
    }

    async fn save_completion(&mut self, completion: &HabitCompletion) -> Result<()> {
        self.completions
            .insert((completion.habit_id, completion.date), completion.clone());
        Ok(())
    }

    async fn find_completion(
        &self,
        habit_id: HabitId,
        date: NaiveDate,
    ) -> Result<Option<HabitCompletion>> {
        Ok(self.completions.get(&(habit_id, date)).cloned())
    }

    async fn delete_completion(&mut self, habit_id: HabitId, date: NaiveDate) -> Result<()> {
        self.completions.remove(&(habit_id, date));
        Ok(())
    }

    async fn list_completions(&self, habit_id: HabitId) -> Result<Vec<HabitCompletion>> {
        let mut completions: Vec<_> = self
            .completions
            .values()
            .filter(|c| c.habit_id == habit_id)
            .cloned()
            .collect();
        completions.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(completions)
    }

    async fn load_progress(&self, user_id: &UserId) -> Result<Option<UserProgress>> {
        Ok(self.progress.get(user_id).cloned())
    }

    async fn save_progress(&mut self, progress: &UserProgress) -> Result<()> {
        self.progress
            .insert(progress.user_id.clone(), progress.clone());
        Ok(())
    }

    async fn save_session(&mut self, session: &FocusSession) -> Result<()> {
        self.sessions.push(session.clone());
        Ok(())
    }

    async fn list_sessions(&self, user_id: &UserId) -> Result<Vec<FocusSession>> {
        let mut sessions: Vec<_> = self
            .sessions
            .iter()
            .filter(|s| s.user_id == *user_id)
            .cloned()
            .collect();
        sessions.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        Ok(sessions)
    }
}
