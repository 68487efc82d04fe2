//! JSON file storage implementation.
//!
//! Stores each entity as a JSON file under a root directory (habits/,
//! completions/, progress/, sessions/). Completion files are keyed by
//! `{habit_id}_{date}` so the per-day uniqueness invariant falls out of
//! the file layout.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use habitflow_core::{FocusSession, Habit, HabitCompletion, HabitId, UserId, UserProgress};
use tokio::fs;
use tracing::debug;

use super::{Result, Storage, StorageError};

/// File-based JSON storage backend.
pub struct JsonStorage {
    root: PathBuf,
}

impl JsonStorage {
    /// Create storage rooted at `root`, creating the subdirectories needed.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();

        fs::create_dir_all(root.join("habits")).await?;
        fs::create_dir_all(root.join("completions")).await?;
        fs::create_dir_all(root.join("progress")).await?;
        fs::create_dir_all(root.join("sessions")).await?;

        Ok(Self { root })
    }

    fn habit_path(&self, id: HabitId) -> PathBuf {
        self.root.join("habits").join(format!("{}.json", id))
    }

    fn completion_path(&self, habit_id: HabitId, date: NaiveDate) -> PathBuf {
        self.root
            .join("completions")
            .join(format!("{}_{}.json", habit_id, date))
    }

    fn progress_path(&self, user_id: &UserId) -> PathBuf {
        self.root.join("progress").join(format!("{}.json", user_id))
    }

    fn session_path(&self, session: &FocusSession) -> PathBuf {
        self.root.join("sessions").join(format!("{}.json", session.id))
    }
}

#[async_trait::async_trait]
impl Storage for JsonStorage {
    async fn save_habit(&mut self, habit: &Habit) -> Result<()> {
        debug!(habit = %habit.id, "saving habit");
        write_json(&self.habit_path(habit.id), habit).await
    }

    async fn load_habit(&self, id: HabitId) -> Result<Option<Habit>> {
        read_json(&self.habit_path(id)).await
    }

    async fn list_habits(&self, user_id: &UserId, active_only: bool) -> Result<Vec<Habit>> {
        let all: Vec<Habit> = list_dir(&self.root.join("habits")).await?;
        Ok(all
            .into_iter()
            .filter(|h| h.user_id == *user_id && (!active_only || h.is_active))
            .collect())
    }

    async fn delete_habit(&mut self, id: HabitId) -> Result<()> {
        debug!(habit = %id, "deleting habit");
        remove_if_exists(&self.habit_path(id)).await
    }

    async fn save_completion(&mut self, completion: &HabitCompletion) -> Result<()> {
        debug!(habit = %completion.habit_id, date = %completion.date, "saving completion");
        write_json(
            &self.completion_path(completion.habit_id, completion.date),
            completion,
        )
        .await
    }

    async fn find_completion(
        &self,
        habit_id: HabitId,
        date: NaiveDate,
    ) -> Result<Option<HabitCompletion>> {
        read_json(&self.completion_path(habit_id, date)).await
    }

    async fn delete_completion(&mut self, habit_id: HabitId, date: NaiveDate) -> Result<()> {
        debug!(habit = %habit_id, %date, "deleting completion");
        remove_if_exists(&self.completion_path(habit_id, date)).await
    }

    async fn list_completions(&self, habit_id: HabitId) -> Result<Vec<HabitCompletion>> {
        let all: Vec<HabitCompletion> = list_dir(&self.root.join("completions")).await?;
        let mut completions: Vec<_> = all
            .into_iter()
            .filter(|c| c.habit_id == habit_id)
            .collect();
        completions.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(completions)
    }

    async fn load_progress(&self, user_id: &UserId) -> Result<Option<UserProgress>> {
        read_json(&self.progress_path(user_id)).await
    }

    async fn save_progress(&mut self, progress: &UserProgress) -> Result<()> {
        debug!(user = %progress.user_id, "saving progress");
        write_json(&self.progress_path(&progress.user_id), progress).await
    }

    async fn save_session(&mut self, session: &FocusSession) -> Result<()> {
        debug!(session = %session.id, "saving session");
        write_json(&self.session_path(session), session).await
    }

    async fn list_sessions(&self, user_id: &UserId) -> Result<Vec<FocusSession>> {
        let all: Vec<FocusSession> = list_dir(&self.root.join("sessions")).await?;
        let mut sessions: Vec<_> = all
            .into_iter()
            .filter(|s| s.user_id == *user_id)
            .collect();
        sessions.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        Ok(sessions)
    }
}

async fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json.as_bytes()).await?;
    Ok(())
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match fs::read_to_string(path).await {
        Ok(json) => {
            let value = serde_json::from_str(&json)?;
            Ok(Some(value))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

async fn remove_if_exists(path: &Path) -> Result<()> {
    fs::remove_file(path).await.or_else(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Ok(())
        } else {
            Err(e)
        }
    })?;
    Ok(())
}

async fn list_dir<T: serde::de::DeserializeOwned>(dir: &Path) -> Result<Vec<T>> {
    let mut items = Vec::new();
    let mut rd = fs::read_dir(dir).await?;
    while let Some(entry) = rd.next_entry().await? {
        if entry.path().extension().and_then(|s| s.to_str()) != Some("json") {
            continue;
        }
        if let Ok(Some(item)) = read_json(&entry.path()).await {
            items.push(item);
        }
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use habitflow_core::{Category, Frequency, SessionKind};

    #[tokio::test]
    async fn habit_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = JsonStorage::new(dir.path()).await.unwrap();

        let habit = Habit::new(
            UserId::from("user_1"),
            "Stretch",
            Category::Fitness,
            Frequency::Daily,
        )
        .unwrap();
        storage.save_habit(&habit).await.unwrap();

        let loaded = storage.load_habit(habit.id).await.unwrap().unwrap();
        assert_eq!(loaded.name, "Stretch");
        assert_eq!(loaded.user_id, habit.user_id);

        let listed = storage
            .list_habits(&UserId::from("user_1"), true)
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);
    }

    #[tokio::test]
    async fn completion_is_unique_per_habit_and_day() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = JsonStorage::new(dir.path()).await.unwrap();

        let habit_id = HabitId::new();
        let user = UserId::from("user_1");
        let now = chrono::Utc::now();

        let first = HabitCompletion::new(habit_id, user.clone(), now);
        let second = HabitCompletion::new(habit_id, user.clone(), now);
        storage.save_completion(&first).await.unwrap();
        storage.save_completion(&second).await.unwrap();

        let listed = storage.list_completions(habit_id).await.unwrap();
        assert_eq!(listed.len(), 1, "same-day completions must collapse to one");

        let found = storage
            .find_completion(habit_id, now.date_naive())
            .await
            .unwrap();
        assert_eq!(found.unwrap().id, second.id);
    }

    #[tokio::test]
    async fn delete_completion_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = JsonStorage::new(dir.path()).await.unwrap();

        let habit_id = HabitId::new();
        let date = chrono::Utc::now().date_naive();
        storage.delete_completion(habit_id, date).await.unwrap();
        storage.delete_completion(habit_id, date).await.unwrap();
    }

    #[tokio::test]
    async fn progress_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = JsonStorage::new(dir.path()).await.unwrap();

        let user = UserId::from("user_1");
        assert!(storage.load_progress(&user).await.unwrap().is_none());

        let progress = UserProgress::new(user.clone());
        storage.save_progress(&progress).await.unwrap();

        let loaded = storage.load_progress(&user).await.unwrap().unwrap();
        assert_eq!(loaded.level, 1);
        assert_eq!(loaded.current_title, habitflow_core::DEFAULT_TITLE);
    }

    #[tokio::test]
    async fn sessions_list_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = JsonStorage::new(dir.path()).await.unwrap();

        let user = UserId::from("user_1");
        let earlier = chrono::Utc::now() - chrono::Duration::hours(2);
        let later = chrono::Utc::now();

        storage
            .save_session(&FocusSession::new(user.clone(), SessionKind::Work, 25, earlier))
            .await
            .unwrap();
        storage
            .save_session(&FocusSession::new(user.clone(), SessionKind::Work, 25, later))
            .await
            .unwrap();

        let sessions = storage.list_sessions(&user).await.unwrap();
        assert_eq!(sessions.len(), 2);
        assert!(sessions[0].completed_at >= sessions[1].completed_at);
    }
}
