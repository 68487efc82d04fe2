//! User progress - the per-user gamification aggregate.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::id::UserId;
use crate::reward::{Rarity, RewardInstance};
use crate::Time;

/// Title every user starts with.
pub const DEFAULT_TITLE: &str = "Beginner Trainer";

/// An unlocked achievement. Names are unique within a user's list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    /// Unique name, used as the dedup key
    pub name: String,

    /// Human-readable description
    pub description: String,

    /// When it was unlocked
    pub unlocked_at: Time,

    /// Display icon
    pub icon: String,
}

/// Accumulated lifetime statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    /// Total habit completions ever recorded
    pub total_habits_completed: u32,

    /// Longest streak reached on any habit
    pub longest_streak: u32,

    /// Days where every active habit was completed
    pub perfect_days: u32,

    /// Most recent day counted into `perfect_days`, so a day toggled off
    /// and back on is not counted twice
    #[serde(default)]
    pub last_perfect_day: Option<NaiveDate>,

    /// Weeks where every active habit was completed on every required day
    pub perfect_weeks: u32,

    /// Months where every active habit was completed on every required day
    pub perfect_months: u32,
}

/// Per-user gamification aggregate.
///
/// Created lazily on the first gamification-triggering event; mutated by
/// every reward and achievement event; never deleted while the user exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProgress {
    /// Owning user
    pub user_id: UserId,

    /// Level, always recomputed from experience (never incremented)
    pub level: u32,

    /// Cumulative experience, monotonically non-decreasing
    pub experience: u64,

    /// Total rewards granted
    pub total_caught: u32,

    /// Granted rewards, insertion order = chronological
    pub collection: Vec<RewardInstance>,

    /// Unlocked achievements (unique by name)
    pub achievements: Vec<Achievement>,

    /// Currently displayed title
    pub current_title: String,

    /// All unlocked titles
    pub available_titles: Vec<String>,

    /// Lifetime statistics
    pub stats: UserStats,

    /// Creation timestamp
    pub created_at: Time,

    /// Last update timestamp
    pub updated_at: Time,
}

impl UserProgress {
    /// Fresh progress for a user, at level 1 with the default title.
    pub fn new(user_id: UserId) -> Self {
        let now = chrono::Utc::now();
        Self {
            user_id,
            level: 1,
            experience: 0,
            total_caught: 0,
            collection: Vec::new(),
            achievements: Vec::new(),
            current_title: DEFAULT_TITLE.to_string(),
            available_titles: vec![DEFAULT_TITLE.to_string()],
            stats: UserStats::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Append a reward and apply its experience. Returns the new level if
    /// the grant caused a level-up.
    pub fn add_reward(&mut self, instance: RewardInstance, experience: u64) -> Option<u32> {
        self.collection.push(instance);
        self.total_caught += 1;

        let old_level = self.level;
        self.experience += experience;
        self.level = level_for_experience(self.experience);
        self.updated_at = chrono::Utc::now();

        (self.level > old_level).then_some(self.level)
    }

    /// Whether an achievement with this name is already unlocked.
    pub fn has_achievement(&self, name: &str) -> bool {
        self.achievements.iter().any(|a| a.name == name)
    }

    /// Count of owned rewards at a given rarity.
    pub fn rarity_count(&self, rarity: Rarity) -> usize {
        self.collection.iter().filter(|r| r.rarity == rarity).count()
    }
}

/// Experience granted for a reward of the given rarity.
pub fn experience_for_rarity(rarity: Rarity) -> u64 {
    match rarity {
        Rarity::Common => 10,
        Rarity::Uncommon => 25,
        Rarity::Rare => 50,
        Rarity::Epic => 100,
        Rarity::Legendary => 200,
        Rarity::Shiny => 300,
    }
}

/// Level as a monotonic function of experience: floor(sqrt(xp / 50)) + 1.
pub fn level_for_experience(experience: u64) -> u32 {
    ((experience as f64 / 50.0).sqrt().floor() as u32) + 1
}

/// Experience required to reach `level`: (level - 1)^2 * 50.
pub fn required_experience(level: u32) -> u64 {
    let steps = u64::from(level.saturating_sub(1));
    steps * steps * 50
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reward::{Species, TriggerType};

    fn test_species(id: u32) -> Species {
        Species {
            id,
            name: format!("Species {id}"),
            image: String::new(),
            types: vec!["normal".to_string()],
            rarity: Rarity::Common,
            evolution_stage: 1,
            can_evolve: false,
            evolution_requirement: None,
        }
    }

    #[test]
    fn level_zero_experience_is_one() {
        assert_eq!(level_for_experience(0), 1);
    }

    #[test]
    fn level_is_monotonic() {
        let mut previous = 0;
        for xp in (0..20_000).step_by(37) {
            let level = level_for_experience(xp);
            assert!(level >= previous, "level regressed at {xp} xp");
            previous = level;
        }
    }

    #[test]
    fn required_experience_inverts_level() {
        for level in 1..50 {
            assert_eq!(level_for_experience(required_experience(level)), level);
        }
    }

    #[test]
    fn add_reward_increments_total_and_collection_once() {
        let mut progress = UserProgress::new(UserId::from("user_1"));
        let instance = RewardInstance::from_species(
            UserId::from("user_1"),
            &test_species(129),
            Rarity::Common,
            TriggerType::Completion,
            1,
            None,
            chrono::Utc::now(),
        );

        progress.add_reward(instance, experience_for_rarity(Rarity::Common));

        assert_eq!(progress.total_caught, 1);
        assert_eq!(progress.collection.len(), 1);
        assert_eq!(progress.experience, 10);
    }

    #[test]
    fn add_reward_reports_level_up() {
        let mut progress = UserProgress::new(UserId::from("user_1"));
        // 50 xp is the level-2 threshold.
        let instance = RewardInstance::from_species(
            UserId::from("user_1"),
            &test_species(3),
            Rarity::Rare,
            TriggerType::Milestone,
            10,
            None,
            chrono::Utc::now(),
        );

        let new_level = progress.add_reward(instance, 50);
        assert_eq!(new_level, Some(2));
        assert_eq!(progress.level, 2);
    }
}
