//! Reward-engine tuning knobs.

use serde::{Deserialize, Serialize};

/// Probabilities and thresholds for the reward engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardConfig {
    /// Chance of a random-encounter reward on a daily completion
    pub completion_chance: f64,

    /// Independent chance of upgrading any grant to shiny
    pub shiny_chance: f64,

    /// Streak length that grants the guaranteed evolvable starter
    pub starter_streak: u32,

    /// Streak interval for recurring rewards beyond the starter
    pub streak_interval: u32,

    /// Lifetime completion counts that fire milestone rewards.
    /// Matched by equality, not `>=`: a count that jumps past a milestone
    /// never fires it retroactively.
    pub milestones: Vec<u32>,

    /// Chance a perfect week upgrades from rare to epic
    pub perfect_week_epic_chance: f64,

    /// Chance a perfect month upgrades from epic to legendary
    pub perfect_month_legendary_chance: f64,

    /// Minimum work-session length (minutes) that counts toward evolution
    pub min_focus_minutes: u32,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            completion_chance: 0.1,
            shiny_chance: 0.01,
            starter_streak: 3,
            streak_interval: 7,
            milestones: vec![10, 25, 50, 100, 250, 500, 1000],
            perfect_week_epic_chance: 0.2,
            perfect_month_legendary_chance: 0.3,
            min_focus_minutes: 20,
        }
    }
}

impl RewardConfig {
    /// Config with all random upgrades disabled, for deterministic tests.
    pub fn deterministic() -> Self {
        Self {
            completion_chance: 0.0,
            shiny_chance: 0.0,
            perfect_week_epic_chance: 0.0,
            perfect_month_legendary_chance: 0.0,
            ..Self::default()
        }
    }
}
