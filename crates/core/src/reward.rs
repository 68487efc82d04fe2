//! Reward model - collectible creatures granted by the gamification layer.

use serde::{Deserialize, Serialize};

use crate::id::{HabitId, RewardId, UserId};
use crate::Time;

/// Ordered reward-quality tiers, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    /// Baseline tier
    Common,
    /// Slightly special
    Uncommon,
    /// Rare
    Rare,
    /// Epic
    Epic,
    /// Legendary
    Legendary,
    /// Shiny variant, the top tier
    Shiny,
}

impl std::fmt::Display for Rarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Common => write!(f, "common"),
            Self::Uncommon => write!(f, "uncommon"),
            Self::Rare => write!(f, "rare"),
            Self::Epic => write!(f, "epic"),
            Self::Legendary => write!(f, "legendary"),
            Self::Shiny => write!(f, "shiny"),
        }
    }
}

/// The condition that produced a reward grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerType {
    /// Streak length reached
    Streak,
    /// Random encounter on a daily completion
    Completion,
    /// Lifetime completion-count milestone
    Milestone,
    /// Every active habit completed in a week
    PerfectWeek,
    /// Every active habit completed in a month
    PerfectMonth,
    /// Evolution via accumulated focus sessions
    Evolution,
    /// One-time signup welcome gift
    Signup,
    /// One-time first-habit gift
    FirstHabit,
}

/// A species' evolution line, stage 1 through an optional stage 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionChain {
    /// Base form
    pub stage1: u32,
    /// First evolution
    pub stage2: Option<u32>,
    /// Second evolution
    pub stage3: Option<u32>,
}

/// Display data for a creature species, as fetched from the external source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Species {
    /// Species identifier in the external dataset
    pub id: u32,

    /// Display name
    pub name: String,

    /// Artwork URL
    pub image: String,

    /// Elemental types
    pub types: Vec<String>,

    /// Base rarity tier
    pub rarity: Rarity,

    /// Evolution stage (1-3)
    pub evolution_stage: u8,

    /// Whether this species has a next evolution stage
    pub can_evolve: bool,

    /// Focus sessions needed to evolve, if evolvable
    pub evolution_requirement: Option<u32>,
}

/// Progress toward evolving a reward via focus sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionRequirement {
    /// Qualifying sessions needed
    pub amount: u32,

    /// Qualifying sessions accumulated so far
    pub completed: u32,
}

impl EvolutionRequirement {
    /// Sessions needed for a stage 1 -> 2 evolution.
    pub const STAGE_ONE_AMOUNT: u32 = 5;

    /// Sessions needed for a stage 2 -> 3 evolution.
    pub const STAGE_TWO_AMOUNT: u32 = 10;

    /// A fresh requirement with nothing accumulated.
    pub fn new(amount: u32) -> Self {
        Self { amount, completed: 0 }
    }

    /// Whether enough sessions have accumulated to evolve.
    pub fn is_met(&self) -> bool {
        self.completed >= self.amount
    }
}

/// An immutable record of a granted reward.
///
/// Appended to a user's collection, never removed; only the viewed flag and
/// evolution progress are mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardInstance {
    /// Unique identifier
    pub id: RewardId,

    /// Owning user
    pub user_id: UserId,

    /// Species identifier
    pub species_id: u32,

    /// Species display name
    pub species_name: String,

    /// Artwork URL
    pub species_image: String,

    /// Elemental types
    pub species_types: Vec<String>,

    /// When the reward was granted
    pub unlocked_at: Time,

    /// What produced this grant
    pub trigger_type: TriggerType,

    /// Trigger magnitude (streak length, milestone count, ...)
    pub trigger_value: u32,

    /// Habit that produced the grant, if any
    pub habit_id: Option<HabitId>,

    /// Final rarity tier (after any shiny upgrade)
    pub rarity: Rarity,

    /// Whether the user has seen this reward yet
    pub is_viewed: bool,

    /// Evolution stage (1-3)
    pub evolution_stage: u8,

    /// Whether this instance can still evolve
    pub can_evolve: bool,

    /// Evolution progress, present iff evolvable
    pub evolution_requirement: Option<EvolutionRequirement>,

    /// Species this instance evolved from, if it was minted by an evolution
    pub parent_species_id: Option<u32>,
}

impl RewardInstance {
    /// Build an instance from fetched species data and the trigger that fired.
    pub fn from_species(
        user_id: UserId,
        species: &Species,
        rarity: Rarity,
        trigger_type: TriggerType,
        trigger_value: u32,
        habit_id: Option<HabitId>,
        at: Time,
    ) -> Self {
        Self {
            id: RewardId::new(),
            user_id,
            species_id: species.id,
            species_name: species.name.clone(),
            species_image: species.image.clone(),
            species_types: species.types.clone(),
            unlocked_at: at,
            trigger_type,
            trigger_value,
            habit_id,
            rarity,
            is_viewed: false,
            evolution_stage: species.evolution_stage,
            can_evolve: species.can_evolve,
            evolution_requirement: species
                .can_evolve
                .then(|| EvolutionRequirement::new(
                    species
                        .evolution_requirement
                        .unwrap_or(EvolutionRequirement::STAGE_ONE_AMOUNT),
                )),
            parent_species_id: None,
        }
    }
}
