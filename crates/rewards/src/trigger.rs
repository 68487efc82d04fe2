//! Trigger enumeration for a completion event.

use habitflow_core::{Frequency, Habit, HabitId, TriggerType};
use rand::Rng;

use crate::config::RewardConfig;

/// A condition that fired and should produce a reward grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewardTrigger {
    /// What kind of condition fired
    pub trigger_type: TriggerType,

    /// Magnitude (streak length, milestone count, 1 for one-shot grants)
    pub value: u32,

    /// Habit that produced the trigger, when habit-scoped
    pub habit_id: Option<HabitId>,

    /// Species being evolved, for evolution triggers
    pub species_id: Option<u32>,
}

impl RewardTrigger {
    /// Trigger scoped to a habit.
    pub fn for_habit(trigger_type: TriggerType, value: u32, habit_id: HabitId) -> Self {
        Self {
            trigger_type,
            value,
            habit_id: Some(habit_id),
            species_id: None,
        }
    }

    /// One-shot trigger with no habit scope (signup, first habit).
    pub fn one_shot(trigger_type: TriggerType) -> Self {
        Self {
            trigger_type,
            value: 1,
            habit_id: None,
            species_id: None,
        }
    }

    /// Evolution trigger for a species.
    pub fn evolution(species_id: u32) -> Self {
        Self {
            trigger_type: TriggerType::Evolution,
            value: 1,
            habit_id: None,
            species_id: Some(species_id),
        }
    }

    /// Whether this is the guaranteed evolvable-starter streak trigger.
    pub fn is_starter_streak(&self, config: &RewardConfig) -> bool {
        self.trigger_type == TriggerType::Streak && self.value == config.starter_streak
    }
}

/// Enumerate the triggers fired by a completion, given the habit's
/// already-updated counters.
pub fn enumerate_triggers(
    habit: &Habit,
    config: &RewardConfig,
    rng: &mut impl Rng,
) -> Vec<RewardTrigger> {
    let mut triggers = Vec::new();

    // Random encounter on daily completions.
    if habit.frequency == Frequency::Daily && rng.gen_bool(config.completion_chance) {
        triggers.push(RewardTrigger::for_habit(TriggerType::Completion, 1, habit.id));
    }

    // The starter streak grants a guaranteed evolvable base form.
    if habit.current_streak == config.starter_streak {
        triggers.push(RewardTrigger::for_habit(
            TriggerType::Streak,
            config.starter_streak,
            habit.id,
        ));
    }

    // Recurring streak rewards past the starter.
    if habit.current_streak > config.starter_streak
        && habit.current_streak % config.streak_interval == 0
    {
        triggers.push(RewardTrigger::for_habit(
            TriggerType::Streak,
            habit.current_streak,
            habit.id,
        ));
    }

    // Milestones match by equality only.
    if config.milestones.contains(&habit.completed_count) {
        triggers.push(RewardTrigger::for_habit(
            TriggerType::Milestone,
            habit.completed_count,
            habit.id,
        ));
    }

    triggers
}
