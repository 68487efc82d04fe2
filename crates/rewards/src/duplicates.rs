//! Duplicate suppression for one-shot grants.

use std::collections::HashSet;

use habitflow_core::{TriggerType, UserProgress};

/// Keys of every reward the user already owns.
pub fn owned_reward_keys(progress: &UserProgress) -> HashSet<(u32, TriggerType)> {
    progress
        .collection
        .iter()
        .map(|r| (r.species_id, r.trigger_type))
        .collect()
}

/// Whether a pending grant must be suppressed as a duplicate.
///
/// Only the one-shot triggers (signup, first habit) dedupe; a repeat streak
/// or milestone grant of a species the user already owns goes through,
/// matching how physical card packs repeat.
pub fn duplicate_blocked(
    owned: &HashSet<(u32, TriggerType)>,
    species_id: u32,
    trigger_type: TriggerType,
) -> bool {
    matches!(trigger_type, TriggerType::Signup | TriggerType::FirstHabit)
        && owned.contains(&(species_id, trigger_type))
}
