//! Focus-session evolution progress.

use habitflow_core::{RewardInstance, SessionKind, UserProgress};
use tracing::debug;

use crate::config::RewardConfig;

/// Whether a focus session counts toward evolution progress.
pub fn session_qualifies(kind: SessionKind, duration_minutes: u32, config: &RewardConfig) -> bool {
    kind == SessionKind::Work && duration_minutes >= config.min_focus_minutes
}

/// Credit one qualifying session to every evolvable reward in the collection.
/// Returns how many instances were credited.
pub fn apply_focus_progress(progress: &mut UserProgress) -> usize {
    let mut credited = 0;
    for reward in &mut progress.collection {
        if !reward.can_evolve {
            continue;
        }
        if let Some(requirement) = reward.evolution_requirement.as_mut() {
            requirement.completed += 1;
            credited += 1;
            debug!(
                species = reward.species_id,
                completed = requirement.completed,
                needed = requirement.amount,
                "evolution progress"
            );
        }
    }
    credited
}

/// Indices of rewards whose evolution requirement is now met.
pub fn ready_to_evolve(progress: &UserProgress) -> Vec<usize> {
    progress
        .collection
        .iter()
        .enumerate()
        .filter(|(_, r)| r.can_evolve && requirement_met(r))
        .map(|(i, _)| i)
        .collect()
}

fn requirement_met(reward: &RewardInstance) -> bool {
    reward
        .evolution_requirement
        .map(|req| req.is_met())
        .unwrap_or(false)
}
