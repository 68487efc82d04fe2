//! Condition evaluation against the user aggregate.

use std::collections::HashSet;

use habitflow_core::{Rarity, Time, UserProgress};
use tracing::info;

use crate::catalog::{achievement, names, CATALOG};

/// Evaluate every state-derived achievement condition and unlock the ones
/// that newly hold. Returns the names unlocked by this call.
///
/// One-shot achievements tied to events rather than state (Welcome Trainer!,
/// First Step) are granted by the caller at the event site and skipped here.
pub fn evaluate_achievements(progress: &mut UserProgress, now: Time) -> Vec<String> {
    let owned: HashSet<&str> = progress.achievements.iter().map(|a| a.name.as_str()).collect();
    let mut unlocked = Vec::new();

    for def in CATALOG {
        if owned.contains(def.name) {
            continue;
        }
        if condition_holds(def.name, progress) {
            unlocked.push(def.name.to_string());
        }
    }

    for name in &unlocked {
        if let Some(entry) = achievement(name, now) {
            info!(user = %progress.user_id, achievement = %name, "achievement unlocked");
            progress.achievements.push(entry);
        }
    }
    if !unlocked.is_empty() {
        progress.updated_at = now;
    }

    unlocked
}

fn condition_holds(name: &str, progress: &UserProgress) -> bool {
    let caught = progress.total_caught;
    let streak = progress.stats.longest_streak;

    match name {
        names::FIRST_CATCH => caught >= 1,
        names::COLLECTOR => caught >= 10,
        names::TRAINER => caught >= 25,
        names::POKEMON_MASTER => caught >= 50,
        names::LEGENDARY_TRAINER => caught >= 100,
        names::WEEK_WARRIOR => streak >= 7,
        names::MONTH_MASTER => streak >= 30,
        names::STREAK_LEGEND => streak >= 100,
        names::RARE_HUNTER => progress.rarity_count(Rarity::Rare) >= 1,
        names::EPIC_COLLECTOR => progress.rarity_count(Rarity::Epic) >= 1,
        names::LEGEND_SEEKER => progress.rarity_count(Rarity::Legendary) >= 1,
        names::SHINY_HUNTER => progress.rarity_count(Rarity::Shiny) >= 1,
        // Event-granted, never state-derived.
        names::WELCOME_TRAINER | names::FIRST_STEP => false,
        _ => false,
    }
}
