//! Title-set recomputation.

use habitflow_core::{UserProgress, DEFAULT_TITLE};

/// Recompute the full set of available titles from the aggregate.
///
/// The set is rebuilt from scratch on every call rather than patched, so a
/// stale list self-heals. The current title is kept if still earned,
/// otherwise it falls back to the default. Returns the titles that are new
/// relative to the previous set.
pub fn recompute_titles(progress: &mut UserProgress) -> Vec<String> {
    let mut titles = vec![DEFAULT_TITLE.to_string()];

    if progress.level >= 10 {
        titles.push("Experienced Trainer".to_string());
    }
    if progress.level >= 25 {
        titles.push("Expert Trainer".to_string());
    }
    if progress.level >= 50 {
        titles.push("Elite Trainer".to_string());
    }
    if progress.level >= 100 {
        titles.push("Champion".to_string());
    }

    if progress.total_caught >= 50 {
        titles.push("Pokemon Master".to_string());
    }
    if progress.total_caught >= 100 {
        titles.push("Pokedex Completionist".to_string());
    }

    if progress.has_achievement("Legend Seeker") {
        titles.push("Legend Whisperer".to_string());
    }
    if progress.has_achievement("Shiny Hunter") {
        titles.push("Shiny Specialist".to_string());
    }

    if progress.stats.longest_streak >= 100 {
        titles.push("Habit Grandmaster".to_string());
    }

    let gained: Vec<String> = titles
        .iter()
        .filter(|t| !progress.available_titles.contains(t))
        .cloned()
        .collect();

    progress.available_titles = titles;
    if !progress.available_titles.contains(&progress.current_title) {
        progress.current_title = DEFAULT_TITLE.to_string();
    }

    gained
}
