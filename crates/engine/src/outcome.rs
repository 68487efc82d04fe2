//! Outcome types returned by the engine.
//!
//! Completion handling is two-phase: the primary record of what happened to
//! the habit, and a gamification result that may have failed independently.

use habitflow_core::RewardInstance;

use crate::error::EngineError;

/// What happened to the habit itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionRecord {
    /// True if the habit is now completed for the day, false if the toggle
    /// removed an existing completion
    pub completed: bool,

    /// The habit's streak after the operation
    pub current_streak: u32,
}

/// Everything the gamification pipeline granted for one event.
#[derive(Debug, Default)]
pub struct GrantBatch {
    /// Rewards minted, in grant order
    pub rewards: Vec<RewardInstance>,

    /// Achievement names newly unlocked
    pub achievements: Vec<String>,

    /// Titles newly available
    pub titles: Vec<String>,

    /// New level, if the batch caused a level-up
    pub level_up: Option<u32>,
}

impl GrantBatch {
    /// True if nothing was granted.
    pub fn is_empty(&self) -> bool {
        self.rewards.is_empty()
            && self.achievements.is_empty()
            && self.titles.is_empty()
            && self.level_up.is_none()
    }
}

/// Result of handling a completion toggle.
#[derive(Debug)]
pub struct CompletionOutcome {
    /// The habit-side record; always present when the call returns `Ok`
    pub primary: CompletionRecord,

    /// The gamification side, which can fail without failing the primary
    pub gamification: Result<GrantBatch, EngineError>,
}

/// Result of recording a focus session.
#[derive(Debug)]
pub struct FocusOutcome {
    /// Whether the session counted toward evolution progress
    pub qualified: bool,

    /// The gamification side (evolutions and follow-on achievements)
    pub gamification: Result<GrantBatch, EngineError>,
}
