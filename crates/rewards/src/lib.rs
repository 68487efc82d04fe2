//! Reward engine: trigger enumeration, rarity rolls, species selection.
//!
//! Every probabilistic branch takes an injected random source so callers
//! (and tests) control the dice.

#![warn(missing_docs)]

mod config;
mod duplicates;
mod evolution;
mod rarity;
mod selection;
mod trigger;

pub use config::RewardConfig;
pub use duplicates::{duplicate_blocked, owned_reward_keys};
pub use evolution::{apply_focus_progress, ready_to_evolve, session_qualifies};
pub use rarity::determine_rarity;
pub use selection::pick_species_id;
pub use trigger::{enumerate_triggers, RewardTrigger};
