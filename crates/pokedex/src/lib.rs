//! Species data for the reward layer.
//!
//! Static tables (evolution chains, rarity overrides, per-rarity id pools)
//! plus a fetch path: an HTTP client against the external species API with
//! a TTL cache and a hardcoded fallback, so a lookup never fails.

#![warn(missing_docs)]

mod cache;
mod client;
mod species;

pub use cache::{Clock, SpeciesCache, SystemClock};
pub use client::{SpeciesClient, SpeciesClientConfig, SpeciesError, SpeciesProvider, StaticProvider};
pub use species::{
    base_form_pool, base_rarity, can_evolve, chain_for, evolution_requirement_for_stage,
    evolution_stage, fallback_species, first_habit_pool, next_evolution, pool_for_rarity,
    starter_pool, static_species, FALLBACK_SPECIES_ID,
};
