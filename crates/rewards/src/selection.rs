//! Species selection for a rolled rarity.

use habitflow_core::{Rarity, TriggerType};
use habitflow_pokedex::{base_form_pool, first_habit_pool, pool_for_rarity, starter_pool};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::RewardConfig;
use crate::trigger::RewardTrigger;

/// Pick a species id for a trigger and its rolled rarity.
///
/// The starter streak draws from the evolvable base-form pool, signup draws
/// from the three classic starters, and the first habit draws from its own
/// small pool. Everything else draws uniformly from the rarity's pool; a
/// shiny is a shiny-flagged draw from the common pool.
pub fn pick_species_id(
    trigger: &RewardTrigger,
    rarity: Rarity,
    config: &RewardConfig,
    rng: &mut impl Rng,
) -> u32 {
    let pool: &[u32] = match trigger.trigger_type {
        TriggerType::Signup => starter_pool(),
        TriggerType::FirstHabit => first_habit_pool(),
        TriggerType::Streak if trigger.is_starter_streak(config) => base_form_pool(),
        _ => pool_for_rarity(rarity),
    };

    *pool
        .choose(rng)
        .unwrap_or(&habitflow_pokedex::FALLBACK_SPECIES_ID)
}

#[cfg(test)]
mod tests {
    use super::*;
    use habitflow_core::HabitId;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    fn rng(seed: u64) -> Xoshiro256PlusPlus {
        Xoshiro256PlusPlus::seed_from_u64(seed)
    }

    #[test]
    fn starter_streak_draws_an_evolvable_base_form() {
        let config = RewardConfig::deterministic();
        let trigger = RewardTrigger::for_habit(TriggerType::Streak, 3, HabitId::new());

        for seed in 0..32 {
            let id = pick_species_id(&trigger, Rarity::Common, &config, &mut rng(seed));
            assert!(base_form_pool().contains(&id));
            assert!(habitflow_pokedex::can_evolve(id), "species {id} must evolve");
        }
    }

    #[test]
    fn signup_draws_a_classic_starter() {
        let config = RewardConfig::deterministic();
        let trigger = RewardTrigger::one_shot(TriggerType::Signup);

        for seed in 0..16 {
            let id = pick_species_id(&trigger, Rarity::Uncommon, &config, &mut rng(seed));
            assert!([1, 4, 7].contains(&id));
        }
    }

    #[test]
    fn first_habit_draws_from_its_own_pool() {
        let config = RewardConfig::deterministic();
        let trigger = RewardTrigger::one_shot(TriggerType::FirstHabit);

        for seed in 0..16 {
            let id = pick_species_id(&trigger, Rarity::Common, &config, &mut rng(seed));
            assert!(first_habit_pool().contains(&id));
        }
    }

    #[test]
    fn shiny_draws_from_the_common_pool() {
        let config = RewardConfig::deterministic();
        let trigger = RewardTrigger::for_habit(TriggerType::Streak, 14, HabitId::new());

        let id = pick_species_id(&trigger, Rarity::Shiny, &config, &mut rng(3));
        assert!(pool_for_rarity(Rarity::Common).contains(&id));
    }

    #[test]
    fn rarity_pools_are_respected() {
        let config = RewardConfig::deterministic();
        let trigger = RewardTrigger::for_habit(TriggerType::Streak, 105, HabitId::new());

        for seed in 0..16 {
            let id = pick_species_id(&trigger, Rarity::Legendary, &config, &mut rng(seed));
            assert!(pool_for_rarity(Rarity::Legendary).contains(&id));
        }
    }
}
