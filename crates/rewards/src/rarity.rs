//! Rarity rolls.

use habitflow_core::{Rarity, TriggerType};
use rand::Rng;

use crate::config::RewardConfig;
use crate::trigger::RewardTrigger;

/// Roll the rarity for a trigger.
///
/// The shiny upgrade is rolled first and overrides everything. The starter
/// streak is pinned to common so the guaranteed evolvable grant stays a base
/// form. All other triggers map value onto a rarity ladder, some with an
/// extra upgrade roll.
pub fn determine_rarity(
    trigger: &RewardTrigger,
    config: &RewardConfig,
    rng: &mut impl Rng,
) -> Rarity {
    if rng.gen_bool(config.shiny_chance) {
        return Rarity::Shiny;
    }

    match trigger.trigger_type {
        TriggerType::Streak => {
            if trigger.is_starter_streak(config) {
                Rarity::Common
            } else {
                streak_rarity(trigger.value)
            }
        }
        TriggerType::Milestone => milestone_rarity(trigger.value),
        TriggerType::PerfectWeek => {
            if rng.gen_bool(config.perfect_week_epic_chance) {
                Rarity::Epic
            } else {
                Rarity::Rare
            }
        }
        TriggerType::PerfectMonth => {
            if rng.gen_bool(config.perfect_month_legendary_chance) {
                Rarity::Legendary
            } else {
                Rarity::Epic
            }
        }
        TriggerType::Completion => Rarity::Common,
        TriggerType::Evolution => Rarity::Uncommon,
        TriggerType::Signup => Rarity::Uncommon,
        TriggerType::FirstHabit => Rarity::Uncommon,
    }
}

fn streak_rarity(streak: u32) -> Rarity {
    if streak >= 100 {
        Rarity::Legendary
    } else if streak >= 50 {
        Rarity::Epic
    } else if streak >= 30 {
        Rarity::Rare
    } else if streak >= 10 {
        Rarity::Uncommon
    } else {
        Rarity::Common
    }
}

fn milestone_rarity(count: u32) -> Rarity {
    if count >= 1000 {
        Rarity::Legendary
    } else if count >= 500 {
        Rarity::Epic
    } else if count >= 100 {
        Rarity::Rare
    } else if count >= 50 {
        Rarity::Uncommon
    } else {
        Rarity::Common
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use habitflow_core::HabitId;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    fn rng() -> Xoshiro256PlusPlus {
        Xoshiro256PlusPlus::seed_from_u64(42)
    }

    fn streak(value: u32) -> RewardTrigger {
        RewardTrigger::for_habit(TriggerType::Streak, value, HabitId::new())
    }

    fn milestone(value: u32) -> RewardTrigger {
        RewardTrigger::for_habit(TriggerType::Milestone, value, HabitId::new())
    }

    #[test]
    fn starter_streak_is_pinned_common() {
        let config = RewardConfig::deterministic();
        assert_eq!(determine_rarity(&streak(3), &config, &mut rng()), Rarity::Common);
    }

    #[test]
    fn streak_ladder() {
        let config = RewardConfig::deterministic();
        let mut rng = rng();
        assert_eq!(determine_rarity(&streak(7), &config, &mut rng), Rarity::Common);
        assert_eq!(determine_rarity(&streak(14), &config, &mut rng), Rarity::Uncommon);
        assert_eq!(determine_rarity(&streak(35), &config, &mut rng), Rarity::Rare);
        assert_eq!(determine_rarity(&streak(56), &config, &mut rng), Rarity::Epic);
        assert_eq!(determine_rarity(&streak(105), &config, &mut rng), Rarity::Legendary);
    }

    #[test]
    fn milestone_ladder() {
        let config = RewardConfig::deterministic();
        let mut rng = rng();
        assert_eq!(determine_rarity(&milestone(10), &config, &mut rng), Rarity::Common);
        assert_eq!(determine_rarity(&milestone(50), &config, &mut rng), Rarity::Uncommon);
        assert_eq!(determine_rarity(&milestone(100), &config, &mut rng), Rarity::Rare);
        assert_eq!(determine_rarity(&milestone(500), &config, &mut rng), Rarity::Epic);
        assert_eq!(determine_rarity(&milestone(1000), &config, &mut rng), Rarity::Legendary);
    }

    #[test]
    fn shiny_roll_overrides_everything() {
        let mut config = RewardConfig::deterministic();
        config.shiny_chance = 1.0;
        assert_eq!(determine_rarity(&streak(3), &config, &mut rng()), Rarity::Shiny);
        assert_eq!(determine_rarity(&milestone(1000), &config, &mut rng()), Rarity::Shiny);
    }

    #[test]
    fn perfect_period_upgrades() {
        let mut config = RewardConfig::deterministic();
        let week = RewardTrigger::one_shot(TriggerType::PerfectWeek);
        let month = RewardTrigger::one_shot(TriggerType::PerfectMonth);

        assert_eq!(determine_rarity(&week, &config, &mut rng()), Rarity::Rare);
        assert_eq!(determine_rarity(&month, &config, &mut rng()), Rarity::Epic);

        config.perfect_week_epic_chance = 1.0;
        config.perfect_month_legendary_chance = 1.0;
        assert_eq!(determine_rarity(&week, &config, &mut rng()), Rarity::Epic);
        assert_eq!(determine_rarity(&month, &config, &mut rng()), Rarity::Legendary);
    }

    #[test]
    fn one_shot_and_encounter_tiers() {
        let config = RewardConfig::deterministic();
        let mut rng = rng();

        let signup = RewardTrigger::one_shot(TriggerType::Signup);
        assert_eq!(determine_rarity(&signup, &config, &mut rng), Rarity::Uncommon);

        let first = RewardTrigger::one_shot(TriggerType::FirstHabit);
        assert_eq!(determine_rarity(&first, &config, &mut rng), Rarity::Uncommon);

        let encounter =
            RewardTrigger::for_habit(TriggerType::Completion, 1, HabitId::new());
        assert_eq!(determine_rarity(&encounter, &config, &mut rng), Rarity::Common);

        let evolution = RewardTrigger::evolution(4);
        assert_eq!(determine_rarity(&evolution, &config, &mut rng), Rarity::Uncommon);
    }
}
