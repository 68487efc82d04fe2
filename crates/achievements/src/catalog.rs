//! The fixed achievement catalog.

use habitflow_core::{Achievement, Time};

/// Well-known achievement names. Names are the dedup keys, so they are
/// defined once here and referenced everywhere else.
pub mod names {
    /// First reward ever granted
    pub const FIRST_CATCH: &str = "First Catch";
    /// 10 rewards collected
    pub const COLLECTOR: &str = "Collector";
    /// 25 rewards collected
    pub const TRAINER: &str = "Trainer";
    /// 50 rewards collected
    pub const POKEMON_MASTER: &str = "Pokemon Master";
    /// 100 rewards collected
    pub const LEGENDARY_TRAINER: &str = "Legendary Trainer";
    /// 7-day streak
    pub const WEEK_WARRIOR: &str = "Week Warrior";
    /// 30-day streak
    pub const MONTH_MASTER: &str = "Month Master";
    /// 100-day streak
    pub const STREAK_LEGEND: &str = "Streak Legend";
    /// First rare reward
    pub const RARE_HUNTER: &str = "Rare Hunter";
    /// First epic reward
    pub const EPIC_COLLECTOR: &str = "Epic Collector";
    /// First legendary reward
    pub const LEGEND_SEEKER: &str = "Legend Seeker";
    /// First shiny reward
    pub const SHINY_HUNTER: &str = "Shiny Hunter";
    /// Signup welcome
    pub const WELCOME_TRAINER: &str = "Welcome Trainer!";
    /// First habit created
    pub const FIRST_STEP: &str = "First Step";
}

/// Static definition of an achievement, before it is unlocked.
#[derive(Debug, Clone, Copy)]
pub struct AchievementDef {
    /// Unique name (the dedup key)
    pub name: &'static str,
    /// Description shown to the user
    pub description: &'static str,
    /// Display icon
    pub icon: &'static str,
}

pub(crate) const CATALOG: &[AchievementDef] = &[
    AchievementDef {
        name: names::FIRST_CATCH,
        description: "Caught your first Pokemon",
        icon: "🎣",
    },
    AchievementDef {
        name: names::COLLECTOR,
        description: "Caught 10 Pokemon",
        icon: "📦",
    },
    AchievementDef {
        name: names::TRAINER,
        description: "Caught 25 Pokemon",
        icon: "🎒",
    },
    AchievementDef {
        name: names::POKEMON_MASTER,
        description: "Caught 50 Pokemon",
        icon: "🏆",
    },
    AchievementDef {
        name: names::LEGENDARY_TRAINER,
        description: "Caught 100 Pokemon",
        icon: "👑",
    },
    AchievementDef {
        name: names::WEEK_WARRIOR,
        description: "Kept a 7-day streak",
        icon: "🔥",
    },
    AchievementDef {
        name: names::MONTH_MASTER,
        description: "Kept a 30-day streak",
        icon: "📅",
    },
    AchievementDef {
        name: names::STREAK_LEGEND,
        description: "Kept a 100-day streak",
        icon: "⚡",
    },
    AchievementDef {
        name: names::RARE_HUNTER,
        description: "Caught your first rare Pokemon",
        icon: "💎",
    },
    AchievementDef {
        name: names::EPIC_COLLECTOR,
        description: "Caught your first epic Pokemon",
        icon: "🌟",
    },
    AchievementDef {
        name: names::LEGEND_SEEKER,
        description: "Caught your first legendary Pokemon",
        icon: "🐉",
    },
    AchievementDef {
        name: names::SHINY_HUNTER,
        description: "Caught your first shiny Pokemon",
        icon: "✨",
    },
    AchievementDef {
        name: names::WELCOME_TRAINER,
        description: "Joined HabitFlow",
        icon: "👋",
    },
    AchievementDef {
        name: names::FIRST_STEP,
        description: "Created your first habit",
        icon: "👟",
    },
];

/// Build an unlocked achievement from its catalog entry.
///
/// Returns `None` for names outside the catalog; callers pass the constants
/// from [`names`], so a miss is a programming error they surface upstream.
pub fn achievement(name: &str, at: Time) -> Option<Achievement> {
    CATALOG.iter().find(|def| def.name == name).map(|def| Achievement {
        name: def.name.to_string(),
        description: def.description.to_string(),
        unlocked_at: at,
        icon: def.icon.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_names_are_unique() {
        for (i, a) in CATALOG.iter().enumerate() {
            for b in &CATALOG[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn lookup_by_name() {
        let now = chrono::Utc::now();
        let unlocked = achievement(names::FIRST_CATCH, now).unwrap();
        assert_eq!(unlocked.name, "First Catch");
        assert_eq!(unlocked.unlocked_at, now);

        assert!(achievement("No Such Thing", now).is_none());
    }
}
