//! Static species tables: evolution chains, rarity overrides, id pools.
//!
//! Table membership is deliberately frozen as-is from the product's curated
//! data set, including its quirks (cross-generation jumps, a couple of
//! "progression" pairings that are not real evolutions). Species absent
//! from the chain table can never evolve.

use habitflow_core::{EvolutionChain, EvolutionRequirement, Rarity, Species};

/// Species used when the external source is unavailable (Magikarp).
pub const FALLBACK_SPECIES_ID: u32 = 129;

const SPRITE_BASE_URL: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/other/official-artwork";

/// Artwork URL for a species.
pub(crate) fn sprite_url(id: u32) -> String {
    format!("{SPRITE_BASE_URL}/{id}.png")
}

const fn chain2(stage1: u32, stage2: u32) -> EvolutionChain {
    EvolutionChain {
        stage1,
        stage2: Some(stage2),
        stage3: None,
    }
}

const fn chain3(stage1: u32, stage2: u32, stage3: u32) -> EvolutionChain {
    EvolutionChain {
        stage1,
        stage2: Some(stage2),
        stage3: Some(stage3),
    }
}

/// Evolution lines, keyed by base form.
const EVOLUTION_CHAINS: &[EvolutionChain] = &[
    // Kanto starters
    chain3(1, 2, 3),
    chain3(4, 5, 6),
    chain3(7, 8, 9),
    // Popular chains
    chain2(25, 26),
    chain2(129, 130),
    chain3(10, 11, 12),
    chain3(13, 14, 15),
    chain2(19, 20),
    chain2(21, 22),
    chain2(23, 24),
    chain2(27, 28),
    chain3(29, 30, 31),
    chain3(32, 33, 34),
    chain2(35, 36),
    chain2(37, 38),
    chain2(39, 40),
    chain2(41, 42),
    chain3(43, 44, 45),
    chain2(46, 47),
    chain2(48, 49),
    chain2(50, 51),
    chain2(52, 53),
    chain2(54, 55),
    chain2(56, 57),
    chain2(58, 59),
    chain3(60, 61, 62),
    chain3(63, 64, 65),
    chain3(66, 67, 68),
    chain3(69, 70, 71),
    chain2(72, 73),
    chain3(74, 75, 76),
    chain2(77, 78),
    chain2(79, 80),
    chain2(81, 82),
    chain2(84, 85),
    chain2(86, 87),
    chain2(88, 89),
    chain2(90, 91),
    chain3(92, 93, 94),
    // Cross-generation jump
    chain2(95, 208),
    chain2(96, 97),
    chain2(98, 99),
    chain2(100, 101),
    chain2(102, 103),
    chain2(104, 105),
    chain2(108, 463),
    chain2(109, 110),
    chain2(111, 112),
    chain2(113, 242),
    chain2(114, 465),
    chain2(116, 117),
    chain2(118, 119),
    chain2(120, 121),
    chain2(123, 212),
    chain2(125, 466),
    chain2(126, 467),
    // Progression pairings, not real evolutions
    chain2(127, 214),
    chain2(128, 149),
    // Eevee simplified to one line
    chain3(133, 134, 135),
    chain2(138, 139),
    chain2(140, 141),
    chain3(147, 148, 149),
];

/// Rarity overrides by species id; anything absent is common.
const RARITY_OVERRIDES: &[(u32, Rarity)] = &[
    // Legendaries
    (144, Rarity::Legendary),
    (145, Rarity::Legendary),
    (146, Rarity::Legendary),
    (150, Rarity::Legendary),
    (151, Rarity::Legendary),
    (243, Rarity::Legendary),
    (244, Rarity::Legendary),
    (245, Rarity::Legendary),
    (249, Rarity::Legendary),
    (250, Rarity::Legendary),
    (380, Rarity::Legendary),
    (381, Rarity::Legendary),
    (382, Rarity::Legendary),
    (383, Rarity::Legendary),
    (384, Rarity::Legendary),
    // Pseudo-legendaries
    (147, Rarity::Epic),
    (148, Rarity::Epic),
    (149, Rarity::Epic),
    (246, Rarity::Epic),
    (247, Rarity::Epic),
    (248, Rarity::Epic),
    // Final evolutions of popular chains
    (3, Rarity::Rare),
    (6, Rarity::Rare),
    (9, Rarity::Rare),
    (26, Rarity::Rare),
    (130, Rarity::Rare),
    // Base forms
    (1, Rarity::Common),
    (4, Rarity::Common),
    (7, Rarity::Common),
    (25, Rarity::Uncommon),
    (129, Rarity::Common),
];

const COMMON_POOL: &[u32] = &[
    1, 4, 7, 10, 13, 16, 19, 21, 23, 27, 29, 32, 35, 37, 39, 41, 43, 46, 48, 50, 52, 54, 56, 58,
    60, 63, 66, 69, 72, 74, 77, 79, 81, 83, 84, 86, 88, 90, 92, 95, 96, 98, 100, 102, 104, 108,
    109, 111, 113, 114, 115, 116, 118, 120, 122, 123, 124, 125, 126, 127, 128, 129, 133, 134, 135,
    136, 137, 138, 140, 152, 155, 158, 161, 163, 165, 167, 170, 172, 173, 174, 175, 177, 179, 183,
    185, 187, 190, 191, 193, 194, 198, 200, 204, 206, 209, 213, 214, 215, 216, 218, 220, 222, 223,
    225, 226, 228, 231, 234, 235, 236, 238, 239, 240, 252, 255, 258, 261, 263, 265, 267, 269, 270,
    273, 276, 278, 283, 285, 287, 290, 293, 296, 299, 300, 303, 304, 307, 309, 311, 312, 313, 314,
    315, 316, 318, 320, 322, 325, 327, 328, 331, 333, 335, 336, 337, 338, 339, 341, 343, 345, 347,
    349, 351, 352, 353, 355, 357, 358, 359, 360, 361, 363, 366, 369, 370, 371, 374,
];

const UNCOMMON_POOL: &[u32] = &[
    2, 5, 8, 11, 14, 17, 20, 22, 24, 26, 28, 30, 33, 36, 38, 40, 42, 44, 47, 49, 51, 53, 55, 57,
    59, 61, 64, 67, 70, 75, 78, 80, 82, 85, 87, 89, 91, 93, 97, 99, 101, 103, 105, 106, 107, 110,
    112, 117, 119, 121, 130, 139, 141, 153, 156, 159, 162, 164, 166, 168, 171, 176, 178, 180, 184,
    186, 188, 192, 195, 199, 201, 205, 207, 210, 217, 219, 221, 224, 227, 229, 232, 233, 237, 241,
    253, 256, 259, 262, 264, 266, 268, 271, 274, 277, 279, 284, 286, 288, 291, 294, 297, 301, 305,
    308, 310, 317, 319, 321, 323, 326, 329, 332, 334, 340, 342, 344, 346, 348, 350, 354, 356, 362,
    364, 367, 372,
];

const RARE_POOL: &[u32] = &[
    3, 6, 9, 12, 15, 18, 25, 31, 34, 45, 62, 65, 68, 71, 73, 76, 94, 131, 132, 142, 143, 154, 157,
    160, 181, 182, 189, 196, 197, 202, 203, 208, 211, 212, 230, 242, 254, 257, 260, 272, 275, 280,
    281, 282, 289, 292, 295, 298, 302, 306, 324, 330, 365, 368, 373, 375,
];

const EPIC_POOL: &[u32] = &[
    147, 148, 149, 246, 247, 248, 142, 345, 347, 349, 351, 374, 375, 376,
];

const LEGENDARY_POOL: &[u32] = &[
    144, 145, 146, 150, 151, 243, 244, 245, 249, 250, 251, 377, 378, 379, 380, 381, 382, 383, 384,
    385, 386,
];

/// Base forms with room to evolve, drawn for the streak-3 starter reward.
const BASE_FORM_POOL: &[u32] = &[
    1, 4, 7, 25, 129, 10, 13, 19, 21, 23, 27, 29, 32, 35, 37, 39, 41, 43, 46, 48, 50, 52, 54, 56,
    58, 60, 63, 66, 69, 72, 74, 77, 79, 81, 84, 86, 88, 90, 92, 95, 96, 98, 100, 102, 104, 108,
    109, 111, 113, 114, 116, 118, 120, 123, 125, 126, 127, 128, 133, 138, 140, 147,
];

/// Starter species for the signup welcome reward.
const STARTER_POOL: &[u32] = &[1, 4, 7];

/// Species for the first-habit reward (Pikachu, Magikarp, Eevee).
const FIRST_HABIT_POOL: &[u32] = &[25, 129, 133];

/// The evolution line containing `id`, if it appears as a base form.
pub fn chain_for(id: u32) -> Option<EvolutionChain> {
    EVOLUTION_CHAINS.iter().copied().find(|c| c.stage1 == id)
}

/// Evolution stage of a species (1 when it appears in no chain).
pub fn evolution_stage(id: u32) -> u8 {
    for chain in EVOLUTION_CHAINS {
        if chain.stage1 == id {
            return 1;
        }
        if chain.stage2 == Some(id) {
            return 2;
        }
        if chain.stage3 == Some(id) {
            return 3;
        }
    }
    1
}

/// Whether a species has a next stage to evolve into.
pub fn can_evolve(id: u32) -> bool {
    next_evolution(id).is_some()
}

/// The successor species, if any.
pub fn next_evolution(id: u32) -> Option<u32> {
    for chain in EVOLUTION_CHAINS {
        if chain.stage1 == id {
            if let Some(next) = chain.stage2 {
                return Some(next);
            }
        }
        if chain.stage2 == Some(id) {
            if let Some(next) = chain.stage3 {
                return Some(next);
            }
        }
    }
    None
}

/// Focus sessions required to evolve out of `stage`.
pub fn evolution_requirement_for_stage(stage: u8) -> u32 {
    if stage <= 1 {
        EvolutionRequirement::STAGE_ONE_AMOUNT
    } else {
        EvolutionRequirement::STAGE_TWO_AMOUNT
    }
}

/// Base rarity for a species.
pub fn base_rarity(id: u32) -> Rarity {
    RARITY_OVERRIDES
        .iter()
        .find(|(species, _)| *species == id)
        .map(|(_, rarity)| *rarity)
        .unwrap_or(Rarity::Common)
}

/// Id pool for a rarity tier. Shiny has no pool of its own; shiny grants
/// draw a common-pool id and only override the rarity tag.
pub fn pool_for_rarity(rarity: Rarity) -> &'static [u32] {
    match rarity {
        Rarity::Common | Rarity::Shiny => COMMON_POOL,
        Rarity::Uncommon => UNCOMMON_POOL,
        Rarity::Rare => RARE_POOL,
        Rarity::Epic => EPIC_POOL,
        Rarity::Legendary => LEGENDARY_POOL,
    }
}

/// Pool of evolvable base forms.
pub fn base_form_pool() -> &'static [u32] {
    BASE_FORM_POOL
}

/// Pool of signup starters.
pub fn starter_pool() -> &'static [u32] {
    STARTER_POOL
}

/// Pool for the first-habit reward.
pub fn first_habit_pool() -> &'static [u32] {
    FIRST_HABIT_POOL
}

/// Build a `Species` purely from the static tables, with no display name
/// from the external source. Used by the offline provider and as the shape
/// the HTTP client fills in.
pub fn static_species(id: u32) -> Species {
    let stage = evolution_stage(id);
    let evolvable = can_evolve(id);
    Species {
        id,
        name: format!("Pokemon #{id}"),
        image: sprite_url(id),
        types: Vec::new(),
        rarity: base_rarity(id),
        evolution_stage: stage,
        can_evolve: evolvable,
        evolution_requirement: evolvable.then(|| evolution_requirement_for_stage(stage)),
    }
}

/// The hardcoded fallback species (Magikarp), always evolvable.
pub fn fallback_species() -> Species {
    Species {
        id: FALLBACK_SPECIES_ID,
        name: "Magikarp".to_string(),
        image: sprite_url(FALLBACK_SPECIES_ID),
        types: vec!["water".to_string()],
        rarity: Rarity::Common,
        evolution_stage: 1,
        can_evolve: true,
        evolution_requirement: Some(EvolutionRequirement::STAGE_ONE_AMOUNT),
    }
}
