//! Test helper functions for building classes, gear and units.
//!
//! The test classes have health and stamina multipliers of 1, so every test
//! unit starts at 50 health and 25 stamina regardless of class.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::class::{ClassTable, Skill, SkillEffect, UnitClass};
use crate::equipment::{Armor, Weapon};
use crate::unit::{Side, Unit};

/// All multipliers 1, empowered skill ×1.5 for 3 stamina.
pub const BALANCED_CLASS: &str = "balanced";

// =============================================================================
// Classes
// =============================================================================

/// A class with health, stamina and defence multipliers of 1.
pub fn flat_class(name: &str, attack_multiplier: f64, skill: Skill) -> UnitClass {
    UnitClass {
        name: name.into(),
        display_name: name.into(),
        health_multiplier: 1.0,
        stamina_multiplier: 1.0,
        attack_multiplier,
        defence_multiplier: 1.0,
        skill,
    }
}

/// Four classes with round numbers:
///
/// - `balanced`: empowered ×1.5, cost 3
/// - `brute`: attack ×2, empowered ×3, cost 4
/// - `medic`: "Patch Up" heals 10, cost 3
/// - `leech`: drains 6 stamina, cost 2
pub fn test_classes() -> ClassTable {
    ClassTable::new(vec![
        flat_class(
            BALANCED_CLASS,
            1.0,
            Skill {
                name: "Focus Strike".into(),
                stamina_cost: 3.0,
                effect: SkillEffect::Empowered { multiplier: 1.5 },
            },
        ),
        flat_class(
            "brute",
            2.0,
            Skill {
                name: "Crush".into(),
                stamina_cost: 4.0,
                effect: SkillEffect::Empowered { multiplier: 3.0 },
            },
        ),
        flat_class(
            "medic",
            1.0,
            Skill {
                name: "Patch Up".into(),
                stamina_cost: 3.0,
                effect: SkillEffect::Heal { amount: 10.0 },
            },
        ),
        flat_class(
            "leech",
            1.0,
            Skill {
                name: "Siphon".into(),
                stamina_cost: 2.0,
                effect: SkillEffect::Drain { amount: 6.0 },
            },
        ),
    ])
}

// =============================================================================
// Units and Gear
// =============================================================================

/// An unequipped unit named "Hero" or "Foe" depending on its side.
pub fn unit_of(classes: &ClassTable, class_name: &str, side: Side) -> Unit {
    let name = match side {
        Side::Player => "Hero",
        Side::Enemy => "Foe",
    };
    Unit::new(name, classes.get(class_name).unwrap(), side).unwrap()
}

/// A weapon that always rolls `damage`.
pub fn fixed_weapon(damage: f64, stamina_per_hit: f64) -> Weapon {
    Weapon {
        id: 100,
        name: "test blade".into(),
        min_damage: damage,
        max_damage: damage,
        stamina_per_hit,
    }
}

/// Armor with the given defence and per-round upkeep.
pub fn armor(defence: f64, stamina_per_turn: f64) -> Armor {
    Armor {
        id: 100,
        name: "test mail".into(),
        defence,
        stamina_per_turn,
    }
}

/// A seeded random source.
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}
