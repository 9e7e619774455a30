//! Unit classes and their skills.
//!
//! A [`UnitClass`] carries the multipliers that shape a unit's starting stats
//! and combat math, plus the one [`Skill`] the class can use. Classes are
//! defined at process start, never mutated, and shared through [`Arc`].
//!
//! # Example
//!
//! ```
//! use arena_core::class::{ClassTable, SkillEffect};
//!
//! let classes = ClassTable::standard();
//! let warrior = classes.get("warrior").unwrap();
//!
//! assert_eq!(warrior.max_health(), 60.0);
//! assert!(matches!(warrior.skill.effect, SkillEffect::Empowered { .. }));
//! ```

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{Error, LookupKind, Result};

/// Health of a unit whose class multiplier is 1.
pub const BASE_HEALTH: f64 = 50.0;

/// Stamina of a unit whose class multiplier is 1.
pub const BASE_STAMINA: f64 = 25.0;

/// What a skill does when used.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkillEffect {
    /// A weapon strike whose damage is multiplied before armor applies.
    Empowered {
        /// Factor applied to the attack's raw damage.
        multiplier: f64,
    },
    /// Restores the user's health, capped at its maximum.
    Heal {
        /// Health restored.
        amount: f64,
    },
    /// Takes stamina from the target and gives it to the user.
    Drain {
        /// Stamina removed from the target, at most what it has.
        amount: f64,
    },
}

impl SkillEffect {
    /// Returns `true` if the effect only benefits the user.
    #[must_use]
    pub const fn is_restorative(&self) -> bool {
        matches!(self, Self::Heal { .. })
    }
}

/// A class-specific special action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    /// Display name used in narration.
    pub name: String,
    /// Stamina spent on use.
    pub stamina_cost: f64,
    /// Effect applied on use.
    pub effect: SkillEffect,
}

/// A named unit archetype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitClass {
    /// Lookup key, e.g. `"warrior"`.
    pub name: String,
    /// Name shown to players.
    pub display_name: String,
    /// Scales [`BASE_HEALTH`].
    pub health_multiplier: f64,
    /// Scales [`BASE_STAMINA`] and per-round regeneration.
    pub stamina_multiplier: f64,
    /// Scales outgoing weapon damage.
    pub attack_multiplier: f64,
    /// Scales the defence of worn armor.
    pub defence_multiplier: f64,
    /// The class skill.
    pub skill: Skill,
}

impl UnitClass {
    /// Starting and maximum health for units of this class.
    #[must_use]
    pub fn max_health(&self) -> f64 {
        BASE_HEALTH * self.health_multiplier
    }

    /// Starting and maximum stamina for units of this class.
    #[must_use]
    pub fn max_stamina(&self) -> f64 {
        BASE_STAMINA * self.stamina_multiplier
    }
}

impl fmt::Display for UnitClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name)
    }
}

/// The fixed set of classes available to a session.
#[derive(Debug, Clone)]
pub struct ClassTable {
    classes: Vec<Arc<UnitClass>>,
}

impl ClassTable {
    /// Creates a table from explicit class definitions.
    #[must_use]
    pub fn new(classes: Vec<UnitClass>) -> Self {
        Self {
            classes: classes.into_iter().map(Arc::new).collect(),
        }
    }

    /// The three built-in classes: warrior, rogue and mage.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(vec![
            UnitClass {
                name: "warrior".into(),
                display_name: "Warrior".into(),
                health_multiplier: 1.2,
                stamina_multiplier: 1.2,
                attack_multiplier: 0.8,
                defence_multiplier: 1.2,
                skill: Skill {
                    name: "Fury Punch".into(),
                    stamina_cost: 6.0,
                    effect: SkillEffect::Empowered { multiplier: 2.0 },
                },
            },
            UnitClass {
                name: "rogue".into(),
                display_name: "Rogue".into(),
                health_multiplier: 1.0,
                stamina_multiplier: 1.0,
                attack_multiplier: 1.5,
                defence_multiplier: 1.0,
                skill: Skill {
                    name: "Thunder Kick".into(),
                    stamina_cost: 5.0,
                    effect: SkillEffect::Drain { amount: 8.0 },
                },
            },
            UnitClass {
                name: "mage".into(),
                display_name: "Mage".into(),
                health_multiplier: 0.9,
                stamina_multiplier: 1.4,
                attack_multiplier: 1.2,
                defence_multiplier: 0.8,
                skill: Skill {
                    name: "Mending Light".into(),
                    stamina_cost: 8.0,
                    effect: SkillEffect::Heal { amount: 15.0 },
                },
            },
        ])
    }

    /// Looks up a class by name.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if no class has that name.
    pub fn get(&self, name: &str) -> Result<Arc<UnitClass>> {
        self.classes
            .iter()
            .find(|class| class.name == name)
            .cloned()
            .ok_or_else(|| Error::not_found(LookupKind::Class, name))
    }

    /// Class names in definition order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.classes.iter().map(|c| c.name.as_str()).collect()
    }

    /// All classes in definition order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<UnitClass>> + '_ {
        self.classes.iter()
    }
}

impl Default for ClassTable {
    fn default() -> Self {
        Self::standard()
    }
}
