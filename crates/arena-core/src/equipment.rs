//! Equipment catalog: weapon and armor definitions.
//!
//! The catalog is loaded once from a JSON document with two named lists:
//!
//! ```json
//! {
//!   "weapons": [{ "id": 1, "name": "dagger", "min_damage": 1.0, "max_damage": 2.5, "stamina_per_hit": 1.0 }],
//!   "armors":  [{ "id": 1, "name": "leather", "defence": 1.0, "stamina_per_turn": 0.5 }]
//! }
//! ```
//!
//! Loading either yields a fully validated [`Catalog`] or
//! [`Error::DataFormat`]; there is no partial result. After loading, entries
//! are shared read-only through [`Arc`].
//!
//! # Example
//!
//! ```
//! use arena_core::equipment::Catalog;
//!
//! let catalog = Catalog::load(r#"{
//!     "weapons": [{ "id": 1, "name": "sword", "min_damage": 2.0, "max_damage": 4.0, "stamina_per_hit": 2.0 }],
//!     "armors": []
//! }"#).unwrap();
//!
//! assert_eq!(catalog.weapon_names(), vec!["sword"]);
//! assert!(catalog.find_weapon("axe").is_err());
//! ```

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Error, LookupKind, Result};
use crate::resolver::round_tenths;

// =============================================================================
// Weapon
// =============================================================================

/// A weapon definition.
///
/// Invariant (checked at load): `0 <= min_damage <= max_damage` and
/// `stamina_per_hit >= 0`, all finite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Weapon {
    /// Identifier from the definitions source.
    pub id: u32,
    /// Display and lookup name.
    pub name: String,
    /// Lower bound of a damage roll.
    pub min_damage: f64,
    /// Upper bound of a damage roll.
    pub max_damage: f64,
    /// Stamina spent per hit.
    pub stamina_per_hit: f64,
}

impl Weapon {
    /// Rolls the damage of one hit.
    ///
    /// The value is sampled uniformly from `[min_damage, max_damage]` and
    /// rounded to one decimal place. Rounding never leaves the range.
    pub fn roll_damage<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        if self.max_damage <= self.min_damage {
            return self.min_damage;
        }
        let raw = rng.gen_range(self.min_damage..=self.max_damage);
        round_tenths(raw).clamp(self.min_damage, self.max_damage)
    }

    fn validate(&self) -> Result<()> {
        check_name("weapon", &self.name)?;
        check_stat(&self.name, "min_damage", self.min_damage)?;
        check_stat(&self.name, "max_damage", self.max_damage)?;
        check_stat(&self.name, "stamina_per_hit", self.stamina_per_hit)?;
        if self.min_damage > self.max_damage {
            return Err(Error::DataFormat(format!(
                "weapon '{}': min_damage {} exceeds max_damage {}",
                self.name, self.min_damage, self.max_damage
            )));
        }
        Ok(())
    }
}

// =============================================================================
// Armor
// =============================================================================

/// An armor definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Armor {
    /// Identifier from the definitions source.
    pub id: u32,
    /// Display and lookup name.
    pub name: String,
    /// Flat reduction applied to incoming damage.
    pub defence: f64,
    /// Stamina the wearer pays at the end of every round.
    pub stamina_per_turn: f64,
}

impl Armor {
    fn validate(&self) -> Result<()> {
        check_name("armor", &self.name)?;
        check_stat(&self.name, "defence", self.defence)?;
        check_stat(&self.name, "stamina_per_turn", self.stamina_per_turn)
    }
}

fn check_name(kind: &str, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::DataFormat(format!("{kind} with an empty name")));
    }
    Ok(())
}

fn check_stat(owner: &str, field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::DataFormat(format!(
            "'{owner}': {field} must be a non-negative number, got {value}"
        )));
    }
    Ok(())
}

// =============================================================================
// Catalog
// =============================================================================

/// The equipment definitions shipped with the crate.
pub const BUNDLED_EQUIPMENT: &str = include_str!("../data/equipment.json");

/// Raw document shape, before validation.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct EquipmentData {
    weapons: Vec<Weapon>,
    armors: Vec<Armor>,
}

/// Immutable collection of weapons and armors, in load order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    weapons: Vec<Arc<Weapon>>,
    armors: Vec<Arc<Armor>>,
}

impl Catalog {
    /// Parses and validates an equipment definitions document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataFormat`] if the document is not valid JSON, is
    /// missing a field, carries a negative or non-finite stat, has a weapon
    /// whose `min_damage` exceeds `max_damage`, or repeats a name.
    pub fn load(source: &str) -> Result<Self> {
        let data: EquipmentData =
            serde_json::from_str(source).map_err(|e| Error::DataFormat(e.to_string()))?;

        let mut seen = HashSet::new();
        for weapon in &data.weapons {
            weapon.validate()?;
            if !seen.insert(weapon.name.as_str()) {
                return Err(duplicate("weapon", &weapon.name));
            }
        }
        seen.clear();
        for armor in &data.armors {
            armor.validate()?;
            if !seen.insert(armor.name.as_str()) {
                return Err(duplicate("armor", &armor.name));
            }
        }

        tracing::debug!(
            weapons = data.weapons.len(),
            armors = data.armors.len(),
            "equipment catalog loaded"
        );

        Ok(Self {
            weapons: data.weapons.into_iter().map(Arc::new).collect(),
            armors: data.armors.into_iter().map(Arc::new).collect(),
        })
    }

    /// Loads [`BUNDLED_EQUIPMENT`].
    ///
    /// # Errors
    ///
    /// As [`Catalog::load`]; the bundled document is valid, so this only fails
    /// if it was edited into an invalid state.
    pub fn bundled() -> Result<Self> {
        Self::load(BUNDLED_EQUIPMENT)
    }

    /// Reads a definitions file and loads it.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] if the file cannot be read, otherwise as [`Catalog::load`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::load(&source)
    }

    /// Looks up a weapon by exact name.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] when no weapon has that name.
    pub fn find_weapon(&self, name: &str) -> Result<Arc<Weapon>> {
        self.weapons
            .iter()
            .find(|weapon| weapon.name == name)
            .cloned()
            .ok_or_else(|| Error::not_found(LookupKind::Weapon, name))
    }

    /// Looks up an armor by exact name.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] when no armor has that name.
    pub fn find_armor(&self, name: &str) -> Result<Arc<Armor>> {
        self.armors
            .iter()
            .find(|armor| armor.name == name)
            .cloned()
            .ok_or_else(|| Error::not_found(LookupKind::Armor, name))
    }

    /// Weapon names in load order.
    #[must_use]
    pub fn weapon_names(&self) -> Vec<&str> {
        self.weapons.iter().map(|w| w.name.as_str()).collect()
    }

    /// Armor names in load order.
    #[must_use]
    pub fn armor_names(&self) -> Vec<&str> {
        self.armors.iter().map(|a| a.name.as_str()).collect()
    }

    /// All weapons in load order.
    pub fn weapons(&self) -> impl Iterator<Item = &Arc<Weapon>> + '_ {
        self.weapons.iter()
    }

    /// All armors in load order.
    pub fn armors(&self) -> impl Iterator<Item = &Arc<Armor>> + '_ {
        self.armors.iter()
    }
}

fn duplicate(kind: &str, name: &str) -> Error {
    Error::DataFormat(format!("duplicate {kind} name '{name}'"))
}

// =============================================================================
// Tests
// =============================================================================
