//! Combatants.
//!
//! A [`Unit`] is a player- or enemy-controlled combatant. Both sides carry the
//! same data; [`Side`] only records which half of the turn loop a unit takes.
//!
//! Health and stamina are mutated by the combat resolver and never drop below
//! zero. They are restored to the class-derived maximums by [`Unit::reset`],
//! which the arena calls at the start of every battle.
//!
//! # Example
//!
//! ```
//! use arena_core::class::ClassTable;
//! use arena_core::unit::{Side, Unit};
//!
//! let classes = ClassTable::standard();
//! let hero = Unit::new("Ayla", classes.get("rogue").unwrap(), Side::Player).unwrap();
//!
//! assert!(hero.is_alive());
//! assert!(hero.has_stamina(25.0));
//! assert!(hero.weapon().is_none());
//! ```

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::class::{ClassTable, UnitClass};
use crate::equipment::{Armor, Catalog, Weapon};
use crate::error::{Error, Result};

/// Slack allowed when comparing stamina against a cost. Stamina is only ever
/// changed by tenths, so accumulated float error stays far below this.
const STAMINA_TOLERANCE: f64 = 1e-6;

/// Which side of the turn loop a unit occupies.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// Controlled by the player; acts first each round.
    Player,
    /// Controlled by the enemy policy; answers the player.
    Enemy,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Player => write!(f, "player"),
            Self::Enemy => write!(f, "enemy"),
        }
    }
}

/// A combatant with a class, optional gear and mutable combat stats.
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    name: String,
    class: Arc<UnitClass>,
    side: Side,
    weapon: Option<Arc<Weapon>>,
    armor: Option<Arc<Armor>>,
    health: f64,
    max_health: f64,
    stamina: f64,
    max_stamina: f64,
}

impl Unit {
    /// Creates a unit at full health and stamina for its class.
    ///
    /// The name is trimmed. The unit starts unarmed and unarmored.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidName`] if the name is empty or only whitespace.
    pub fn new(name: &str, class: Arc<UnitClass>, side: Side) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidName);
        }
        let max_health = class.max_health();
        let max_stamina = class.max_stamina();
        Ok(Self {
            name: name.to_string(),
            class,
            side,
            weapon: None,
            armor: None,
            health: max_health,
            max_health,
            stamina: max_stamina,
            max_stamina,
        })
    }

    /// Replaces the weapon slot. `None` leaves the unit unarmed.
    pub fn equip_weapon(&mut self, weapon: Option<Arc<Weapon>>) {
        self.weapon = weapon;
    }

    /// Replaces the armor slot. `None` leaves the unit unarmored.
    pub fn equip_armor(&mut self, armor: Option<Arc<Armor>>) {
        self.armor = armor;
    }

    /// Restores health and stamina to the class-derived maximums.
    pub fn reset(&mut self) {
        self.max_health = self.class.max_health();
        self.max_stamina = self.class.max_stamina();
        self.health = self.max_health;
        self.stamina = self.max_stamina;
    }

    /// Returns `true` while health is above zero.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    /// Returns `true` if the unit can pay `cost` stamina.
    #[must_use]
    pub fn has_stamina(&self, cost: f64) -> bool {
        self.stamina + STAMINA_TOLERANCE >= cost
    }

    /// The unit's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The unit's class.
    #[must_use]
    pub fn class(&self) -> &Arc<UnitClass> {
        &self.class
    }

    /// The unit's side.
    #[must_use]
    pub const fn side(&self) -> Side {
        self.side
    }

    /// The equipped weapon, if any.
    #[must_use]
    pub fn weapon(&self) -> Option<&Arc<Weapon>> {
        self.weapon.as_ref()
    }

    /// The equipped armor, if any.
    #[must_use]
    pub fn armor(&self) -> Option<&Arc<Armor>> {
        self.armor.as_ref()
    }

    /// Current health.
    #[must_use]
    pub const fn health(&self) -> f64 {
        self.health
    }

    /// Maximum health.
    #[must_use]
    pub const fn max_health(&self) -> f64 {
        self.max_health
    }

    /// Current stamina.
    #[must_use]
    pub const fn stamina(&self) -> f64 {
        self.stamina
    }

    /// Maximum stamina.
    #[must_use]
    pub const fn max_stamina(&self) -> f64 {
        self.max_stamina
    }

    /// The weapon used for attacks: the equipped one or `unarmed`.
    #[must_use]
    pub fn attack_weapon<'a>(&'a self, unarmed: &'a Weapon) -> &'a Weapon {
        self.weapon.as_deref().unwrap_or(unarmed)
    }

    /// Damage reduction from worn armor after the class multiplier.
    #[must_use]
    pub fn defence(&self) -> f64 {
        self.armor
            .as_ref()
            .map_or(0.0, |armor| armor.defence * self.class.defence_multiplier)
    }

    /// Removes health, clamped at zero. Returns the amount actually removed.
    pub(crate) fn take_damage(&mut self, amount: f64) -> f64 {
        let dealt = amount.max(0.0).min(self.health);
        self.health -= dealt;
        dealt
    }

    /// Adds health, capped at the maximum. Returns the amount actually added.
    pub(crate) fn heal(&mut self, amount: f64) -> f64 {
        let restored = amount.max(0.0).min(self.max_health - self.health);
        self.health += restored;
        restored
    }

    /// Removes stamina, clamped at zero. Returns the amount actually removed.
    pub(crate) fn drain_stamina(&mut self, amount: f64) -> f64 {
        let drained = amount.max(0.0).min(self.stamina);
        self.stamina -= drained;
        drained
    }

    /// Adds stamina, capped at the maximum. Returns the amount actually added.
    pub(crate) fn restore_stamina(&mut self, amount: f64) -> f64 {
        let restored = amount.max(0.0).min(self.max_stamina - self.stamina);
        self.stamina += restored;
        restored
    }

    #[cfg(test)]
    pub(crate) fn set_health(&mut self, health: f64) {
        self.health = health.clamp(0.0, self.max_health);
    }

    #[cfg(test)]
    pub(crate) fn set_stamina(&mut self, stamina: f64) {
        self.stamina = stamina.clamp(0.0, self.max_stamina);
    }
}

/// Assembles a combat-ready unit from catalog and class lookups.
///
/// `None` for the weapon or armor name leaves that slot empty.
///
/// # Errors
///
/// - [`Error::InvalidName`] for an empty unit name
/// - [`Error::NotFound`] for an unknown class, weapon or armor name
pub fn build_unit(
    catalog: &Catalog,
    classes: &ClassTable,
    name: &str,
    class_name: &str,
    weapon_name: Option<&str>,
    armor_name: Option<&str>,
    side: Side,
) -> Result<Unit> {
    let class = classes.get(class_name)?;
    let mut unit = Unit::new(name, class, side)?;
    unit.equip_weapon(weapon_name.map(|n| catalog.find_weapon(n)).transpose()?);
    unit.equip_armor(armor_name.map(|n| catalog.find_armor(n)).transpose()?);
    Ok(unit)
}
