//! Player sessions.
//!
//! A [`Session`] is the whole context one player interacts with: the shared
//! catalog and class table, the two chosen combatants and the arena they
//! fight in. Sessions hold no global state, so a server can keep one per
//! connected player.
//!
//! The flow mirrors a menu-driven front end:
//!
//! 1. [`Session::selection_menu`] lists the available gear and classes
//! 2. [`Session::choose_player`] and [`Session::choose_enemy`] build the units
//! 3. [`Session::start_fight`] starts a battle between them
//! 4. [`Session::hit`], [`Session::use_skill`] and [`Session::pass_turn`]
//!    play rounds until the battle is finished
//! 5. [`Session::end_fight`] leaves the battle and returns to the menu
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use arena_core::class::ClassTable;
//! use arena_core::config::ArenaConfig;
//! use arena_core::equipment::Catalog;
//! use arena_core::session::{Combatant, Session};
//!
//! let catalog = Catalog::load(r#"{
//!     "weapons": [{ "id": 1, "name": "sword", "min_damage": 2.0, "max_damage": 4.0, "stamina_per_hit": 2.0 }],
//!     "armors": [{ "id": 1, "name": "leather", "defence": 1.0, "stamina_per_turn": 0.0 }]
//! }"#).unwrap();
//!
//! let mut session = Session::new(
//!     Arc::new(catalog),
//!     Arc::new(ClassTable::standard()),
//!     ArenaConfig::seeded(7),
//! );
//! session.choose_player(&Combatant::new("Ayla", "rogue").weapon("sword")).unwrap();
//! session.choose_enemy(&Combatant::new("Grub", "warrior").armor("leather")).unwrap();
//!
//! session.start_fight().unwrap();
//! let result = session.hit();
//! assert_eq!(result.turn, 1);
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::arena::Arena;
use crate::class::ClassTable;
use crate::config::ArenaConfig;
use crate::equipment::Catalog;
use crate::error::{Error, Result};
use crate::output::BattleResult;
use crate::unit::{build_unit, Side, Unit};

/// Names a front end collects to build one combatant.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Combatant {
    /// Unit name.
    pub name: String,
    /// Class name, e.g. `"warrior"`.
    pub class: String,
    /// Weapon name; `None` fights unarmed.
    pub weapon: Option<String>,
    /// Armor name; `None` fights unarmored.
    pub armor: Option<String>,
}

impl Combatant {
    /// An unequipped combatant.
    #[must_use]
    pub fn new(name: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            class: class.into(),
            weapon: None,
            armor: None,
        }
    }

    /// Sets the weapon name.
    #[must_use]
    pub fn weapon(mut self, weapon: impl Into<String>) -> Self {
        self.weapon = Some(weapon.into());
        self
    }

    /// Sets the armor name.
    #[must_use]
    pub fn armor(mut self, armor: impl Into<String>) -> Self {
        self.armor = Some(armor.into());
        self
    }
}

/// Everything a selection screen offers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionMenu {
    /// Weapon names in catalog order.
    pub weapons: Vec<String>,
    /// Armor names in catalog order.
    pub armors: Vec<String>,
    /// Class names with their display names.
    pub classes: Vec<ClassChoice>,
}

/// One entry of the class list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassChoice {
    /// Lookup name.
    pub name: String,
    /// Display name.
    pub display_name: String,
    /// Name of the class skill.
    pub skill: String,
}

/// One player's catalog, class table, combatants and arena.
#[derive(Debug)]
pub struct Session {
    catalog: Arc<Catalog>,
    classes: Arc<ClassTable>,
    player: Option<Unit>,
    enemy: Option<Unit>,
    arena: Arena,
}

impl Session {
    /// Creates a session with no combatants chosen.
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, classes: Arc<ClassTable>, config: ArenaConfig) -> Self {
        Self::with_arena(catalog, classes, Arena::new(config))
    }

    /// Creates a session around a preconfigured arena, e.g. one with a custom
    /// enemy policy.
    #[must_use]
    pub fn with_arena(catalog: Arc<Catalog>, classes: Arc<ClassTable>, arena: Arena) -> Self {
        Self {
            catalog,
            classes,
            player: None,
            enemy: None,
            arena,
        }
    }

    /// Gear and classes available for selection.
    #[must_use]
    pub fn selection_menu(&self) -> SelectionMenu {
        SelectionMenu {
            weapons: owned(self.catalog.weapon_names()),
            armors: owned(self.catalog.armor_names()),
            classes: self
                .classes
                .iter()
                .map(|class| ClassChoice {
                    name: class.name.clone(),
                    display_name: class.display_name.clone(),
                    skill: class.skill.name.clone(),
                })
                .collect(),
        }
    }

    /// Builds and stores the player's unit.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidName`] or [`Error::NotFound`] from unit assembly. The
    /// previous choice is kept on error.
    pub fn choose_player(&mut self, choice: &Combatant) -> Result<&Unit> {
        let unit = self.build(choice, Side::Player)?;
        Ok(self.player.insert(unit))
    }

    /// Builds and stores the enemy's unit.
    ///
    /// # Errors
    ///
    /// Same as [`Session::choose_player`].
    pub fn choose_enemy(&mut self, choice: &Combatant) -> Result<&Unit> {
        let unit = self.build(choice, Side::Enemy)?;
        Ok(self.enemy.insert(unit))
    }

    /// Starts a battle between the chosen units.
    ///
    /// The chosen units stay in the session, so a finished fight can be
    /// restarted with the same combatants.
    ///
    /// # Errors
    ///
    /// [`Error::MissingCombatant`] if either side has not been chosen.
    pub fn start_fight(&mut self) -> Result<&BattleResult> {
        let player = self
            .player
            .clone()
            .ok_or(Error::MissingCombatant(Side::Player))?;
        let enemy = self
            .enemy
            .clone()
            .ok_or(Error::MissingCombatant(Side::Enemy))?;
        self.arena.start(player, enemy);
        Ok(self.arena.current_result())
    }

    /// Plays a round in which the player attacks.
    pub fn hit(&mut self) -> BattleResult {
        self.arena.hit()
    }

    /// Plays a round in which the player uses the class skill.
    pub fn use_skill(&mut self) -> BattleResult {
        self.arena.use_skill()
    }

    /// Plays a round in which the player passes.
    pub fn pass_turn(&mut self) -> BattleResult {
        self.arena.pass_turn()
    }

    /// Leaves the current battle and returns to the selection menu.
    ///
    /// Chosen combatants are kept.
    pub fn end_fight(&mut self) -> SelectionMenu {
        self.arena.abandon();
        self.selection_menu()
    }

    /// The last battle result.
    #[must_use]
    pub fn current_result(&self) -> &BattleResult {
        self.arena.current_result()
    }

    /// The chosen player unit.
    #[must_use]
    pub fn player(&self) -> Option<&Unit> {
        self.player.as_ref()
    }

    /// The chosen enemy unit.
    #[must_use]
    pub fn enemy(&self) -> Option<&Unit> {
        self.enemy.as_ref()
    }

    /// The arena battles run in.
    #[must_use]
    pub const fn arena(&self) -> &Arena {
        &self.arena
    }

    fn build(&self, choice: &Combatant, side: Side) -> Result<Unit> {
        let unit = build_unit(
            &self.catalog,
            &self.classes,
            &choice.name,
            &choice.class,
            choice.weapon.as_deref(),
            choice.armor.as_deref(),
            side,
        )?;
        tracing::debug!(
            %side,
            name = unit.name(),
            class = %unit.class(),
            "combatant chosen"
        );
        Ok(unit)
    }
}

fn owned(names: Vec<&str>) -> Vec<String> {
    names.into_iter().map(str::to_string).collect()
}
