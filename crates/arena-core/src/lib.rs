//! # Arena Core
//!
//! Turn-based hero battle engine.
//!
//! A player and an enemy, each with a class, a weapon and an armor, take
//! turns hitting, using their class skill or passing until one of them falls.
//! The engine is deterministic for a given seed and has no presentation
//! layer; front ends drive it through [`session::Session`] or directly
//! through [`arena::Arena`] and render the returned [`output::BattleResult`].
//!
//! ## Modules
//!
//! - **Catalog**: weapon and armor definitions loaded from JSON ([`equipment`])
//! - **Classes**: stat multipliers and skills ([`class`])
//! - **Units**: combatants and their mutable stats ([`unit`])
//! - **Resolver**: damage, skill and stamina math ([`resolver`])
//! - **Arena**: the round-by-round state machine ([`arena`], [`policy`])
//! - **Session**: per-player selection and battle flow ([`session`])
//!
//! ## Usage
//!
//! ```rust
//! use arena_core::{Arena, ArenaConfig, ClassTable, Side, Unit};
//!
//! let classes = ClassTable::standard();
//! let hero = Unit::new("Ayla", classes.get("mage")?, Side::Player)?;
//! let foe = Unit::new("Grub", classes.get("rogue")?, Side::Enemy)?;
//!
//! let mut arena = Arena::new(ArenaConfig::seeded(3));
//! arena.start(hero, foe);
//! let result = arena.hit();
//! println!("{}", result.narration_text());
//! # Ok::<(), arena_core::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod arena;
pub mod class;
pub mod config;
pub mod equipment;
pub mod error;
pub mod output;
pub mod policy;
pub mod resolver;
pub mod session;
pub mod unit;

pub use arena::Arena;
pub use class::{ClassTable, Skill, SkillEffect, UnitClass};
pub use config::ArenaConfig;
pub use equipment::{Armor, Catalog, Weapon};
pub use error::{Error, Result};
pub use output::{Action, ActionOutcome, BattleResult, BattleState, Outcome, UnitStatus};
pub use policy::{DesperationPolicy, EnemyPolicy};
pub use session::{Combatant, SelectionMenu, Session};
pub use unit::{build_unit, Side, Unit};

#[cfg(test)]
mod tests;
