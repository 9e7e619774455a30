//! Results produced by the combat resolver and the arena.
//!
//! - [`ActionOutcome`]: one resolved half-turn (hit, skill, pass)
//! - [`BattleResult`]: everything a presentation layer needs to redraw the
//!   battle screen after a round, without querying anything else
//!
//! All types here are plain data and serialize with `serde`, so a front end
//! can ship them as JSON unchanged.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::unit::{Side, Unit};

// =============================================================================
// Actions
// =============================================================================

/// An action a unit can request on its half-turn.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Basic weapon attack.
    Hit,
    /// Class skill.
    Skill,
    /// Do nothing this half-turn.
    Pass,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hit => write!(f, "hit"),
            Self::Skill => write!(f, "skill"),
            Self::Pass => write!(f, "pass"),
        }
    }
}

/// What actually happened on a half-turn.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// A basic attack landed (possibly for zero damage).
    Hit,
    /// The class skill was used.
    Skill,
    /// The unit passed by choice.
    Pass,
    /// The unit tried to hit or use its skill without enough stamina and
    /// passed instead.
    Exhausted,
}

/// Health and stamina at a point in time.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vitals {
    /// Current health.
    pub health: f64,
    /// Current stamina.
    pub stamina: f64,
}

impl Vitals {
    /// Captures a unit's current health and stamina.
    #[must_use]
    pub fn of(unit: &Unit) -> Self {
        Self {
            health: unit.health(),
            stamina: unit.stamina(),
        }
    }
}

/// Structured result of a single resolved half-turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionOutcome {
    /// Side of the acting unit.
    pub side: Side,
    /// What the actor did.
    pub kind: ActionKind,
    /// Health removed from the target.
    pub damage: f64,
    /// Health restored to the actor.
    pub healed: f64,
    /// Stamina taken from the target.
    pub drained: f64,
    /// Stamina the actor paid.
    pub stamina_spent: f64,
    /// The actor's vitals after the action.
    pub actor: Vitals,
    /// The target's vitals after the action; `None` when nobody was targeted.
    pub target: Option<Vitals>,
    /// Human-readable description.
    pub narration: String,
}

impl ActionOutcome {
    pub(crate) fn new(side: Side, kind: ActionKind, actor: &Unit, narration: String) -> Self {
        Self {
            side,
            kind,
            damage: 0.0,
            healed: 0.0,
            drained: 0.0,
            stamina_spent: 0.0,
            actor: Vitals::of(actor),
            target: None,
            narration,
        }
    }
}

// =============================================================================
// Battle results
// =============================================================================

/// Lifecycle state of the arena.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleState {
    /// No battle has been started yet.
    #[default]
    NotStarted,
    /// A battle is running and accepts actions.
    InProgress,
    /// The last battle has ended.
    Finished,
}

/// How the battle stands.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The battle has not been decided.
    #[default]
    Ongoing,
    /// The enemy's health reached zero.
    PlayerWon,
    /// The player's health reached zero.
    EnemyWon,
    /// Neither unit can act and nothing regenerates.
    Draw,
}

impl Outcome {
    /// Returns `true` for any decided outcome.
    #[must_use]
    pub const fn is_final(self) -> bool {
        !matches!(self, Self::Ongoing)
    }
}

/// Display snapshot of one combatant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitStatus {
    /// Unit name.
    pub name: String,
    /// Class display name.
    pub class: String,
    /// Side the unit fights on.
    pub side: Side,
    /// Equipped weapon name, if any.
    pub weapon: Option<String>,
    /// Equipped armor name, if any.
    pub armor: Option<String>,
    /// Current health.
    pub health: f64,
    /// Maximum health.
    pub max_health: f64,
    /// Current stamina.
    pub stamina: f64,
    /// Maximum stamina.
    pub max_stamina: f64,
}

impl UnitStatus {
    /// Captures a unit's display state.
    #[must_use]
    pub fn of(unit: &Unit) -> Self {
        Self {
            name: unit.name().to_string(),
            class: unit.class().display_name.clone(),
            side: unit.side(),
            weapon: unit.weapon().map(|w| w.name.clone()),
            armor: unit.armor().map(|a| a.name.clone()),
            health: unit.health(),
            max_health: unit.max_health(),
            stamina: unit.stamina(),
            max_stamina: unit.max_stamina(),
        }
    }
}

impl fmt::Display for UnitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} the {}: health {:.1}/{:.1}, stamina {:.1}/{:.1}",
            self.name, self.class, self.health, self.max_health, self.stamina, self.max_stamina
        )
    }
}

/// The arena's answer to every request.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BattleResult {
    /// Decided or ongoing.
    pub outcome: Outcome,
    /// Arena state after the request.
    pub state: BattleState,
    /// Number of rounds resolved in this battle.
    pub turn: u32,
    /// Narration for the most recent round, one line per event.
    pub narration: Vec<String>,
    /// Per-half-turn details for the most recent round.
    pub actions: Vec<ActionOutcome>,
    /// Player snapshot; `None` before the first battle.
    pub player: Option<UnitStatus>,
    /// Enemy snapshot; `None` before the first battle.
    pub enemy: Option<UnitStatus>,
}

impl BattleResult {
    /// Narration lines joined into one paragraph.
    #[must_use]
    pub fn narration_text(&self) -> String {
        self.narration.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class::ClassTable;

    #[test]
    fn default_result_is_not_started() {
        let result = BattleResult::default();
        assert_eq!(result.state, BattleState::NotStarted);
        assert_eq!(result.outcome, Outcome::Ongoing);
        assert!(result.player.is_none());
        assert_eq!(result.narration_text(), "");
    }

    #[test]
    fn only_ongoing_is_not_final() {
        assert!(!Outcome::Ongoing.is_final());
        assert!(Outcome::PlayerWon.is_final());
        assert!(Outcome::EnemyWon.is_final());
        assert!(Outcome::Draw.is_final());
    }

    #[test]
    fn unit_status_display() {
        let class = ClassTable::standard().get("rogue").unwrap();
        let unit = Unit::new("Ayla", class, Side::Player).unwrap();
        assert_eq!(
            UnitStatus::of(&unit).to_string(),
            "Ayla the Rogue: health 50.0/50.0, stamina 25.0/25.0"
        );
    }

    #[test]
    fn result_serializes_with_snake_case_tags() {
        let result = BattleResult {
            outcome: Outcome::PlayerWon,
            state: BattleState::Finished,
            ..BattleResult::default()
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["outcome"], "player_won");
        assert_eq!(json["state"], "finished");
    }
}
