//! Combat resolver for hits, skills and passes.
//!
//! The `CombatResolver` handles:
//! - Basic attacks: weapon roll × attack multiplier, reduced by armor
//! - Skills: the class [`SkillEffect`] (empowered strike, heal, drain)
//! - Passes, including the forced pass after a failed stamina check

use rand::Rng;

use crate::config::default_unarmed;
use crate::class::SkillEffect;
use crate::equipment::Weapon;
use crate::error::{Error, Result};
use crate::output::{Action, ActionKind, ActionOutcome, Vitals};
use crate::unit::Unit;

use super::mitigate;

/// Resolver for one unit acting on another.
///
/// The only thing it owns is the weapon used by units with an empty weapon
/// slot.
///
/// # Example
///
/// ```
/// use arena_core::class::ClassTable;
/// use arena_core::resolver::CombatResolver;
/// use arena_core::unit::{Side, Unit};
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let classes = ClassTable::standard();
/// let mut hero = Unit::new("Ayla", classes.get("rogue").unwrap(), Side::Player).unwrap();
/// let mut foe = Unit::new("Grub", classes.get("mage").unwrap(), Side::Enemy).unwrap();
///
/// let resolver = CombatResolver::default();
/// let mut rng = ChaCha8Rng::seed_from_u64(1);
/// let outcome = resolver.basic_attack(&mut hero, &mut foe, &mut rng).unwrap();
///
/// assert!(outcome.damage > 0.0);
/// assert!(foe.health() < foe.max_health());
/// ```
#[derive(Debug, Clone)]
pub struct CombatResolver {
    unarmed: Weapon,
}

impl CombatResolver {
    /// Creates a resolver with the given unarmed fallback weapon.
    #[must_use]
    pub fn new(unarmed: Weapon) -> Self {
        Self { unarmed }
    }

    /// The fallback weapon for units with an empty weapon slot.
    #[must_use]
    pub fn unarmed(&self) -> &Weapon {
        &self.unarmed
    }

    /// Stamina `unit` needs for a basic attack.
    #[must_use]
    pub fn hit_cost(&self, unit: &Unit) -> f64 {
        unit.attack_weapon(&self.unarmed).stamina_per_hit
    }

    /// Returns `true` if `unit` can afford a basic attack or its skill.
    #[must_use]
    pub fn can_act(&self, unit: &Unit) -> bool {
        unit.has_stamina(self.hit_cost(unit)) || unit.has_stamina(unit.class().skill.stamina_cost)
    }

    /// Resolves a basic weapon attack.
    ///
    /// # Errors
    ///
    /// [`Error::InsufficientStamina`] if the attacker cannot pay the weapon's
    /// stamina cost. Neither unit is modified in that case.
    pub fn basic_attack<R: Rng + ?Sized>(
        &self,
        attacker: &mut Unit,
        defender: &mut Unit,
        rng: &mut R,
    ) -> Result<ActionOutcome> {
        let cost = self.hit_cost(attacker);
        check_stamina(attacker, cost)?;

        let damage = self.strike(attacker, defender, 1.0, rng);
        attacker.drain_stamina(cost);

        let weapon = &attacker.attack_weapon(&self.unarmed).name;
        let narration = if damage > 0.0 {
            format!(
                "{} strikes {} with {} for {:.1} damage.",
                attacker.name(),
                defender.name(),
                weapon,
                damage
            )
        } else {
            format!(
                "{} strikes {} with {}, but the blow is fully absorbed.",
                attacker.name(),
                defender.name(),
                weapon
            )
        };

        let mut outcome = ActionOutcome::new(attacker.side(), ActionKind::Hit, attacker, narration);
        outcome.damage = damage;
        outcome.stamina_spent = cost;
        outcome.target = Some(Vitals::of(defender));
        Ok(outcome)
    }

    /// Resolves the attacker's class skill.
    ///
    /// # Errors
    ///
    /// [`Error::InsufficientStamina`] if the attacker cannot pay the skill's
    /// stamina cost. Neither unit is modified in that case.
    pub fn use_skill<R: Rng + ?Sized>(
        &self,
        attacker: &mut Unit,
        defender: &mut Unit,
        rng: &mut R,
    ) -> Result<ActionOutcome> {
        let class = std::sync::Arc::clone(attacker.class());
        let skill = &class.skill;
        check_stamina(attacker, skill.stamina_cost)?;
        attacker.drain_stamina(skill.stamina_cost);

        let mut outcome =
            ActionOutcome::new(attacker.side(), ActionKind::Skill, attacker, String::new());
        outcome.stamina_spent = skill.stamina_cost;

        outcome.narration = match skill.effect {
            SkillEffect::Empowered { multiplier } => {
                let damage = self.strike(attacker, defender, multiplier, rng);
                outcome.damage = damage;
                format!(
                    "{} uses {} on {} for {:.1} damage.",
                    attacker.name(),
                    skill.name,
                    defender.name(),
                    damage
                )
            }
            SkillEffect::Heal { amount } => {
                let healed = attacker.heal(amount);
                outcome.healed = healed;
                format!(
                    "{} uses {} and recovers {:.1} health.",
                    attacker.name(),
                    skill.name,
                    healed
                )
            }
            SkillEffect::Drain { amount } => {
                let drained = defender.drain_stamina(amount);
                attacker.restore_stamina(drained);
                outcome.drained = drained;
                format!(
                    "{} uses {} and drains {:.1} stamina from {}.",
                    attacker.name(),
                    skill.name,
                    drained,
                    defender.name()
                )
            }
        };

        outcome.actor = Vitals::of(attacker);
        outcome.target = Some(Vitals::of(defender));
        Ok(outcome)
    }

    /// Resolves a voluntary pass. Always succeeds and changes nothing.
    #[must_use]
    pub fn pass_turn(&self, unit: &Unit) -> ActionOutcome {
        let narration = format!("{} waits.", unit.name());
        ActionOutcome::new(unit.side(), ActionKind::Pass, unit, narration)
    }

    /// The pass a unit takes after failing the stamina check for `attempted`.
    #[must_use]
    pub fn forced_pass(&self, unit: &Unit, attempted: Action) -> ActionOutcome {
        let what = match attempted {
            Action::Skill => unit.class().skill.name.clone(),
            Action::Hit | Action::Pass => unit.attack_weapon(&self.unarmed).name.clone(),
        };
        let narration = format!(
            "{} tries to use {}, but is too exhausted and skips the turn.",
            unit.name(),
            what
        );
        ActionOutcome::new(unit.side(), ActionKind::Exhausted, unit, narration)
    }

    /// Rolls, scales and mitigates one strike, then applies it to `defender`.
    /// Returns the damage actually dealt.
    fn strike<R: Rng + ?Sized>(
        &self,
        attacker: &Unit,
        defender: &mut Unit,
        multiplier: f64,
        rng: &mut R,
    ) -> f64 {
        let roll = attacker.attack_weapon(&self.unarmed).roll_damage(rng);
        let raw = roll * attacker.class().attack_multiplier * multiplier;
        let effective = mitigate(raw, defender.defence());
        tracing::trace!(roll, raw, effective, "strike resolved");
        defender.take_damage(effective)
    }
}

impl Default for CombatResolver {
    fn default() -> Self {
        Self::new(default_unarmed())
    }
}

fn check_stamina(unit: &Unit, cost: f64) -> Result<()> {
    if unit.has_stamina(cost) {
        Ok(())
    } else {
        Err(Error::InsufficientStamina {
            required: cost,
            available: unit.stamina(),
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
