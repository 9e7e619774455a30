//! Enemy turn policies.
//!
//! The enemy answers every player half-turn with one action picked by an
//! [`EnemyPolicy`]. Policies are deterministic: given the same two units they
//! always choose the same action, so a seeded battle replays exactly.

use std::fmt;

use crate::output::Action;
use crate::resolver::CombatResolver;
use crate::unit::Unit;

/// Chooses the enemy's action for its half-turn.
pub trait EnemyPolicy: fmt::Debug + Send + Sync {
    /// Picks an action for `me` against `opponent`.
    ///
    /// The returned action may still fail its stamina check; the arena turns
    /// that into a forced pass.
    fn choose(&self, me: &Unit, opponent: &Unit, resolver: &CombatResolver) -> Action;
}

/// The default enemy behavior.
///
/// 1. At or below half health, use the skill if it is affordable.
/// 2. Otherwise attack if the weapon is affordable.
/// 3. Otherwise use the skill if it is affordable.
/// 4. Otherwise pass.
///
/// An enemy that passes can therefore afford neither action.
#[derive(Debug, Clone, Copy, Default)]
pub struct DesperationPolicy;

impl EnemyPolicy for DesperationPolicy {
    fn choose(&self, me: &Unit, _opponent: &Unit, resolver: &CombatResolver) -> Action {
        let wounded = me.health() <= me.max_health() / 2.0;
        let skill_ready = me.has_stamina(me.class().skill.stamina_cost);
        if wounded && skill_ready {
            Action::Skill
        } else if me.has_stamina(resolver.hit_cost(me)) {
            Action::Hit
        } else if skill_ready {
            Action::Skill
        } else {
            Action::Pass
        }
    }
}

/// Always attacks. Useful for scripted scenarios and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysHitPolicy;

impl EnemyPolicy for AlwaysHitPolicy {
    fn choose(&self, _me: &Unit, _opponent: &Unit, _resolver: &CombatResolver) -> Action {
        Action::Hit
    }
}
