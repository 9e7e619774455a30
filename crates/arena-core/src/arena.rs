//! Arena module: the battle state machine.
//!
//! The Arena owns the two combatants of the current battle and advances it one
//! round per player request:
//!
//! 1. **Player half-turn**: the requested hit, skill or pass. A failed stamina
//!    check becomes a forced pass.
//! 2. **Enemy half-turn**: one action chosen by the [`EnemyPolicy`], if the
//!    enemy is still alive.
//! 3. **End of round**: each living unit pays its armor upkeep, then regains
//!    `stamina_per_round × stamina multiplier` stamina.
//! 4. **Termination check**: a unit at zero health loses. With regeneration
//!    disabled, a player who can afford nothing ends the battle in a draw once
//!    the enemy can afford nothing either or has just passed.
//!
//! # States
//!
//! ```text
//! NotStarted --start--> InProgress --(a unit dies / stalemate)--> Finished
//!                           ^                                        |
//!                           +-----------------start------------------+
//! ```
//!
//! Actions requested outside `InProgress` return the last stored result
//! unchanged, so a stateless front end can safely replay late or duplicate
//! requests.
//!
//! # Determinism
//!
//! All randomness comes from one `ChaCha8Rng` seeded from
//! [`ArenaConfig::seed`]. The same seed, units and action sequence always
//! produce the same results.
//!
//! # Example
//!
//! ```
//! use arena_core::arena::Arena;
//! use arena_core::class::ClassTable;
//! use arena_core::config::ArenaConfig;
//! use arena_core::output::BattleState;
//! use arena_core::unit::{Side, Unit};
//!
//! let classes = ClassTable::standard();
//! let hero = Unit::new("Ayla", classes.get("rogue").unwrap(), Side::Player).unwrap();
//! let foe = Unit::new("Grub", classes.get("warrior").unwrap(), Side::Enemy).unwrap();
//!
//! let mut arena = Arena::new(ArenaConfig::seeded(42));
//! arena.start(hero, foe);
//!
//! let result = arena.hit();
//! assert_eq!(result.turn, 1);
//! assert_eq!(result.narration.len(), 2);
//! assert_eq!(arena.state(), BattleState::InProgress);
//! ```

use std::fmt;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::ArenaConfig;
use crate::output::{
    Action, ActionKind, ActionOutcome, BattleResult, BattleState, Outcome, UnitStatus,
};
use crate::policy::{DesperationPolicy, EnemyPolicy};
use crate::resolver::CombatResolver;
use crate::unit::Unit;

/// The two combatants of a battle.
#[derive(Debug, Clone)]
struct Battle {
    player: Unit,
    enemy: Unit,
}

/// Turn-based battle state machine for one player session.
///
/// Not shared between sessions: every session owns its own `Arena`.
pub struct Arena {
    config: ArenaConfig,
    resolver: CombatResolver,
    policy: Box<dyn EnemyPolicy>,
    rng: ChaCha8Rng,
    battle: Option<Battle>,
    state: BattleState,
    turn: u32,
    last_result: BattleResult,
}

impl fmt::Debug for Arena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("config", &self.config)
            .field("policy", &self.policy)
            .field("battle", &self.battle)
            .field("state", &self.state)
            .field("turn", &self.turn)
            .finish_non_exhaustive()
    }
}

impl Arena {
    /// Creates an idle arena with the default enemy policy.
    #[must_use]
    pub fn new(config: ArenaConfig) -> Self {
        Self::with_policy(config, Box::new(DesperationPolicy))
    }

    /// Creates an idle arena with a custom enemy policy.
    #[must_use]
    pub fn with_policy(config: ArenaConfig, policy: Box<dyn EnemyPolicy>) -> Self {
        let rng = config
            .seed
            .map_or_else(ChaCha8Rng::from_entropy, ChaCha8Rng::seed_from_u64);
        Self {
            resolver: CombatResolver::new(config.unarmed.clone()),
            config,
            policy,
            rng,
            battle: None,
            state: BattleState::NotStarted,
            turn: 0,
            last_result: BattleResult::default(),
        }
    }

    /// Starts a new battle, replacing any previous one.
    ///
    /// Both units are reset to their class-derived starting stats and the
    /// previous result is cleared.
    pub fn start(&mut self, mut player: Unit, mut enemy: Unit) {
        player.reset();
        enemy.reset();
        if self.state == BattleState::InProgress {
            tracing::warn!(turn = self.turn, "abandoning battle in progress");
        }
        tracing::info!(
            player = player.name(),
            player_class = %player.class(),
            enemy = enemy.name(),
            enemy_class = %enemy.class(),
            "battle started"
        );

        self.battle = Some(Battle { player, enemy });
        self.state = BattleState::InProgress;
        self.turn = 0;
        self.last_result = self.snapshot(Outcome::Ongoing, Vec::new());
    }

    /// Drops the current battle and returns to `NotStarted`.
    pub fn abandon(&mut self) {
        if self.state == BattleState::InProgress {
            tracing::info!(turn = self.turn, "battle abandoned");
        }
        self.battle = None;
        self.state = BattleState::NotStarted;
        self.turn = 0;
        self.last_result = BattleResult::default();
    }

    /// Player attacks with the equipped weapon; the enemy answers.
    pub fn hit(&mut self) -> BattleResult {
        self.play_round(Action::Hit)
    }

    /// Player uses the class skill; the enemy answers.
    pub fn use_skill(&mut self) -> BattleResult {
        self.play_round(Action::Skill)
    }

    /// Player passes; the enemy still acts.
    pub fn pass_turn(&mut self) -> BattleResult {
        self.play_round(Action::Pass)
    }

    /// The last result, without side effects.
    #[must_use]
    pub fn current_result(&self) -> &BattleResult {
        &self.last_result
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> BattleState {
        self.state
    }

    /// Returns `true` while the battle accepts actions.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state == BattleState::InProgress
    }

    /// Rounds resolved in the current battle.
    #[must_use]
    pub const fn turn(&self) -> u32 {
        self.turn
    }

    /// The player unit of the current or last battle.
    #[must_use]
    pub fn player(&self) -> Option<&Unit> {
        self.battle.as_ref().map(|b| &b.player)
    }

    /// The enemy unit of the current or last battle.
    #[must_use]
    pub fn enemy(&self) -> Option<&Unit> {
        self.battle.as_ref().map(|b| &b.enemy)
    }

    /// The configuration this arena was created with.
    #[must_use]
    pub const fn config(&self) -> &ArenaConfig {
        &self.config
    }

    #[cfg(test)]
    pub(crate) fn units_mut(&mut self) -> Option<(&mut Unit, &mut Unit)> {
        self.battle.as_mut().map(|b| (&mut b.player, &mut b.enemy))
    }

    fn play_round(&mut self, action: Action) -> BattleResult {
        if self.state != BattleState::InProgress {
            tracing::warn!(state = ?self.state, %action, "action outside a running battle ignored");
            return self.last_result.clone();
        }
        let Some(battle) = self.battle.as_mut() else {
            return self.last_result.clone();
        };

        self.turn += 1;
        let mut actions = Vec::with_capacity(2);

        let player_outcome = resolve(
            &self.resolver,
            action,
            &mut battle.player,
            &mut battle.enemy,
            &mut self.rng,
        );
        actions.push(player_outcome);

        if battle.enemy.is_alive() {
            let enemy_action = self
                .policy
                .choose(&battle.enemy, &battle.player, &self.resolver);
            let enemy_outcome = resolve(
                &self.resolver,
                enemy_action,
                &mut battle.enemy,
                &mut battle.player,
                &mut self.rng,
            );
            actions.push(enemy_outcome);
        }

        for unit in [&mut battle.player, &mut battle.enemy] {
            if unit.is_alive() {
                end_of_round(unit, self.config.stamina_per_round);
            }
        }

        let enemy_idle = actions
            .get(1)
            .map_or(true, |a| matches!(a.kind, ActionKind::Pass | ActionKind::Exhausted));
        let outcome = self.judge(enemy_idle);
        let mut narration: Vec<String> = actions.iter().map(|a| a.narration.clone()).collect();
        if let Some(line) = self.closing_line(outcome) {
            narration.push(line);
        }

        if outcome.is_final() {
            self.state = BattleState::Finished;
            tracing::info!(turn = self.turn, ?outcome, "battle finished");
        }

        let mut result = self.snapshot(outcome, narration);
        result.actions = actions;
        self.last_result = result.clone();
        result
    }

    /// Decides the round. Without regeneration, stamina only goes down, so
    /// an exhausted player facing an enemy that just stood idle is a
    /// stalemate: the enemy's policy sees the same or a weaker unit next
    /// round and idles again.
    fn judge(&self, enemy_idle: bool) -> Outcome {
        let Some(battle) = self.battle.as_ref() else {
            return Outcome::Ongoing;
        };
        if !battle.enemy.is_alive() {
            Outcome::PlayerWon
        } else if !battle.player.is_alive() {
            Outcome::EnemyWon
        } else if !self.config.regenerates()
            && !self.resolver.can_act(&battle.player)
            && (enemy_idle || !self.resolver.can_act(&battle.enemy))
        {
            Outcome::Draw
        } else {
            Outcome::Ongoing
        }
    }

    fn closing_line(&self, outcome: Outcome) -> Option<String> {
        let battle = self.battle.as_ref()?;
        match outcome {
            Outcome::Ongoing => None,
            Outcome::PlayerWon => Some(format!(
                "{} has fallen. {} wins the battle!",
                battle.enemy.name(),
                battle.player.name()
            )),
            Outcome::EnemyWon => Some(format!(
                "{} has fallen. {} wins the battle!",
                battle.player.name(),
                battle.enemy.name()
            )),
            Outcome::Draw => Some(
                "Both fighters are too exhausted to go on. The battle ends in a draw.".to_string(),
            ),
        }
    }

    fn snapshot(&self, outcome: Outcome, narration: Vec<String>) -> BattleResult {
        let state = if outcome.is_final() {
            BattleState::Finished
        } else {
            self.state
        };
        BattleResult {
            outcome,
            state,
            turn: self.turn,
            narration,
            actions: Vec::new(),
            player: self.player().map(UnitStatus::of),
            enemy: self.enemy().map(UnitStatus::of),
        }
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(ArenaConfig::default())
    }
}

/// Resolves one half-turn, turning a failed stamina check into a forced pass.
fn resolve(
    resolver: &CombatResolver,
    action: Action,
    actor: &mut Unit,
    target: &mut Unit,
    rng: &mut ChaCha8Rng,
) -> ActionOutcome {
    let attempt = match action {
        Action::Hit => resolver.basic_attack(actor, target, rng),
        Action::Skill => resolver.use_skill(actor, target, rng),
        Action::Pass => Ok(resolver.pass_turn(actor)),
    };
    let outcome = attempt.unwrap_or_else(|err| {
        tracing::debug!(unit = actor.name(), %action, %err, "forced pass");
        resolver.forced_pass(actor, action)
    });
    tracing::debug!(
        unit = actor.name(),
        kind = ?outcome.kind,
        damage = outcome.damage,
        "half-turn resolved"
    );
    outcome
}

/// Armor upkeep, then regeneration.
fn end_of_round(unit: &mut Unit, stamina_per_round: f64) {
    let upkeep = unit.armor().map_or(0.0, |armor| armor.stamina_per_turn);
    unit.drain_stamina(upkeep);
    let regen = stamina_per_round * unit.class().stamina_multiplier;
    unit.restore_stamina(regen);
}

// =============================================================================
// Tests
// =============================================================================
