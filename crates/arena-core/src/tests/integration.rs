//! Integration tests for full battles.
//!
//! These tests drive complete battles through the [`Arena`] and the
//! [`Session`], checking the behavior a front end relies on:
//! - Damage math against armor
//! - Exhaustion and forced passes
//! - Victory and the finished state
//! - Stats staying in bounds and battles always ending, whatever the gear
//!   and skill costs

use std::sync::Arc;

use proptest::prelude::*;

use crate::arena::Arena;
use crate::class::{ClassTable, Skill, SkillEffect};
use crate::config::ArenaConfig;
use crate::equipment::Catalog;
use crate::output::{Action, ActionKind, BattleResult, BattleState, Outcome, UnitStatus};
use crate::policy::{AlwaysHitPolicy, DesperationPolicy, EnemyPolicy};
use crate::session::{Combatant, Session};
use crate::unit::{Side, Unit};

use super::helpers::{armor, fixed_weapon, flat_class, test_classes, unit_of, BALANCED_CLASS};

fn catalog() -> Arc<Catalog> {
    Arc::new(Catalog::bundled().unwrap())
}

fn no_regen(seed: u64) -> ArenaConfig {
    ArenaConfig {
        stamina_per_round: 0.0,
        ..ArenaConfig::seeded(seed)
    }
}

fn assert_in_bounds(status: Option<&UnitStatus>) {
    let status = status.expect("battle snapshot has both units");
    assert!(status.health >= 0.0 && status.health <= status.max_health);
    assert!(status.stamina >= 0.0 && status.stamina <= status.max_stamina);
}

// =============================================================================
// Scripted Battles
// =============================================================================

#[test]
fn fixed_weapon_through_armor_deals_three_each_round() {
    let classes = test_classes();
    let mut player = unit_of(&classes, BALANCED_CLASS, Side::Player);
    player.equip_weapon(Some(Arc::new(fixed_weapon(5.0, 1.0))));
    let mut enemy = unit_of(&classes, BALANCED_CLASS, Side::Enemy);
    enemy.equip_armor(Some(Arc::new(armor(2.0, 0.0))));

    let mut arena = Arena::new(ArenaConfig::seeded(17));
    arena.start(player, enemy);

    for round in 1..=4 {
        let result = arena.hit();
        assert!((result.actions[0].damage - 3.0).abs() < 1e-9);
        let enemy = result.enemy.unwrap();
        assert!((enemy.health - (50.0 - 3.0 * f64::from(round))).abs() < 1e-9);
    }
}

#[test]
fn exhausted_player_hit_is_a_pass_and_enemy_still_acts() {
    let classes = test_classes();
    let mut arena = Arena::with_policy(no_regen(3), Box::new(AlwaysHitPolicy));
    arena.start(
        unit_of(&classes, BALANCED_CLASS, Side::Player),
        unit_of(&classes, BALANCED_CLASS, Side::Enemy),
    );
    if let Some((player, _)) = arena.units_mut() {
        player.set_health(10.0);
        player.set_stamina(0.0);
    }

    let result = arena.hit();

    assert_eq!(result.actions.len(), 2);
    assert_eq!(result.actions[0].kind, ActionKind::Exhausted);
    assert_eq!(result.actions[0].damage, 0.0);
    assert!(result.narration[0].contains("too exhausted"));
    assert_eq!(result.actions[1].side, Side::Enemy);
    assert_eq!(result.actions[1].kind, ActionKind::Hit);
    assert_eq!(result.enemy.unwrap().health, 50.0);
    assert!(result.player.unwrap().health < 10.0);
}

#[test]
fn killing_the_enemy_finishes_the_battle() {
    let classes = test_classes();
    let mut player = unit_of(&classes, "brute", Side::Player);
    player.equip_weapon(Some(Arc::new(fixed_weapon(10.0, 1.0))));

    let mut arena = Arena::new(ArenaConfig::seeded(8));
    arena.start(player, unit_of(&classes, BALANCED_CLASS, Side::Enemy));

    // 20 damage per hit against 50 health
    arena.hit();
    arena.hit();
    let result = arena.hit();

    assert_eq!(result.outcome, Outcome::PlayerWon);
    assert_eq!(result.state, BattleState::Finished);
    assert_eq!(result.enemy.unwrap().health, 0.0);
    assert_eq!(arena.state(), BattleState::Finished);
}

#[test]
fn current_result_is_idempotent() {
    let mut session = Session::new(
        catalog(),
        Arc::new(ClassTable::standard()),
        ArenaConfig::seeded(2),
    );
    session
        .choose_player(&Combatant::new("Ayla", "rogue").weapon("sword"))
        .unwrap();
    session
        .choose_enemy(&Combatant::new("Grub", "warrior").armor("chainmail"))
        .unwrap();
    session.start_fight().unwrap();
    session.use_skill();

    let first = session.current_result().clone();
    let second = session.current_result().clone();
    assert_eq!(first, second);
}

#[test]
fn requests_outside_a_battle_return_the_stored_result() {
    let mut arena = Arena::new(ArenaConfig::seeded(1));
    assert_eq!(arena.pass_turn(), BattleResult::default());

    let classes = test_classes();
    let mut player = unit_of(&classes, BALANCED_CLASS, Side::Player);
    player.equip_weapon(Some(Arc::new(fixed_weapon(100.0, 1.0))));
    arena.start(player, unit_of(&classes, BALANCED_CLASS, Side::Enemy));
    let finished = arena.hit();

    assert_eq!(arena.use_skill(), finished);
    assert_eq!(arena.current_result(), &finished);
}

#[test]
fn standard_classes_fight_to_a_decision() {
    let mut session = Session::new(
        catalog(),
        Arc::new(ClassTable::standard()),
        ArenaConfig::seeded(99),
    );
    session
        .choose_player(&Combatant::new("Ayla", "mage").weapon("staff").armor("leather"))
        .unwrap();
    session
        .choose_enemy(&Combatant::new("Grub", "rogue").weapon("dagger").armor("tunic"))
        .unwrap();
    session.start_fight().unwrap();

    let mut rounds = 0;
    while session.arena().is_running() {
        let result = if rounds % 4 == 3 {
            session.use_skill()
        } else {
            session.hit()
        };
        assert_in_bounds(result.player.as_ref());
        assert_in_bounds(result.enemy.as_ref());
        rounds += 1;
        assert!(rounds < 1_000, "battle did not end");
    }
    assert!(matches!(
        session.current_result().outcome,
        Outcome::PlayerWon | Outcome::EnemyWon
    ));
}

// =============================================================================
// Properties
// =============================================================================

const CLASSES: [&str; 3] = ["warrior", "rogue", "mage"];

fn gear(names: &[String], pick: usize) -> Option<String> {
    // one extra slot means "nothing equipped"
    names.get(pick % (names.len() + 1)).cloned()
}

fn combatant(catalog: &Catalog, name: &str, picks: (usize, usize, usize)) -> Combatant {
    let weapons: Vec<String> = catalog.weapon_names().into_iter().map(String::from).collect();
    let armors: Vec<String> = catalog.armor_names().into_iter().map(String::from).collect();
    Combatant {
        name: name.into(),
        class: CLASSES[picks.0 % CLASSES.len()].into(),
        weapon: gear(&weapons, picks.1),
        armor: gear(&armors, picks.2),
    }
}

proptest! {
    #[test]
    fn stats_stay_in_bounds_and_battles_end(
        seed in any::<u64>(),
        player_picks in (0usize..3, 0usize..6, 0usize..5),
        enemy_picks in (0usize..3, 0usize..6, 0usize..5),
        script in prop::collection::vec(0u8..3, 0..60),
    ) {
        let catalog = catalog();
        let mut session = Session::new(
            Arc::clone(&catalog),
            Arc::new(ClassTable::standard()),
            no_regen(seed),
        );
        session.choose_player(&combatant(&catalog, "Ayla", player_picks)).unwrap();
        session.choose_enemy(&combatant(&catalog, "Grub", enemy_picks)).unwrap();
        session.start_fight().unwrap();

        let scripted = script.iter().map(|&step| match step {
            0 => Action::Hit,
            1 => Action::Skill,
            _ => Action::Pass,
        });
        // Without regeneration every hit spends stamina, so a long enough
        // run of hits always reaches a decision or a draw.
        let tail = std::iter::repeat(Action::Hit).take(500);

        for action in scripted.chain(tail) {
            if !session.arena().is_running() {
                break;
            }
            let result = match action {
                Action::Hit => session.hit(),
                Action::Skill => session.use_skill(),
                Action::Pass => session.pass_turn(),
            };
            for status in [result.player.as_ref(), result.enemy.as_ref()] {
                let status = status.unwrap();
                prop_assert!(status.health >= 0.0);
                prop_assert!(status.stamina >= 0.0);
                prop_assert!(status.health <= status.max_health);
                prop_assert!(status.stamina <= status.max_stamina);
            }
        }

        prop_assert!(!session.arena().is_running());
        prop_assert!(session.current_result().outcome.is_final());
    }
}

// =============================================================================
// Termination With Arbitrary Costs
// =============================================================================

/// Gear and class numbers for one side of a generated battle.
#[derive(Debug, Clone)]
struct Loadout {
    weapon_damage: f64,
    weapon_cost: f64,
    defence: f64,
    upkeep: f64,
    skill_cost: f64,
    effect: SkillEffect,
}

impl Loadout {
    fn unit(&self, side: Side) -> Unit {
        let class = flat_class(
            "generated",
            1.0,
            Skill {
                name: "Generated Skill".into(),
                stamina_cost: self.skill_cost,
                effect: self.effect,
            },
        );
        let classes = ClassTable::new(vec![class]);
        let mut unit = unit_of(&classes, "generated", side);
        unit.equip_weapon(Some(Arc::new(fixed_weapon(self.weapon_damage, self.weapon_cost))));
        unit.equip_armor(Some(Arc::new(armor(self.defence, self.upkeep))));
        unit
    }
}

fn tenths(range: std::ops::Range<u32>) -> impl Strategy<Value = f64> {
    range.prop_map(|t| f64::from(t) / 10.0)
}

fn skill_effect() -> impl Strategy<Value = SkillEffect> {
    prop_oneof![
        tenths(10..40).prop_map(|multiplier| SkillEffect::Empowered { multiplier }),
        tenths(10..200).prop_map(|amount| SkillEffect::Heal { amount }),
        tenths(10..100).prop_map(|amount| SkillEffect::Drain { amount }),
    ]
}

fn loadout() -> impl Strategy<Value = Loadout> {
    (
        tenths(0..150),
        tenths(5..400),
        tenths(0..120),
        tenths(0..30),
        tenths(5..400),
        skill_effect(),
    )
        .prop_map(
            |(weapon_damage, weapon_cost, defence, upkeep, skill_cost, effect)| Loadout {
                weapon_damage,
                weapon_cost,
                defence,
                upkeep,
                skill_cost,
                effect,
            },
        )
}

/// Plays `script`, then alternates hits and skills, until the battle ends or
/// `max_rounds` have been played. Returns the rounds played.
fn play_until_finished(arena: &mut Arena, script: &[Action], max_rounds: usize) -> usize {
    let tail = [Action::Hit, Action::Skill].into_iter().cycle();
    let mut rounds = 0;
    for action in script.iter().copied().chain(tail).take(max_rounds) {
        if !arena.is_running() {
            break;
        }
        let result = match action {
            Action::Hit => arena.hit(),
            Action::Skill => arena.use_skill(),
            Action::Pass => arena.pass_turn(),
        };
        assert_in_bounds(result.player.as_ref());
        assert_in_bounds(result.enemy.as_ref());
        rounds += 1;
    }
    rounds
}

fn policy(desperate: bool) -> Box<dyn EnemyPolicy> {
    if desperate {
        Box::new(DesperationPolicy)
    } else {
        Box::new(AlwaysHitPolicy)
    }
}

#[test]
fn battles_end_when_the_enemy_can_only_afford_its_skill() {
    let player = Loadout {
        weapon_damage: 1.0,
        weapon_cost: 1.0,
        defence: 0.0,
        upkeep: 0.0,
        skill_cost: 3.0,
        effect: SkillEffect::Empowered { multiplier: 1.5 },
    };
    let enemy = Loadout {
        weapon_damage: 5.0,
        weapon_cost: 30.0,
        defence: 10.0,
        ..player.clone()
    };

    for desperate in [true, false] {
        let mut arena = Arena::with_policy(no_regen(1), policy(desperate));
        arena.start(player.unit(Side::Player), enemy.unit(Side::Enemy));

        play_until_finished(&mut arena, &[], 10_000);

        assert!(!arena.is_running(), "desperate enemy: {desperate}");
        let expected = if desperate {
            Outcome::EnemyWon
        } else {
            Outcome::Draw
        };
        assert_eq!(arena.current_result().outcome, expected);
    }
}

proptest! {
    #[test]
    fn battles_end_whatever_the_costs(
        seed in any::<u64>(),
        player in loadout(),
        enemy in loadout(),
        desperate in any::<bool>(),
        script in prop::collection::vec(
            prop_oneof![Just(Action::Hit), Just(Action::Skill), Just(Action::Pass)],
            0..40,
        ),
    ) {
        let mut arena = Arena::with_policy(no_regen(seed), policy(desperate));
        arena.start(player.unit(Side::Player), enemy.unit(Side::Enemy));

        // every action costs at least half a point out of 50 total stamina
        let rounds = play_until_finished(&mut arena, &script, 1_000);

        prop_assert!(!arena.is_running(), "still running after {} rounds", rounds);
        prop_assert!(arena.current_result().outcome.is_final());
        prop_assert_eq!(arena.current_result().state, BattleState::Finished);
    }
}
