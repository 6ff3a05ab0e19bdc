//! Attack windup, melee sweeps, projectiles and corpse despawn, driven
//! through whole-level updates.

mod common;

use common::*;
use glam::Vec2;
use sim_core::{ChestConfig, ConfigTable, GameEvent, GameObjectKind, PlayerInput};

#[test]
fn windup_delays_the_attack_resolution() {
    let configs = ConfigTable {
        characters: vec![character(1)],
        monsters: vec![still_monster(2, 30)],
        ..ConfigTable::default()
    };
    let mut level = open_level(configs);
    let player = level
        .spawn(GameObjectKind::Character, 1, Vec2::new(8.0, 8.0))
        .unwrap();
    let monster = level
        .spawn(GameObjectKind::Monster, 2, Vec2::new(9.0, 8.0))
        .unwrap();
    level.drain_events();

    let first = run(&mut level, 1, &attack_input(0.0));
    assert!(first
        .iter()
        .any(|e| matches!(e, GameEvent::PrepareAttack { id } if *id == player)));
    assert!(!first.iter().any(|e| matches!(e, GameEvent::Attack { .. })));

    // A 0.1 s windup is six ticks; the attack lands on the seventh.
    let during_windup = run(&mut level, 5, &PlayerInput::NONE);
    assert!(!during_windup
        .iter()
        .any(|e| matches!(e, GameEvent::Attack { .. })));

    let resolve = run(&mut level, 1, &PlayerInput::NONE);
    assert!(resolve
        .iter()
        .any(|e| matches!(e, GameEvent::Attack { id } if *id == player)));
    assert!(resolve
        .iter()
        .any(|e| matches!(e, GameEvent::Damage { id, amount: 2 } if *id == monster)));
}

#[test]
fn melee_ignores_same_team_and_neutral_objects() {
    let configs = ConfigTable {
        characters: vec![character(1)],
        chests: vec![ChestConfig {
            id: 5,
            name: "stash".into(),
        }],
        ..ConfigTable::default()
    };
    let mut level = open_level(configs);
    level
        .spawn(GameObjectKind::Character, 1, Vec2::new(8.0, 8.0))
        .unwrap();
    level
        .spawn(GameObjectKind::Character, 1, Vec2::new(9.0, 8.0))
        .unwrap();
    level
        .spawn(GameObjectKind::Chest, 5, Vec2::new(8.5, 8.0))
        .unwrap();
    level.drain_events();

    let mut events = run(&mut level, 1, &attack_input(0.0));
    events.extend(run(&mut level, 10, &PlayerInput::NONE));
    assert!(events.iter().any(|e| matches!(e, GameEvent::Attack { .. })));
    assert!(!events.iter().any(|e| matches!(e, GameEvent::Damage { .. })));
}

#[test]
fn killed_monster_lingers_then_despawns() {
    let mut strong = character(1);
    strong.combat.shoot_damage = 50;
    strong.combat.attack_loading_time = 0.0;
    let configs = ConfigTable {
        characters: vec![strong],
        monsters: vec![still_monster(2, 3)],
        ..ConfigTable::default()
    };
    let mut level = open_level(configs);
    level
        .spawn(GameObjectKind::Character, 1, Vec2::new(8.0, 8.0))
        .unwrap();
    let monster = level
        .spawn(GameObjectKind::Monster, 2, Vec2::new(9.0, 8.0))
        .unwrap();
    level.drain_events();

    let death_tick = run(&mut level, 1, &attack_input(0.0));
    assert!(death_tick
        .iter()
        .any(|e| matches!(e, GameEvent::Death { id, kind: GameObjectKind::Monster } if *id == monster)));

    // The corpse lingers for 0.75 s before the removal lands.
    run(&mut level, 43, &PlayerInput::NONE);
    assert!(level.objects().contains(monster));

    let last = run(&mut level, 1, &PlayerInput::NONE);
    assert!(!level.objects().contains(monster));
    assert!(last
        .iter()
        .any(|e| matches!(e, GameEvent::Removed { id, .. } if *id == monster)));
}

#[test]
fn projectile_flies_and_is_consumed_on_hit() {
    let configs = ConfigTable {
        characters: vec![archer(1)],
        monsters: vec![still_monster(2, 30)],
        ..ConfigTable::default()
    };
    let mut level = open_level(configs);
    level
        .spawn(GameObjectKind::Character, 1, Vec2::new(8.0, 8.0))
        .unwrap();
    let monster = level
        .spawn(GameObjectKind::Monster, 2, Vec2::new(9.95, 8.0))
        .unwrap();
    level.drain_events();

    let mut events = run(&mut level, 1, &attack_input(0.0));
    events.extend(run(&mut level, 59, &PlayerInput::NONE));

    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::Spawned { kind: GameObjectKind::Projectile, .. })));
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::Damage { id, amount: 2 } if *id == monster)));
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::Removed { kind: GameObjectKind::Projectile, .. })));

    let hitpoints = level
        .objects()
        .get(monster)
        .unwrap()
        .components
        .hitpoint()
        .unwrap()
        .current();
    assert_eq!(hitpoints, 28);
    assert!(level
        .objects()
        .iter()
        .all(|object| object.kind() != GameObjectKind::Projectile));
}

#[test]
fn missed_projectile_expires_at_end_of_flight() {
    let configs = ConfigTable {
        characters: vec![archer(1)],
        ..ConfigTable::default()
    };
    let mut level = open_level(configs);
    level
        .spawn(GameObjectKind::Character, 1, Vec2::new(8.0, 8.0))
        .unwrap();
    level.drain_events();

    let mut events = run(&mut level, 1, &attack_input(0.0));
    events.extend(run(&mut level, 70, &PlayerInput::NONE));

    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::Removed { kind: GameObjectKind::Projectile, .. })));
    assert!(!events.iter().any(|e| matches!(e, GameEvent::Damage { .. })));
    assert!(level
        .objects()
        .iter()
        .all(|object| object.kind() != GameObjectKind::Projectile));
}
