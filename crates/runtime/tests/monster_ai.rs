//! Monster alerting and chasing, plus the AI movement repath behavior.

mod common;

use common::*;
use glam::Vec2;
use sim_core::object::component::AiMovement;
use sim_core::{
    ConfigTable, GameEvent, GameObjectKind, MovementConfig, PathFinder, PlayerInput, TileMap,
    TileState,
};

#[test]
fn keeps_previous_route_when_repath_fails() {
    let mut map = TileMap::new(16, 16, 1);
    for x in 0..16 {
        for y in 0..16 {
            map.set_sub_tile(x, y, TileState::TERRAIN).unwrap();
        }
    }
    map.set_sub_tile(12, 8, TileState::TERRAIN | TileState::OBJECT)
        .unwrap();
    let finder = PathFinder::new(&map);

    let mut ai = AiMovement::new(MovementConfig {
        speed: 2.0,
        acceleration: 50.0,
        deceleration: 50.0,
        ..MovementConfig::default()
    });
    ai.move_to(Vec2::new(2.5, 8.5), &finder, Vec2::new(10.5, 8.5));
    assert!(ai.is_moving());

    // Repathing into the blocked cell fails; the old route survives.
    ai.move_to(Vec2::new(2.5, 8.5), &finder, Vec2::new(12.5, 8.5));
    assert!(ai.is_moving());

    ai.stop();
    assert!(!ai.is_moving());
}

#[test]
fn monster_alerts_and_closes_on_the_player() {
    let mut sturdy = character(1);
    sturdy.hitpoint.max = 100;
    let configs = ConfigTable {
        characters: vec![sturdy],
        monsters: vec![chaser_monster(2)],
        ..ConfigTable::default()
    };
    let mut level = open_level(configs);
    let player = level
        .spawn(GameObjectKind::Character, 1, Vec2::new(8.0, 8.0))
        .unwrap();
    let monster = level
        .spawn(GameObjectKind::Monster, 2, Vec2::new(14.0, 8.0))
        .unwrap();
    level.drain_events();

    let events = run(&mut level, 600, &PlayerInput::NONE);

    let combat = level
        .objects()
        .get(monster)
        .unwrap()
        .components
        .monster_combat()
        .unwrap();
    assert!(combat.is_alerted());

    let player_position = level.objects().get(player).unwrap().position;
    let monster_position = level.objects().get(monster).unwrap().position;
    assert!(monster_position.distance(player_position) < 2.0);

    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::Damage { id, .. } if *id == player)));
}

#[test]
fn distant_monster_stays_unalerted() {
    let configs = ConfigTable {
        characters: vec![character(1)],
        monsters: vec![chaser_monster(2)],
        ..ConfigTable::default()
    };
    let mut level = open_level(configs);
    level
        .spawn(GameObjectKind::Character, 1, Vec2::new(4.0, 4.0))
        .unwrap();
    let monster = level
        .spawn(GameObjectKind::Monster, 2, Vec2::new(28.0, 28.0))
        .unwrap();
    level.drain_events();

    let events = run(&mut level, 120, &PlayerInput::NONE);

    let combat = level
        .objects()
        .get(monster)
        .unwrap()
        .components
        .monster_combat()
        .unwrap();
    assert!(!combat.is_alerted());
    assert!(!events
        .iter()
        .any(|e| matches!(e, GameEvent::PrepareAttack { .. })));
}

#[test]
fn idle_patrol_replays_identically() {
    let build = || {
        let configs = ConfigTable {
            characters: vec![character(1)],
            monsters: vec![chaser_monster(2)],
            ..ConfigTable::default()
        };
        let mut level = open_level(configs);
        // Inside patrol-activity range but outside the alert radius.
        level
            .spawn(GameObjectKind::Character, 1, Vec2::new(8.0, 8.0))
            .unwrap();
        level
            .spawn(GameObjectKind::Monster, 2, Vec2::new(20.0, 8.0))
            .unwrap();
        level.drain_events();
        level
    };

    let mut a = build();
    let mut b = build();
    run(&mut a, 600, &PlayerInput::NONE);
    run(&mut b, 600, &PlayerInput::NONE);

    assert_eq!(a.save(), b.save());
    let moved = a
        .objects()
        .iter()
        .find(|object| object.kind() == GameObjectKind::Monster)
        .unwrap()
        .position;
    assert_ne!(moved, Vec2::new(20.0, 8.0));
}
