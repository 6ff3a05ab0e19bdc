//! Input-driven movement against level geometry: wall blocking, axis
//! sliding and the dash cooldown.

mod common;

use common::*;
use glam::Vec2;
use sim_core::{ConfigTable, GameObjectId, GameObjectKind, Level, PlayerInput, TICK_DELTA, TileState};

fn level_with_player(at: Vec2) -> (Level, GameObjectId) {
    let configs = ConfigTable {
        characters: vec![character(1)],
        ..ConfigTable::default()
    };
    let mut level = open_level(configs);
    let player = level.spawn(GameObjectKind::Character, 1, at).unwrap();
    level.drain_events();
    (level, player)
}

#[test]
fn a_wall_stops_eastward_movement() {
    let (mut level, player) = level_with_player(Vec2::new(8.5, 8.5));
    level
        .set_tile_state(Vec2::new(9.0, 8.0), TileState::TERRAIN | TileState::OBJECT)
        .unwrap();

    let east = PlayerInput {
        axis: Vec2::new(1.0, 0.0),
        ..PlayerInput::NONE
    };
    run(&mut level, 60, &east);

    let position = level.objects().get(player).unwrap().position;
    assert!(position.x > 8.5, "player should approach the wall");
    assert!(position.x < 9.0, "player must not enter the blocked tile");
    assert_eq!(position.y, 8.5);
}

#[test]
fn a_blocked_axis_slides_along_the_wall() {
    let (mut level, player) = level_with_player(Vec2::new(8.5, 8.5));
    for y in 0..32 {
        level
            .set_tile_state(
                Vec2::new(9.0, y as f32),
                TileState::TERRAIN | TileState::OBJECT,
            )
            .unwrap();
    }

    let north_east = PlayerInput {
        axis: Vec2::new(1.0, 1.0),
        ..PlayerInput::NONE
    };
    run(&mut level, 120, &north_east);

    let position = level.objects().get(player).unwrap().position;
    assert!(position.x < 9.0);
    assert!(position.y > 11.0, "movement should continue along the wall");
}

#[test]
fn dash_entry_tick_moves_at_full_dash_speed() {
    let (mut level, player) = level_with_player(Vec2::new(4.0, 8.0));
    let dash_east = PlayerInput {
        axis: Vec2::new(1.0, 0.0),
        dash: true,
        ..PlayerInput::NONE
    };
    level.update(&dash_east);
    level.drain_events();

    // Deceleration only kicks in on the tick after the dash starts.
    let position = level.objects().get(player).unwrap().position;
    let expected = 4.0 + 9.0 * TICK_DELTA;
    assert!((position.x - expected).abs() < 1e-5);
}

#[test]
fn dash_cooldown_swallows_an_early_second_dash() {
    let run_with_dashes = |dash_ticks: &[u32]| {
        let (mut level, player) = level_with_player(Vec2::new(4.0, 8.0));
        for tick in 0..160 {
            let input = PlayerInput {
                axis: Vec2::new(1.0, 0.0),
                dash: dash_ticks.contains(&tick),
                ..PlayerInput::NONE
            };
            level.update(&input);
            level.drain_events();
        }
        level.objects().get(player).unwrap().position.x
    };

    let single = run_with_dashes(&[0]);
    // Pressing dash again 0.5 s in lands inside the 1.5 s cooldown.
    let early_retry = run_with_dashes(&[0, 30]);
    // Once the cooldown has elapsed, the second dash carries the player farther.
    let late_retry = run_with_dashes(&[0, 100]);

    assert_eq!(single, early_retry);
    assert!(late_retry > single);
}
