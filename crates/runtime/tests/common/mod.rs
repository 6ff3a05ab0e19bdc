#![allow(dead_code)]

use sim_core::{
    CharacterConfig, CombatConfig, ConfigTable, GameEvent, GameObjectKind, HitpointConfig, Level,
    MonsterCombatConfig, MonsterConfig, MovementConfig, ObjectRecord, PlayerInput, TileMap,
    TileState,
};

/// Melee fighter: 6-tick windup, half-second cooldown.
pub fn character(id: u32) -> CharacterConfig {
    CharacterConfig {
        id,
        name: "hero".into(),
        movement: MovementConfig {
            speed: 3.0,
            acceleration: 100.0,
            deceleration: 100.0,
            dash_speed: 9.0,
            dash_deceleration: 10.0,
        },
        combat: CombatConfig {
            attack_delay: 0.5,
            attack_loading_time: 0.1,
            shoot_damage: 2,
            shoot_radius: 1.5,
            ..CombatConfig::default()
        },
        hitpoint: HitpointConfig {
            max: 10,
            ..HitpointConfig::default()
        },
    }
}

/// Ranged fighter: instant windup, projectile flies 6 units over a second.
pub fn archer(id: u32) -> CharacterConfig {
    let mut config = character(id);
    config.combat = CombatConfig {
        attack_delay: 1.0,
        attack_loading_time: 0.0,
        shoot_damage: 2,
        shoot_radius: 0.5,
        projectile_id: Some(9),
        projectile_speed: 6.0,
        projectile_lifetime: 1.0,
        ..CombatConfig::default()
    };
    config
}

/// A monster that never moves and never alerts; pure target practice.
pub fn still_monster(id: u32, max_hitpoints: i32) -> MonsterConfig {
    MonsterConfig {
        id,
        name: "dummy".into(),
        movement: MovementConfig {
            speed: 0.0,
            acceleration: 0.0,
            deceleration: 0.0,
            ..MovementConfig::default()
        },
        combat: MonsterCombatConfig {
            combat: CombatConfig {
                attack_delay: 1.0,
                attack_loading_time: 0.2,
                shoot_damage: 1,
                shoot_radius: 1.0,
                ..CombatConfig::default()
            },
            alert_in_radius: 0.0,
            alert_out_radius: 0.0,
            patrol_radius: 2.0,
        },
        hitpoint: HitpointConfig {
            max: max_hitpoints,
            ..HitpointConfig::default()
        },
        is_boss: false,
    }
}

/// A melee monster that chases anything inside its alert radius.
pub fn chaser_monster(id: u32) -> MonsterConfig {
    MonsterConfig {
        id,
        name: "stalker".into(),
        movement: MovementConfig {
            speed: 2.0,
            acceleration: 50.0,
            deceleration: 50.0,
            ..MovementConfig::default()
        },
        combat: MonsterCombatConfig {
            combat: CombatConfig {
                attack_delay: 1.0,
                attack_loading_time: 0.2,
                shoot_damage: 1,
                shoot_radius: 0.5,
                ..CombatConfig::default()
            },
            alert_in_radius: 10.0,
            alert_out_radius: 14.0,
            patrol_radius: 3.0,
        },
        hitpoint: HitpointConfig {
            max: 5,
            ..HitpointConfig::default()
        },
        is_boss: false,
    }
}

/// A 32x32 level with every tile walkable.
pub fn open_level(configs: ConfigTable) -> Level {
    let mut level = Level::new(1, 32, 32, 1, configs);
    let buffer = vec![
        TileState::TERRAIN.bits() | (TileState::TERRAIN.bits() << 4);
        TileMap::packed_len(32, 32)
    ];
    level.set_sub_tiles(buffer, 32, 32, 1).unwrap();
    level
}

pub fn blank_record(kind: GameObjectKind, config_id: u32) -> ObjectRecord {
    ObjectRecord {
        id: 1,
        kind,
        config_id,
        position: [0.0, 0.0],
        direction: 0.0,
        freeze_patrol: false,
        patrol_points: Vec::new(),
        patrol_end_rollback_delay: 0.0,
        drops: Vec::new(),
        opened: false,
        area: [0.0; 4],
        auto_reset: false,
        triggered: false,
    }
}

/// Runs `ticks` updates and returns each tick's drained events separately.
pub fn run_batches(level: &mut Level, ticks: u32, input: &PlayerInput) -> Vec<Vec<GameEvent>> {
    (0..ticks)
        .map(|_| {
            level.update(input);
            level.drain_events()
        })
        .collect()
}

/// Runs `ticks` updates and returns the events flattened in order.
pub fn run(level: &mut Level, ticks: u32, input: &PlayerInput) -> Vec<GameEvent> {
    run_batches(level, ticks, input).into_iter().flatten().collect()
}

pub fn attack_input(direction: f32) -> PlayerInput {
    PlayerInput {
        attack_direction: Some(direction),
        ..PlayerInput::NONE
    }
}
