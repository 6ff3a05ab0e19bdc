//! Monster combat: base combat plus alerting, chasing and patrolling.

use arrayvec::ArrayVec;
use glam::Vec2;

use crate::config::MonsterCombatConfig;
use crate::object::component::Combat;
use crate::object::{GameObject, GameObjectId, NEUTRAL_TEAM, UpdateCtx};
use crate::rng::Pcg;
use crate::time::ticks;

const ALERT_CHECK_SECONDS: f32 = 1.0;
const PATROL_STAY_SECONDS: f32 = 2.5;
const AI_FREEZE_SECONDS: f32 = 1.0;
const NUM_PATROL_POINTS: usize = 4;
/// Patrolling is skipped entirely while no enemy is anywhere near; sleeping
/// monsters on the far side of the map cost nothing.
const PATROL_ACTIVITY_RADIUS: f32 = 25.0;
/// Squared distance at which a patrol point counts as reached.
const ON_POINT_DISTANCE_SQUARED: f32 = 0.1;

/// Embeds a [`Combat`] and drives it with simple AI.
///
/// Alerting runs on a one-second check with in/out radius hysteresis. With a
/// target, the monster closes to a standoff distance and attacks when in
/// range, then freezes briefly. Without one, it wanders a shuffled ring of
/// patrol points around its spawn.
#[derive(Clone, Debug)]
pub struct MonsterCombat {
    combat: Combat,
    alert_in_radius: f32,
    alert_out_radius: f32,
    patrol_radius: f32,
    alerted: bool,
    target: Option<GameObjectId>,
    target_position: Vec2,
    alert_check: u32,
    patrol_points: Option<ArrayVec<Vec2, NUM_PATROL_POINTS>>,
    patrol_index: Option<usize>,
    patrol_stay: u32,
    freeze: u32,
}

impl MonsterCombat {
    pub fn new(config: MonsterCombatConfig) -> Self {
        Self {
            combat: Combat::new(config.combat),
            alert_in_radius: config.alert_in_radius,
            alert_out_radius: config.alert_out_radius,
            patrol_radius: config.patrol_radius,
            alerted: false,
            target: None,
            target_position: Vec2::ZERO,
            alert_check: 0,
            patrol_points: None,
            patrol_index: None,
            patrol_stay: 0,
            freeze: 0,
        }
    }

    pub fn is_alerted(&self) -> bool {
        self.alerted
    }

    pub fn can_attack(&self) -> bool {
        self.combat.can_attack()
    }

    /// Collapses the patrol ring to the given position. The monster stands
    /// still until alerted; the flag survives save/load.
    pub fn freeze_patrol(&mut self, position: Vec2) {
        let mut points = ArrayVec::new();
        points.push(position);
        self.patrol_points = Some(points);
        self.patrol_index = Some(0);
    }

    pub fn is_patrol_frozen(&self) -> bool {
        self.patrol_points
            .as_ref()
            .is_some_and(|points| points.len() == 1)
    }

    /// Effective reach of one attack. For ranged configs the projectile
    /// travel is folded in with a tuning factor inherited from the original
    /// balancing, kept as-is.
    fn attack_range(&self) -> f32 {
        let config = self.combat.config();
        let mut range = config.shoot_radius;
        if config.projectile_id.is_some() {
            range += config.projectile_speed * config.projectile_lifetime * 0.1;
        }
        range
    }

    pub(crate) fn update(&mut self, parent: &mut GameObject, ctx: &mut UpdateCtx<'_>) {
        self.combat.update(parent, ctx);

        if !parent.alive() {
            return;
        }

        if self.freeze > 0 {
            self.freeze -= 1;
            if self.freeze > 0 {
                return;
            }
        }

        if self.patrol_points.is_none() {
            self.calculate_patrol_points(parent, ctx);
        }

        self.check_alert(parent, ctx);
        self.check_attack(parent, ctx);
        self.check_patrol(parent, ctx);
    }

    fn check_alert(&mut self, parent: &mut GameObject, ctx: &mut UpdateCtx<'_>) {
        self.alert_check = self.alert_check.saturating_sub(1);
        if self.alert_check > 0 {
            return;
        }
        self.alert_check = ticks(ALERT_CHECK_SECONDS);

        let radius = if self.alerted {
            self.alert_out_radius
        } else {
            self.alert_in_radius
        };
        match find_enemy_in_radius(parent, ctx, radius) {
            Some(enemy) => {
                self.alerted = true;
                self.set_target(parent, ctx, Some(enemy));
            }
            None => {
                self.alerted = false;
                self.set_target(parent, ctx, None);
            }
        }
    }

    fn set_target(
        &mut self,
        parent: &mut GameObject,
        ctx: &mut UpdateCtx<'_>,
        target: Option<GameObjectId>,
    ) {
        if target.is_none() && self.target.is_none() {
            return;
        }
        self.target = target;

        match target {
            Some(id) => {
                self.target_position = ctx
                    .objects
                    .get(id)
                    .map(|object| object.position)
                    .unwrap_or(parent.position);
                let destination = self.best_attack_position(parent.position);
                let from = parent.position;
                if let Some(ai) = parent.components.ai_movement_mut() {
                    ai.move_to(from, ctx.path_finder, destination);
                }
            }
            None => {
                // Target lost: rejoin the patrol at its closest point.
                self.patrol_stay = ticks(PATROL_STAY_SECONDS);
                self.patrol_index = self.closest_patrol_point(parent.position);
                self.move_to_patrol_point(parent, ctx);
            }
        }
    }

    /// Standoff point: stop short of the target by 3/4 of the attack range,
    /// or hold position when already inside it.
    fn best_attack_position(&self, from: Vec2) -> Vec2 {
        let delta = self.target_position - from;
        let distance = delta.length() - self.attack_range() * 0.75;
        if distance <= 0.0 {
            return from;
        }
        from + delta.normalize() * distance
    }

    fn check_attack(&mut self, parent: &mut GameObject, ctx: &mut UpdateCtx<'_>) {
        let Some(target_id) = self.target else {
            return;
        };
        if !self.combat.can_attack() {
            return;
        }
        let Some(target) = ctx.objects.get(target_id) else {
            return;
        };

        let from = parent.position;
        let to = target.position;
        let reach = self.attack_range() * 1.25;
        if from.distance_squared(to) <= reach * reach {
            let delta = to - from;
            let direction = delta.y.atan2(delta.x);
            if let Some(ai) = parent.components.ai_movement_mut() {
                ai.stop();
            }
            self.combat.prepare_attack(parent, ctx.events, direction);
            self.freeze = ticks(AI_FREEZE_SECONDS);
        }
    }

    fn check_patrol(&mut self, parent: &mut GameObject, ctx: &mut UpdateCtx<'_>) {
        if self.alerted {
            return;
        }
        if find_enemy_in_radius(parent, ctx, PATROL_ACTIVITY_RADIUS).is_none() {
            return;
        }
        let points = self.patrol_points.clone().unwrap_or_default();
        if points.is_empty() {
            return;
        }

        if let Some(index) = self.patrol_index {
            if parent.position.distance_squared(points[index]) <= ON_POINT_DISTANCE_SQUARED {
                self.patrol_stay = self.patrol_stay.saturating_sub(1);
                if self.patrol_stay > 0 {
                    return;
                }
            } else {
                return;
            }
        }

        self.patrol_stay = ticks(PATROL_STAY_SECONDS);
        let next = self
            .patrol_index
            .map(|index| (index + 1) % points.len())
            .unwrap_or(0);
        self.patrol_index = Some(next);
        self.move_to_patrol_point(parent, ctx);
    }

    fn move_to_patrol_point(&mut self, parent: &mut GameObject, ctx: &mut UpdateCtx<'_>) {
        let Some(index) = self.patrol_index else {
            return;
        };
        let Some(point) = self
            .patrol_points
            .as_ref()
            .and_then(|points| points.get(index).copied())
        else {
            return;
        };
        let from = parent.position;
        if let Some(ai) = parent.components.ai_movement_mut() {
            ai.move_to(from, ctx.path_finder, point);
        }
    }

    /// Builds the patrol ring around the spawn position: evenly spaced
    /// points at the patrol radius, impassable ones dropped, order shuffled
    /// once with a generator seeded from the object id so replays agree.
    fn calculate_patrol_points(&mut self, parent: &GameObject, ctx: &UpdateCtx<'_>) {
        let mut points: ArrayVec<Vec2, NUM_PATROL_POINTS> = ArrayVec::new();
        let center = parent.position;
        for i in 0..NUM_PATROL_POINTS {
            let angle = std::f32::consts::TAU * i as f32 / NUM_PATROL_POINTS as f32;
            let point = center + Vec2::new(angle.cos(), angle.sin()) * self.patrol_radius;
            if ctx.tile_map.is_passable(point) {
                points.push(point);
            }
        }
        let mut rng = Pcg::new(parent.id().raw() as u64);
        rng.shuffle(&mut points);
        self.patrol_points = Some(points);
        self.patrol_index = None;
    }

    fn closest_patrol_point(&self, position: Vec2) -> Option<usize> {
        let points = self.patrol_points.as_ref()?;
        points
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                position
                    .distance_squared(**a)
                    .total_cmp(&position.distance_squared(**b))
            })
            .map(|(index, _)| index)
    }
}

/// Closest live object of a hostile team within `radius`, if any.
fn find_enemy_in_radius(
    parent: &GameObject,
    ctx: &UpdateCtx<'_>,
    radius: f32,
) -> Option<GameObjectId> {
    let radius_squared = radius * radius;
    let team = parent.team();
    let mut closest = None;
    let mut closest_distance = f32::MAX;
    for object in ctx.objects.iter() {
        if !object.alive() || object.team() == team || object.team() == NEUTRAL_TEAM {
            continue;
        }
        let distance = object.position.distance_squared(parent.position);
        if distance <= radius_squared && distance < closest_distance {
            closest_distance = distance;
            closest = Some(object.id());
        }
    }
    closest
}
