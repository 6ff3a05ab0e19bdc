//! Projectile flight and collision.

use glam::Vec2;

use crate::object::{GameObject, NEUTRAL_TEAM, UpdateCtx};
use crate::time::TICK_DELTA;

/// Runtime state of a projectile in flight. Spawned by combat, never loaded
/// from records; a projectile that outlives its flight time despawns itself.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileState {
    pub team: i32,
    pub damage: i32,
    pub radius: f32,
    pub velocity: Vec2,
    /// Remaining flight time in ticks.
    pub lifetime: u32,
}

impl ProjectileState {
    pub(crate) fn update(&mut self, parent: &mut GameObject, ctx: &mut UpdateCtx<'_>) {
        self.lifetime = self.lifetime.saturating_sub(1);
        if self.lifetime == 0 {
            ctx.objects.defer_remove(parent.id());
            return;
        }

        let from = parent.position;
        let to = from + self.velocity * TICK_DELTA;

        let mut consumed = false;
        for other in ctx.objects.iter_mut() {
            if !in_swept_quad(from, to, self.radius, other.position) {
                continue;
            }
            let other_team = other.team();
            if other_team == self.team || other_team == NEUTRAL_TEAM {
                continue;
            }
            let (id, kind) = (other.id(), other.kind());
            if let Some(hitpoint) = other.components.hitpoint_mut() {
                hitpoint.hit(id, kind, self.damage, ctx.events);
                consumed = true;
            }
        }

        if consumed {
            ctx.objects.defer_remove(parent.id());
        }

        parent.position = to;
    }
}

/// Collision volume for one tick of flight: a half-width box around the
/// start point swept to the destination, tested as three triangles. The
/// box is axis-aligned rather than rotated toward the flight direction.
fn in_swept_quad(from: Vec2, to: Vec2, radius: f32, point: Vec2) -> bool {
    let a = from + Vec2::new(-radius, -radius);
    let b = from + Vec2::new(radius, -radius);
    let c = from + Vec2::new(radius, radius);
    let d = from + Vec2::new(-radius, radius);

    in_triangle(a, b, to, point) || in_triangle(b, c, to, point) || in_triangle(c, d, to, point)
}

/// Signed-area point-in-triangle test.
fn in_triangle(a: Vec2, b: Vec2, c: Vec2, point: Vec2) -> bool {
    let as_x = point.x - a.x;
    let as_y = point.y - a.y;

    let side_ab = (b.x - a.x) * as_y - (b.y - a.y) * as_x > 0.0;

    if ((c.x - a.x) * as_y - (c.y - a.y) * as_x > 0.0) == side_ab {
        return false;
    }
    if ((c.x - b.x) * (point.y - b.y) - (c.y - b.y) * (point.x - b.x) > 0.0) != side_ab {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swept_quad_covers_the_flight_segment() {
        let from = Vec2::new(0.0, 0.0);
        let to = Vec2::new(2.0, 0.0);
        assert!(in_swept_quad(from, to, 0.5, Vec2::new(1.0, 0.1)));
        assert!(in_swept_quad(from, to, 0.5, Vec2::new(0.2, 0.4)));
        assert!(in_swept_quad(from, to, 0.5, Vec2::new(0.2, -0.4)));
        assert!(!in_swept_quad(from, to, 0.5, Vec2::new(1.0, 2.0)));
        assert!(!in_swept_quad(from, to, 0.5, Vec2::new(-1.0, 0.0)));
    }

    #[test]
    fn triangle_fan_skips_the_trailing_wedge() {
        // The three triangles fan out from the leading corners; the wedge
        // between the trailing edge and the destination is not covered.
        let from = Vec2::new(0.0, 0.0);
        let to = Vec2::new(2.0, 0.0);
        assert!(!in_swept_quad(from, to, 0.5, Vec2::new(0.2, 0.3)));
    }

    #[test]
    fn triangle_test_matches_orientation() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(2.0, 0.0);
        let c = Vec2::new(1.0, 2.0);
        assert!(in_triangle(a, b, c, Vec2::new(1.0, 0.5)));
        assert!(!in_triangle(a, b, c, Vec2::new(3.0, 0.5)));
        assert!(!in_triangle(a, b, c, Vec2::new(1.0, -0.5)));
    }
}
