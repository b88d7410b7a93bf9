use bevy_math::{Vec2, Vec3};
use tracing::debug;

use super::helpers::{closest_overlapping_wall, overlaps_any_wall};
use crate::{
    components::Position,
    constants::{BOUNCE_DISTANCE, COLLISION_BUFFER, PHYSICS_EPSILON},
    maze::Wall,
};

// Which step of the escalation produced the committed position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Direct,
    SlideX,
    SlideZ,
    Bounce,
    Blocked,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedMove {
    pub pos: Position,
    pub resolution: Resolution,
}

/// Moves a ghost by `movement` on the XZ plane without letting its square penetrate a wall.
///
/// Escalates direct move, X-only slide, Z-only slide, then a short bounce away from the
/// blocking wall. If every step is blocked the ghost stays where it is for this tick.
/// Slides along an axis the movement has no component on are skipped.
#[must_use]
pub fn resolve_ghost_movement(walls: &[Wall], current_pos: &Position, radius: f32, movement: Vec3) -> ResolvedMove {
    let half = radius + COLLISION_BUFFER;
    let clear = |pos: &Position| !overlaps_any_wall(walls, pos, half);

    let candidate = current_pos.offset(movement);
    if clear(&candidate) {
        return ResolvedMove {
            pos: candidate,
            resolution: Resolution::Direct,
        };
    }

    if movement.x.abs() > PHYSICS_EPSILON {
        let x_only = current_pos.offset(Vec3::new(movement.x, 0.0, 0.0));
        if clear(&x_only) {
            return ResolvedMove {
                pos: x_only,
                resolution: Resolution::SlideX,
            };
        }
    }

    if movement.z.abs() > PHYSICS_EPSILON {
        let z_only = current_pos.offset(Vec3::new(0.0, 0.0, movement.z));
        if clear(&z_only) {
            return ResolvedMove {
                pos: z_only,
                resolution: Resolution::SlideZ,
            };
        }
    }

    if let Some(wall) = closest_overlapping_wall(walls, &candidate, half) {
        let mut away = current_pos.ground() - wall.center();
        if away.length_squared() < PHYSICS_EPSILON {
            away = -Vec2::new(movement.x, movement.z);
        }
        let away = away.normalize_or_zero() * BOUNCE_DISTANCE;
        let bounced = current_pos.offset(Vec3::new(away.x, 0.0, away.y));
        if away != Vec2::ZERO && clear(&bounced) {
            return ResolvedMove {
                pos: bounced,
                resolution: Resolution::Bounce,
            };
        }
    }

    debug!(x = current_pos.x, z = current_pos.z, "ghost collision resolution exhausted, holding position");
    ResolvedMove {
        pos: *current_pos,
        resolution: Resolution::Blocked,
    }
}
