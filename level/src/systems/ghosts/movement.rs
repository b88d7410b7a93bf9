use bevy_math::Vec3;
use rand::Rng;
use std::f32::consts::{PI, TAU};

use crate::{constants::*, resources::GhostState};
use common::{
    centering::lateral_centering,
    collision::{ResolvedMove, resolve_ghost_movement},
    components::Position,
    constants::GHOST_HEIGHT,
    maze::Maze,
};

// ============================================================================
// Steering
// ============================================================================

const fn jitter_for(state: &GhostState) -> f32 {
    match state {
        GhostState::Patrol => PATROL_JITTER,
        GhostState::Search(_) => SEARCH_JITTER,
        GhostState::Chase => 0.0,
    }
}

/// Unit direction on the ground plane from the ghost toward its target, perturbed by
/// per-axis random jitter for the current state. Zero when the ghost sits on its target.
pub fn desired_direction(state: &GhostState, pos: &Position, target: &Position, rng: &mut impl Rng) -> Vec3 {
    let to_target = Vec3::new(target.x - pos.x, 0.0, target.z - pos.z).normalize_or_zero();
    if to_target == Vec3::ZERO {
        return Vec3::ZERO;
    }

    let jitter = jitter_for(state);
    if jitter <= 0.0 {
        return to_target;
    }

    let perturbed = Vec3::new(
        to_target.x + rng.random_range(-jitter..=jitter),
        0.0,
        to_target.z + rng.random_range(-jitter..=jitter),
    );
    perturbed.normalize_or(to_target)
}

// ============================================================================
// Locomotion
// ============================================================================

/// One locomotion step: scale the direction by speed, add the sideways corridor-centering
/// nudge, then resolve a body of `radius` against the maze walls. The committed position
/// is pinned to ghost height.
#[must_use]
pub fn step_ghost(
    maze: &Maze,
    pos: &Position,
    radius: f32,
    direction: Vec3,
    speed: f32,
    delta: f32,
) -> ResolvedMove {
    let mut movement = direction * speed * delta;
    movement.y = 0.0;
    movement += lateral_centering(maze, pos, direction);

    let mut resolved = resolve_ghost_movement(maze.walls(), pos, radius, movement);
    resolved.pos.y = GHOST_HEIGHT;
    resolved
}

// Wrap an angle difference into [-PI, PI) so interpolation takes the short way round.
#[must_use]
pub fn wrap_angle(angle: f32) -> f32 {
    (angle + PI).rem_euclid(TAU) - PI
}

/// Eases the facing angle toward the heading of the actual movement `(dx, dz)`.
#[must_use]
pub fn smooth_facing(current: f32, dx: f32, dz: f32) -> f32 {
    let desired = dx.atan2(dz);
    let diff = wrap_angle(desired - current);
    wrap_angle(diff.mul_add(FACING_SMOOTHING, current))
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{
        constants::GHOST_RADIUS,
        maze::{MazeConfig, Wall},
    };
    use rand::{SeedableRng, rngs::StdRng};

    const EPS: f32 = 1e-4;

    fn open_maze() -> Maze {
        Maze::new(&MazeConfig {
            layout: vec![
                "#######".into(),
                "#     #".into(),
                "#     #".into(),
                "#     #".into(),
                "#######".into(),
            ],
            cell_size: 4.0,
            wall_height: 4.0,
        })
    }

    fn overlaps(walls: &[Wall], pos: &Position) -> bool {
        let half = GHOST_RADIUS;
        walls.iter().any(|w| {
            pos.x + half > w.min_x && pos.x - half < w.max_x && pos.z + half > w.min_z && pos.z - half < w.max_z
        })
    }

    #[test]
    fn chase_has_no_jitter() {
        let mut rng = StdRng::seed_from_u64(7);
        let pos = Position::new(0.0, GHOST_HEIGHT, 0.0);
        let target = Position::new(3.0, 0.0, 4.0);
        for _ in 0..20 {
            let dir = desired_direction(&GhostState::Chase, &pos, &target, &mut rng);
            assert!((dir.x - 0.6).abs() < EPS && (dir.z - 0.8).abs() < EPS, "{dir:?}");
        }
    }

    #[test]
    fn jitter_is_wider_on_patrol_than_search() {
        let mut rng = StdRng::seed_from_u64(8);
        let pos = Position::new(0.0, GHOST_HEIGHT, 0.0);
        let target = Position::new(0.0, 0.0, 10.0);
        let search = GhostState::Search(crate::resources::SearchMemory {
            last_known: target,
            last_seen: std::time::Duration::ZERO,
            duration: MEMORY_DURATION,
        });

        let max_deviation = |state: &GhostState, rng: &mut StdRng| {
            (0..500)
                .map(|_| desired_direction(state, &pos, &target, rng).x.abs())
                .fold(0.0_f32, f32::max)
        };

        let patrol = max_deviation(&GhostState::Patrol, &mut rng);
        let search = max_deviation(&search, &mut rng);
        assert!(patrol > search, "patrol {patrol} search {search}");
        assert!(search > 0.0);
        for _ in 0..50 {
            let dir = desired_direction(&GhostState::Patrol, &pos, &target, &mut rng);
            assert!((dir.length() - 1.0).abs() < EPS);
            assert_eq!(dir.y, 0.0);
        }
    }

    #[test]
    fn no_direction_on_target() {
        let mut rng = StdRng::seed_from_u64(9);
        let pos = Position::new(1.0, GHOST_HEIGHT, 1.0);
        assert_eq!(desired_direction(&GhostState::Patrol, &pos, &pos, &mut rng), Vec3::ZERO);
    }

    #[test]
    fn step_stays_on_ghost_plane() {
        let maze = open_maze();
        let center = maze.cell_center_world(2, 3);
        let pos = Position::new(center.x, 0.0, center.y);
        let resolved = step_ghost(&maze, &pos, GHOST_RADIUS, Vec3::new(0.0, 1.0, 1.0).normalize(), 3.0, 0.1);
        assert_eq!(resolved.pos.y, GHOST_HEIGHT);
        assert!(resolved.pos.z > pos.z);
    }

    #[test]
    fn steps_never_enter_walls() {
        let maze = open_maze();
        let mut rng = StdRng::seed_from_u64(10);
        let center = maze.cell_center_world(2, 3);
        let mut pos = Position::new(center.x, GHOST_HEIGHT, center.y);

        for _ in 0..3000 {
            let angle = rng.random_range(-PI..PI);
            let dir = Vec3::new(angle.sin(), 0.0, angle.cos());
            pos = step_ghost(&maze, &pos, GHOST_RADIUS, dir, 6.0, 0.05).pos;
            assert!(!overlaps(maze.walls(), &pos), "{pos:?}");
        }
    }

    #[test]
    fn every_ghost_speed_crosses_a_corridor() {
        // Row 4 of the default maze is open from column 1 to 18
        let maze = Maze::default();
        let start = maze.cell_center_world(4, 2);

        for speed in GHOST_SPEEDS {
            let mut pos = Position::new(start.x, GHOST_HEIGHT, start.y);
            for _ in 0..600 {
                pos = step_ghost(&maze, &pos, GHOST_RADIUS, Vec3::X, speed, 1.0 / 60.0).pos;
            }
            let cell = maze.world_to_cell(pos.x, pos.z);
            assert_eq!(cell.row, 4, "speed {speed} drifted to {cell:?}");
            assert!(cell.col >= 6, "speed {speed} stalled at {cell:?}");
        }
    }

    #[test]
    fn wider_body_is_held_further_from_walls() {
        let maze = open_maze();
        let center = maze.cell_center_world(2, 3);
        let start = Position::new(center.x, GHOST_HEIGHT, center.y);
        let run = |radius: f32| {
            let mut pos = start;
            for _ in 0..200 {
                pos = step_ghost(&maze, &pos, radius, Vec3::X, 6.0, 0.05).pos;
            }
            pos.x
        };
        assert!(run(1.5) < run(GHOST_RADIUS));
    }

    #[test]
    fn wrap_takes_short_way() {
        assert!((wrap_angle(1.5 * PI) + 0.5 * PI).abs() < EPS);
        assert!((wrap_angle(-1.5 * PI) - 0.5 * PI).abs() < EPS);
        assert!((wrap_angle(0.25) - 0.25).abs() < EPS);
    }

    #[test]
    fn facing_eases_across_the_seam() {
        // Facing just below +PI, moving toward just above -PI: the short way is a small
        // positive turn through the seam, not a full turn back through zero.
        let current = PI - 0.1;
        let dx = (-PI + 0.1).sin();
        let dz = (-PI + 0.1).cos();
        let next = smooth_facing(current, dx, dz);
        let turned = wrap_angle(next - current);
        assert!((turned - 0.02).abs() < EPS, "turned {turned}");
    }

    #[test]
    fn facing_converges() {
        let mut facing = 0.0;
        for _ in 0..200 {
            facing = smooth_facing(facing, 1.0, 0.0);
        }
        assert!((facing - PI / 2.0).abs() < 1e-3);
    }
}
