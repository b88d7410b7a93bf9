use bevy_ecs::prelude::*;
use bevy_time::Time;
use tracing::{debug, trace};

use super::{
    behavior::{apply_decision, decide},
    movement::{desired_direction, smooth_facing, step_ghost},
};
use crate::resources::{GhostMap, GhostRng, LevelState, LevelTuning};
use common::{
    collision::Resolution,
    components::{FaceDirection, Position, Radius},
    constants::PHYSICS_EPSILON,
    markers::{GhostMarker, PlayerMarker},
    maze::Maze,
};

// ============================================================================
// Ghosts Behavior System
// ============================================================================

// Evaluates every ghost's state machine against the live player position, in id order.
pub fn ghosts_behavior_system(
    time: Res<Time>,
    maze: Res<Maze>,
    tuning: Res<LevelTuning>,
    level_state: Res<LevelState>,
    mut ghosts: ResMut<GhostMap>,
    mut rng: ResMut<GhostRng>,
    player_query: Query<&Position, With<PlayerMarker>>,
    ghost_query: Query<&Position, With<GhostMarker>>,
) {
    if level_state.is_over() {
        return;
    }

    let Ok(player_pos) = player_query.single() else {
        return;
    };
    let now = time.elapsed();

    for (ghost_id, info) in &mut ghosts.0 {
        let Ok(ghost_pos) = ghost_query.get(info.entity) else {
            continue;
        };

        let before = info.brain.state;
        let decision = decide(&info.brain, ghost_pos, player_pos, now, &tuning);
        apply_decision(&mut info.brain, decision, ghost_pos, player_pos, now, &maze, &mut rng.0);

        if before.name() != info.brain.state.name() {
            debug!(
                ?ghost_id,
                from = before.name(),
                to = info.brain.state.name(),
                distance = ghost_pos.ground_distance(player_pos),
                "ghost state changed"
            );
        }
    }
}

// ============================================================================
// Ghosts Movement System
// ============================================================================

// Steers every ghost toward its target, resolves wall collisions and eases its facing.
pub fn ghosts_movement_system(
    time: Res<Time>,
    maze: Res<Maze>,
    level_state: Res<LevelState>,
    ghosts: Res<GhostMap>,
    mut rng: ResMut<GhostRng>,
    mut query: Query<(&mut Position, &mut FaceDirection, &Radius), With<GhostMarker>>,
) {
    if level_state.is_over() {
        return;
    }

    let delta = time.delta_secs();

    for (ghost_id, info) in &ghosts.0 {
        let Ok((mut pos, mut face_dir, radius)) = query.get_mut(info.entity) else {
            continue;
        };

        let direction = desired_direction(&info.brain.state, &pos, &info.brain.target, &mut rng.0);
        let resolved = step_ghost(&maze, &pos, radius.0, direction, info.speed, delta);
        if resolved.resolution == Resolution::Blocked {
            trace!(?ghost_id, "ghost blocked this tick");
        }

        // Only turn when the ghost actually moved
        let dx = resolved.pos.x - pos.x;
        let dz = resolved.pos.z - pos.z;
        if dx.abs() > PHYSICS_EPSILON || dz.abs() > PHYSICS_EPSILON {
            face_dir.0 = smooth_facing(face_dir.0, dx, dz);
        }

        *pos = resolved.pos;
    }
}
