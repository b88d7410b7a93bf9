use bevy_ecs::prelude::*;
use bevy_math::Vec3;
use bevy_time::Time;

use crate::{components::PlayerIntent, resources::LevelState};
use common::{
    collision::resolve_player_movement,
    components::{Position, Radius},
    markers::PlayerMarker,
    maze::Maze,
};

// ============================================================================
// Player Movement System
// ============================================================================

// Integrates the controller's intent through the player wall resolver.
pub fn players_movement_system(
    time: Res<Time>,
    maze: Res<Maze>,
    level_state: Res<LevelState>,
    mut query: Query<(&mut Position, &PlayerIntent, &Radius), With<PlayerMarker>>,
) {
    if level_state.is_over() {
        return;
    }

    let delta = time.delta_secs();

    for (mut pos, intent, radius) in &mut query {
        let movement = Vec3::new(intent.velocity.x, 0.0, intent.velocity.z) * delta;
        if movement == Vec3::ZERO {
            continue;
        }

        *pos = resolve_player_movement(maze.walls(), &pos, radius.0, movement);
    }
}
