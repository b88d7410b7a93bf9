use bevy_ecs::prelude::*;
use bevy_time::Time;
use rand::Rng;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::behavior::{patrol_expiry, pick_patrol_target};
use crate::{
    components::GhostId,
    constants::*,
    resources::{GhostBrain, GhostInfo, GhostMap, GhostRng, GhostSpawnConfig, GhostState},
};
use common::{
    components::{FaceDirection, Position, Radius},
    constants::{GHOST_HEIGHT, GHOST_RADIUS},
    markers::{GhostMarker, PlayerMarker},
    maze::{CellType, Maze},
};

// ============================================================================
// Spawn Placement
// ============================================================================

fn ghost_at_cell(maze: &Maze, row: i32, col: i32) -> Position {
    let center = maze.cell_center_world(row, col);
    Position::new(center.x, GHOST_HEIGHT, center.y)
}

/// Random interior path cell at least `SPAWN_MIN_PLAYER_DISTANCE` from the player.
///
/// After `SPAWN_ATTEMPTS` misses, falls back to path cells ordered farthest-first from the
/// player, with `index` choosing among them so several ghosts do not stack. A maze with
/// no path cells at all spawns at the world origin.
#[must_use]
pub fn pick_spawn_position(maze: &Maze, player_pos: &Position, index: usize, rng: &mut impl Rng) -> Position {
    if maze.rows() > 2 && maze.cols() > 2 {
        for _ in 0..SPAWN_ATTEMPTS {
            let row = rng.random_range(1..maze.rows() - 1);
            let col = rng.random_range(1..maze.cols() - 1);
            if maze.cell_type(row, col) != CellType::Path {
                continue;
            }
            let pos = ghost_at_cell(maze, row, col);
            if pos.ground_distance(player_pos) >= SPAWN_MIN_PLAYER_DISTANCE {
                return pos;
            }
        }
    }

    let mut fallback: Vec<Position> = maze.path_cells().map(|c| ghost_at_cell(maze, c.row, c.col)).collect();
    if fallback.is_empty() {
        warn!("maze has no path cells, spawning ghost at the origin");
        return Position::new(0.0, GHOST_HEIGHT, 0.0);
    }

    fallback.sort_by(|a, b| b.ground_distance(player_pos).total_cmp(&a.ground_distance(player_pos)));
    let pos = fallback[index % fallback.len()];
    warn!(x = pos.x, z = pos.z, "no spawn cell far enough from the player, using fallback");
    pos
}

fn initial_brain(maze: &Maze, pos: &Position, now: Duration, rng: &mut impl Rng) -> GhostBrain {
    GhostBrain {
        state: GhostState::Patrol,
        state_timer: now + patrol_expiry(rng),
        target: pick_patrol_target(maze, pos, rng),
    }
}

// ============================================================================
// Ghost Spawning
// ============================================================================

// Places one ghost at `pos` and registers its AI record. Used for explicit placement.
pub fn spawn_ghost(world: &mut World, pos: Position, speed: f32) -> GhostId {
    let pos = Position { y: GHOST_HEIGHT, ..pos };
    let now = world.resource::<Time>().elapsed();
    let ghost_id = world.resource::<GhostMap>().next_id();

    let brain = world.resource_scope(|world, mut rng: Mut<GhostRng>| {
        initial_brain(world.resource::<Maze>(), &pos, now, &mut rng.0)
    });

    let entity = world
        .spawn((GhostMarker, ghost_id, pos, FaceDirection(0.0), Radius(GHOST_RADIUS)))
        .id();
    world
        .resource_mut::<GhostMap>()
        .0
        .insert(ghost_id, GhostInfo { entity, speed, brain });

    debug!(?ghost_id, x = pos.x, z = pos.z, speed, "ghost spawned");
    ghost_id
}

// System to spawn the initial ghosts when the level loads
pub fn ghosts_spawn_system(
    mut commands: Commands,
    maze: Res<Maze>,
    time: Res<Time>,
    spawn_config: Res<GhostSpawnConfig>,
    mut ghosts: ResMut<GhostMap>,
    mut rng: ResMut<GhostRng>,
    player_query: Query<&Position, With<PlayerMarker>>,
    query: Query<&GhostId, With<GhostMarker>>,
) {
    // Only spawn if no ghosts exist yet
    if !query.is_empty() {
        return;
    }

    let player_pos = player_query.single().copied().unwrap_or_default();
    let now = time.elapsed();

    for (i, &speed) in spawn_config.speeds.iter().enumerate() {
        let pos = pick_spawn_position(&maze, &player_pos, i, &mut rng.0);
        let brain = initial_brain(&maze, &pos, now, &mut rng.0);

        let ghost_id = ghosts.next_id();
        let entity = commands
            .spawn((GhostMarker, ghost_id, pos, FaceDirection(0.0), Radius(GHOST_RADIUS)))
            .id();
        ghosts.0.insert(ghost_id, GhostInfo { entity, speed, brain });

        debug!(?ghost_id, x = pos.x, z = pos.z, speed, "ghost spawned");
    }

    info!("spawned {} ghosts", spawn_config.speeds.len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::maze::MazeConfig;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn spawns_far_from_player_on_path() {
        let maze = Maze::default();
        let mut rng = StdRng::seed_from_u64(11);
        let Some(start) = maze.player_start() else {
            panic!("default maze has a player start");
        };
        let start = maze.cell_center_world(start.row, start.col);
        let player = Position::new(start.x, 1.6, start.y);

        for i in 0..50 {
            let pos = pick_spawn_position(&maze, &player, i, &mut rng);
            assert!(pos.ground_distance(&player) >= SPAWN_MIN_PLAYER_DISTANCE, "{pos:?}");
            assert!(maze.is_path(maze.world_to_cell(pos.x, pos.z)));
            assert_eq!(pos.y, GHOST_HEIGHT);
        }
    }

    #[test]
    fn falls_back_to_farthest_path_cells() {
        // Every path cell is within the exclusion radius
        let maze = Maze::new(&MazeConfig {
            layout: vec!["#####".into(), "#  P#".into(), "#####".into()],
            cell_size: 4.0,
            wall_height: 4.0,
        });
        let mut rng = StdRng::seed_from_u64(12);
        let start = maze.cell_center_world(1, 3);
        let player = Position::new(start.x, 1.6, start.y);

        let first = pick_spawn_position(&maze, &player, 0, &mut rng);
        let second = pick_spawn_position(&maze, &player, 1, &mut rng);
        let farthest = maze.cell_center_world(1, 1);
        let next = maze.cell_center_world(1, 2);
        assert_eq!((first.x, first.z), (farthest.x, farthest.y));
        assert_eq!((second.x, second.z), (next.x, next.y));
    }

    #[test]
    fn solid_maze_spawns_at_origin() {
        let maze = Maze::new(&MazeConfig {
            layout: vec!["###".into(), "###".into(), "###".into()],
            cell_size: 4.0,
            wall_height: 4.0,
        });
        let mut rng = StdRng::seed_from_u64(13);
        let pos = pick_spawn_position(&maze, &Position::default(), 0, &mut rng);
        assert_eq!(pos, Position::new(0.0, GHOST_HEIGHT, 0.0));
    }
}
