use bevy_ecs::{prelude::*, schedule::ExecutorKind};
use bevy_math::Vec3;
use bevy_time::Time;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tracing::info;

use crate::{
    components::{GhostId, PlayerIntent},
    config::LevelConfig,
    messages::{Handoff, HandoffChannel},
    resources::*,
    systems::{
        encounter::ghost_player_encounter_system,
        ghosts::{ghosts_behavior_system, ghosts_movement_system, ghosts_spawn_system, spawn_ghost},
        pellets::pellet_collection_system,
        players::players_movement_system,
        transitions::delayed_actions_system,
    },
};
use common::{
    components::{FaceDirection, Position, Radius},
    constants::{PLAYER_EYE_HEIGHT, PLAYER_RADIUS},
    markers::PlayerMarker,
    maze::Maze,
};

const PELLET_HEIGHT: f32 = 0.5;

// Read-only projection of a ghost for rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GhostView {
    pub id: GhostId,
    pub position: Position,
    pub facing: f32,
}

// ============================================================================
// Level
// ============================================================================

/// One running maze level: the ECS world holding maze, player and ghosts, plus the
/// per-frame schedule. Each level instance is fully independent.
pub struct Level {
    world: World,
    schedule: Schedule,
    player: Entity,
}

impl Level {
    pub fn new(config: &LevelConfig, handoff: UnboundedSender<Handoff>) -> Self {
        let maze = Maze::new(&config.maze);

        let player_pos = maze
            .player_start()
            .or_else(|| maze.path_cells().next())
            .map_or(Position::new(0.0, PLAYER_EYE_HEIGHT, 0.0), |cell| {
                let center = maze.cell_center_world(cell.row, cell.col);
                Position::new(center.x, PLAYER_EYE_HEIGHT, center.y)
            });

        let pellets = maze
            .pellet_cells()
            .iter()
            .map(|cell| {
                let center = maze.cell_center_world(cell.row, cell.col);
                Position::new(center.x, PELLET_HEIGHT, center.y)
            })
            .collect();

        info!(
            level_id = %config.level_id,
            rows = maze.rows(),
            cols = maze.cols(),
            walls = maze.walls().len(),
            pellets = maze.pellet_cells().len(),
            "loading maze level"
        );

        let mut world = World::new();
        world.insert_resource(Time::<()>::default());
        world.insert_resource(maze);
        world.insert_resource(config.tuning());
        world.insert_resource(LevelInfo {
            level_id: config.level_id.clone(),
            door_id: config.door_id.clone(),
        });
        world.insert_resource(GhostSpawnConfig {
            speeds: (0..config.num_ghosts).map(|i| config.ghost_speed(i)).collect(),
        });
        world.insert_resource(GhostMap::default());
        world.insert_resource(GhostRng::new(config.seed));
        world.insert_resource(LevelState::default());
        world.insert_resource(DelayedActions::default());
        world.insert_resource(Pellets::new(pellets));
        world.insert_resource(HandoffChannel::new(handoff));

        let player = world
            .spawn((
                PlayerMarker,
                player_pos,
                PlayerIntent::default(),
                Radius(PLAYER_RADIUS),
            ))
            .id();

        let mut startup = Schedule::default();
        startup.set_executor_kind(ExecutorKind::SingleThreaded);
        startup.add_systems(ghosts_spawn_system);
        startup.run(&mut world);

        // Fixed per-frame order: player, ghost brains, ghost bodies, pellets, encounters, handoffs
        let mut schedule = Schedule::default();
        schedule.set_executor_kind(ExecutorKind::SingleThreaded);
        schedule.add_systems(
            (
                players_movement_system,
                ghosts_behavior_system,
                ghosts_movement_system,
                pellet_collection_system,
                ghost_player_encounter_system,
                delayed_actions_system,
            )
                .chain(),
        );

        Self {
            world,
            schedule,
            player,
        }
    }

    // Advance the level clock by one frame and run every system once.
    pub fn tick(&mut self, delta: Duration) {
        self.world.resource_mut::<Time>().advance_by(delta);
        self.schedule.run(&mut self.world);
    }

    #[must_use]
    pub fn now(&self) -> Duration {
        self.world.resource::<Time>().elapsed()
    }

    #[must_use]
    pub fn state(&self) -> LevelState {
        *self.world.resource::<LevelState>()
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.state().is_over()
    }

    #[must_use]
    pub fn maze(&self) -> &Maze {
        self.world.resource::<Maze>()
    }

    // ========================================================================
    // Player
    // ========================================================================

    #[must_use]
    pub fn player_position(&self) -> Position {
        self.world.get::<Position>(self.player).copied().unwrap_or_default()
    }

    pub fn teleport_player(&mut self, pos: Position) {
        if let Some(mut player_pos) = self.world.get_mut::<Position>(self.player) {
            *player_pos = pos;
        }
    }

    pub fn set_player_intent(&mut self, velocity: Vec3) {
        if let Some(mut intent) = self.world.get_mut::<PlayerIntent>(self.player) {
            intent.velocity = velocity;
        }
    }

    // ========================================================================
    // Ghosts
    // ========================================================================

    pub fn spawn_ghost(&mut self, pos: Position, speed: f32) -> GhostId {
        spawn_ghost(&mut self.world, pos, speed)
    }

    #[must_use]
    pub fn ghost_count(&self) -> usize {
        self.world.resource::<GhostMap>().0.len()
    }

    #[must_use]
    pub fn ghost_state(&self, id: GhostId) -> Option<GhostState> {
        self.world.resource::<GhostMap>().0.get(&id).map(|info| info.brain.state)
    }

    #[must_use]
    pub fn ghost_target(&self, id: GhostId) -> Option<Position> {
        self.world.resource::<GhostMap>().0.get(&id).map(|info| info.brain.target)
    }

    #[must_use]
    pub fn ghost_views(&self) -> Vec<GhostView> {
        self.world
            .resource::<GhostMap>()
            .0
            .iter()
            .filter_map(|(id, info)| {
                let position = *self.world.get::<Position>(info.entity)?;
                let facing = self.world.get::<FaceDirection>(info.entity).map_or(0.0, |f| f.0);
                Some(GhostView {
                    id: *id,
                    position,
                    facing,
                })
            })
            .collect()
    }

    // ========================================================================
    // Pellets & Outcome
    // ========================================================================

    #[must_use]
    pub fn pellets_remaining(&self) -> usize {
        self.world.resource::<Pellets>().remaining.len()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.world.resource::<Pellets>().score
    }

    #[must_use]
    pub fn pending_actions(&self) -> usize {
        self.world.resource::<DelayedActions>().len()
    }

    // Release every ghost record and entity.
    pub fn unload(&mut self) {
        let ghosts = std::mem::take(&mut self.world.resource_mut::<GhostMap>().0);
        for info in ghosts.values() {
            self.world.despawn(info.entity);
        }

        info!(ghosts = ghosts.len(), "level unloaded");
    }
}
