use rand::Rng;
use std::time::Duration;

use crate::{
    constants::*,
    resources::{GhostBrain, GhostState, LevelTuning, SearchMemory},
};
use common::{
    components::Position,
    constants::GHOST_HEIGHT,
    maze::{CellType, Maze},
};

// ============================================================================
// Perception
// ============================================================================

// Distance-only perception: walls do not block sight.
#[must_use]
pub fn sees_player(ghost_pos: &Position, player_pos: &Position, detection_range: f32) -> bool {
    ghost_pos.ground_distance(player_pos) < detection_range
}

#[must_use]
pub fn has_arrived(ghost_pos: &Position, target: &Position) -> bool {
    ghost_pos.ground_distance(target) < ARRIVAL_RADIUS
}

// ============================================================================
// State Machine
// ============================================================================

/// Outcome of one behavior evaluation for a ghost.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decision {
    // Stay in the current state. A chasing ghost still re-targets the live player.
    Keep,
    Chase,
    Search(SearchMemory),
    // Enter (or stay in) patrol with a freshly rolled target.
    Patrol,
}

/// Evaluates the transition rules for one ghost. Re-acquiring the player is checked
/// before any expiry so a searching ghost never drops to patrol while it sees the player.
#[must_use]
pub fn decide(
    brain: &GhostBrain,
    ghost_pos: &Position,
    player_pos: &Position,
    now: Duration,
    tuning: &LevelTuning,
) -> Decision {
    let visible = sees_player(ghost_pos, player_pos, tuning.detection_range);

    match brain.state {
        GhostState::Patrol => {
            if visible {
                Decision::Chase
            } else if now >= brain.state_timer || has_arrived(ghost_pos, &brain.target) {
                Decision::Patrol
            } else {
                Decision::Keep
            }
        }
        GhostState::Chase => {
            if visible {
                Decision::Keep
            } else {
                Decision::Search(SearchMemory {
                    last_known: *player_pos,
                    last_seen: now,
                    duration: tuning.memory_duration,
                })
            }
        }
        GhostState::Search(memory) => {
            if visible {
                Decision::Chase
            } else if now.saturating_sub(memory.last_seen) > memory.duration
                || has_arrived(ghost_pos, &memory.last_known)
            {
                Decision::Patrol
            } else {
                Decision::Keep
            }
        }
    }
}

// Applies a decision to the brain, picking the new target for the resulting state.
pub fn apply_decision(
    brain: &mut GhostBrain,
    decision: Decision,
    ghost_pos: &Position,
    player_pos: &Position,
    now: Duration,
    maze: &Maze,
    rng: &mut impl Rng,
) {
    match decision {
        Decision::Keep => {
            if brain.state == GhostState::Chase {
                brain.target = *player_pos;
            }
        }
        Decision::Chase => {
            brain.state = GhostState::Chase;
            brain.target = *player_pos;
        }
        Decision::Search(memory) => {
            brain.state = GhostState::Search(memory);
            brain.target = memory.last_known;
        }
        Decision::Patrol => {
            brain.state = GhostState::Patrol;
            brain.target = pick_patrol_target(maze, ghost_pos, rng);
            brain.state_timer = now + patrol_expiry(rng);
        }
    }
}

// ============================================================================
// Patrol Targets
// ============================================================================

#[must_use]
pub fn patrol_expiry(rng: &mut impl Rng) -> Duration {
    rng.random_range(PATROL_EXPIRY_MIN..=PATROL_EXPIRY_MAX)
}

/// Picks a random interior path cell center, or a small offset from the ghost when
/// sampling keeps hitting walls.
#[must_use]
pub fn pick_patrol_target(maze: &Maze, ghost_pos: &Position, rng: &mut impl Rng) -> Position {
    if maze.rows() > 2 && maze.cols() > 2 {
        for _ in 0..PATROL_TARGET_ATTEMPTS {
            let row = rng.random_range(1..maze.rows() - 1);
            let col = rng.random_range(1..maze.cols() - 1);
            if maze.cell_type(row, col) == CellType::Path {
                let center = maze.cell_center_world(row, col);
                return Position::new(center.x, GHOST_HEIGHT, center.y);
            }
        }
    }

    let dx = rng.random_range(-PATROL_FALLBACK_OFFSET..=PATROL_FALLBACK_OFFSET);
    let dz = rng.random_range(-PATROL_FALLBACK_OFFSET..=PATROL_FALLBACK_OFFSET);
    Position::new(ghost_pos.x + dx, GHOST_HEIGHT, ghost_pos.z + dz)
}
