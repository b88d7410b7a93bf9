use bevy_ecs::prelude::*;
use rand::{SeedableRng, rngs::StdRng};
use std::{collections::BTreeMap, time::Duration};

use crate::{components::GhostId, messages::Outcome};
use common::components::Position;

// ============================================================================
// Bevy Resources
// ============================================================================

// Perception and timing parameters for one level instance.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct LevelTuning {
    pub detection_range: f32,
    pub catch_radius: f32,
    pub memory_duration: Duration,
    pub loss_delay: Duration,
    pub win_delay: Duration,
}

// Identifiers passed along with the level-transition handoff.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct LevelInfo {
    pub level_id: String,
    pub door_id: String,
}

// Ghosts to place when the level loads.
#[derive(Resource, Debug, Clone, Default)]
pub struct GhostSpawnConfig {
    pub speeds: Vec<f32>,
}

// Shared random source for ghost decisions, seedable for reproducible runs.
#[derive(Resource)]
pub struct GhostRng(pub StdRng);

impl GhostRng {
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        Self(seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64))
    }
}

// ============================================================================
// Ghost Records
// ============================================================================

// Snapshot taken when a chasing ghost loses sight of the player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchMemory {
    pub last_known: Position,
    pub last_seen: Duration,
    pub duration: Duration,
}

/// Behavioral state of a ghost. The search memory only exists while searching.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GhostState {
    Patrol,
    Chase,
    Search(SearchMemory),
}

impl GhostState {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Patrol => "patrol",
            Self::Chase => "chase",
            Self::Search(_) => "search",
        }
    }
}

// AI state of one ghost: what it is doing and where it is heading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GhostBrain {
    pub state: GhostState,
    // Absolute time after which the patrol target is re-rolled
    pub state_timer: Duration,
    pub target: Position,
}

// Ghost information, looked up by id
#[derive(Debug, Clone, Copy)]
pub struct GhostInfo {
    pub entity: Entity,
    pub speed: f32,
    pub brain: GhostBrain,
}

// Map of all ghosts, iterated in id order so updates are sequential and reproducible
#[derive(Resource, Default)]
pub struct GhostMap(pub BTreeMap<GhostId, GhostInfo>);

impl GhostMap {
    #[must_use]
    pub fn next_id(&self) -> GhostId {
        GhostId(self.0.keys().next_back().map_or(0, |id| id.0 + 1))
    }
}

// ============================================================================
// Level Outcome
// ============================================================================

/// Whole-level state. Both end states are terminal and can only be entered once.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LevelState {
    #[default]
    Running,
    Won,
    Lost,
}

impl LevelState {
    #[must_use]
    pub const fn is_over(self) -> bool {
        !matches!(self, Self::Running)
    }

    // First writer wins: returns false if the level already ended.
    pub fn try_finish(&mut self, outcome: Outcome) -> bool {
        if self.is_over() {
            return false;
        }
        *self = match outcome {
            Outcome::Win => Self::Won,
            Outcome::Loss => Self::Lost,
        };
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelAction {
    HandOff(Outcome),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayedAction {
    pub fire_at: Duration,
    pub action: LevelAction,
}

// Actions deferred to a later tick, drained by the level loop.
#[derive(Resource, Debug, Default)]
pub struct DelayedActions(Vec<DelayedAction>);

impl DelayedActions {
    pub fn schedule(&mut self, fire_at: Duration, action: LevelAction) {
        self.0.push(DelayedAction { fire_at, action });
    }

    // Remove and return every action due at `now`, earliest first.
    pub fn drain_due(&mut self, now: Duration) -> Vec<LevelAction> {
        let (mut due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.0)
            .into_iter()
            .partition(|a| a.fire_at <= now);
        self.0 = pending;
        due.sort_by_key(|a| a.fire_at);
        due.into_iter().map(|a| a.action).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// ============================================================================
// Pellets
// ============================================================================

// Uncollected pellets and the running score.
#[derive(Resource, Debug, Default)]
pub struct Pellets {
    pub remaining: Vec<Position>,
    pub total: usize,
    pub score: u32,
}

impl Pellets {
    #[must_use]
    pub fn new(positions: Vec<Position>) -> Self {
        Self {
            total: positions.len(),
            remaining: positions,
            score: 0,
        }
    }

    #[must_use]
    pub fn all_collected(&self) -> bool {
        self.total > 0 && self.remaining.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn first_outcome_wins() {
        let mut state = LevelState::default();
        assert!(state.try_finish(Outcome::Win));
        assert!(!state.try_finish(Outcome::Loss));
        assert_eq!(state, LevelState::Won);
    }

    #[test]
    fn delayed_actions_fire_in_order_once() {
        let mut actions = DelayedActions::default();
        actions.schedule(Duration::from_millis(300), LevelAction::HandOff(Outcome::Loss));
        actions.schedule(Duration::from_millis(100), LevelAction::HandOff(Outcome::Win));

        assert!(actions.drain_due(Duration::from_millis(50)).is_empty());
        assert_eq!(
            actions.drain_due(Duration::from_millis(300)),
            vec![LevelAction::HandOff(Outcome::Win), LevelAction::HandOff(Outcome::Loss)]
        );
        assert!(actions.is_empty());
        assert!(actions.drain_due(Duration::from_secs(10)).is_empty());
    }

    #[test]
    fn empty_maze_is_never_complete() {
        assert!(!Pellets::new(Vec::new()).all_collected());
    }

    #[test]
    fn ghost_ids_are_sequential() {
        let mut map = GhostMap::default();
        assert_eq!(map.next_id(), GhostId(0));
        let brain = GhostBrain {
            state: GhostState::Patrol,
            state_timer: Duration::ZERO,
            target: Position::default(),
        };
        map.0.insert(
            GhostId(0),
            GhostInfo {
                entity: Entity::PLACEHOLDER,
                speed: 1.0,
                brain,
            },
        );
        assert_eq!(map.next_id(), GhostId(1));
    }
}
