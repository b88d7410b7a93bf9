use bevy_ecs::prelude::*;
use bevy_time::Time;
use tracing::{debug, info};

use crate::{
    constants::{PELLET_COLLECT_RADIUS, PELLET_SCORE},
    messages::Outcome,
    resources::{DelayedActions, LevelAction, LevelState, LevelTuning, Pellets},
};
use common::{components::Position, markers::PlayerMarker};

// ============================================================================
// Pellet Collection System
// ============================================================================

// Collects pellets under the player and wins the level when the last one goes.
pub fn pellet_collection_system(
    time: Res<Time>,
    tuning: Res<LevelTuning>,
    mut level_state: ResMut<LevelState>,
    mut pellets: ResMut<Pellets>,
    mut actions: ResMut<DelayedActions>,
    player_query: Query<&Position, With<PlayerMarker>>,
) {
    if level_state.is_over() {
        return;
    }

    let Ok(player_pos) = player_query.single() else {
        return;
    };

    let before = pellets.remaining.len();
    pellets
        .remaining
        .retain(|pellet| pellet.ground_distance(player_pos) >= PELLET_COLLECT_RADIUS);
    let collected = before - pellets.remaining.len();
    if collected == 0 {
        return;
    }

    pellets.score += collected as u32 * PELLET_SCORE;
    debug!(collected, remaining = pellets.remaining.len(), score = pellets.score, "pellets collected");

    if pellets.all_collected() && level_state.try_finish(Outcome::Win) {
        let now = time.elapsed();
        info!(score = pellets.score, "all pellets collected, level won");
        actions.schedule(now + tuning.win_delay, LevelAction::HandOff(Outcome::Win));
    }
}
