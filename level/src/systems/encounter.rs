use bevy_ecs::prelude::*;
use bevy_time::Time;
use tracing::info;

use crate::{
    messages::Outcome,
    resources::{DelayedActions, GhostMap, LevelAction, LevelState, LevelTuning},
};
use common::{
    components::Position,
    markers::{GhostMarker, PlayerMarker},
};

// ============================================================================
// Ghost-Player Encounter System
// ============================================================================

// Any ghost within the catch radius ends the level. Runs after pellet collection, so a
// win in the same tick stands.
pub fn ghost_player_encounter_system(
    time: Res<Time>,
    tuning: Res<LevelTuning>,
    ghosts: Res<GhostMap>,
    mut level_state: ResMut<LevelState>,
    mut actions: ResMut<DelayedActions>,
    ghost_query: Query<&Position, With<GhostMarker>>,
    player_query: Query<&Position, With<PlayerMarker>>,
) {
    if level_state.is_over() {
        return;
    }

    let Ok(player_pos) = player_query.single() else {
        return;
    };

    let catcher = ghosts.0.iter().find_map(|(ghost_id, info)| {
        let ghost_pos = ghost_query.get(info.entity).ok()?;
        (ghost_pos.ground_distance(player_pos) < tuning.catch_radius).then_some(*ghost_id)
    });

    let Some(ghost_id) = catcher else {
        return;
    };

    if level_state.try_finish(Outcome::Loss) {
        let now = time.elapsed();
        info!(?ghost_id, "player caught, level lost");
        actions.schedule(now + tuning.loss_delay, LevelAction::HandOff(Outcome::Loss));
    }
}
