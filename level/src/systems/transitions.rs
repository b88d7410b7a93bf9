use bevy_ecs::prelude::*;
use bevy_time::Time;
use tracing::info;

use crate::{
    messages::{Handoff, HandoffChannel},
    resources::{DelayedActions, LevelAction, LevelInfo},
};

// ============================================================================
// Delayed Actions System
// ============================================================================

// Fires due delayed actions. Keeps running after the level is over so pending
// handoffs still go out.
pub fn delayed_actions_system(
    time: Res<Time>,
    level_info: Res<LevelInfo>,
    mut actions: ResMut<DelayedActions>,
    mut channel: ResMut<HandoffChannel>,
) {
    for action in actions.drain_due(time.elapsed()) {
        match action {
            LevelAction::HandOff(outcome) => {
                let handoff = Handoff {
                    outcome,
                    level_id: level_info.level_id.clone(),
                    door_id: level_info.door_id.clone(),
                };
                if channel.send_once(handoff) {
                    info!(?outcome, level_id = %level_info.level_id, "handed off to level transition");
                }
            }
        }
    }
}
