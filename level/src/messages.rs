use bevy_ecs::prelude::*;
use tokio::sync::mpsc::UnboundedSender;
use tracing::warn;

// ============================================================================
// Level-Transition Handoff
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
}

// Level to orchestrator: the level has ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handoff {
    pub outcome: Outcome,
    pub level_id: String,
    pub door_id: String,
}

// Resource wrapper for the channel to the level-transition collaborator. Sends at most once.
#[derive(Resource)]
pub struct HandoffChannel {
    sender: UnboundedSender<Handoff>,
    sent: bool,
}

impl HandoffChannel {
    #[must_use]
    pub const fn new(sender: UnboundedSender<Handoff>) -> Self {
        Self { sender, sent: false }
    }

    #[must_use]
    pub const fn sent(&self) -> bool {
        self.sent
    }

    // Returns false if a handoff already went out for this level.
    pub fn send_once(&mut self, handoff: Handoff) -> bool {
        if self.sent {
            warn!(?handoff, "handoff already sent for this level, dropping");
            return false;
        }
        self.sent = true;
        if let Err(e) = self.sender.send(handoff) {
            warn!("level-transition receiver gone: {}", e);
        }
        true
    }
}
