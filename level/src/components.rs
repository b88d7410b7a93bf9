#[allow(clippy::wildcard_imports)]
use bevy_ecs::prelude::*;
use bevy_math::Vec3;

// ============================================================================
// Bevy Components
// ============================================================================

/// Stable ghost identifier, the key into [`crate::resources::GhostMap`].
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GhostId(pub u32);

/// Desired player velocity on the XZ plane, written by the external controller.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerIntent {
    pub velocity: Vec3,
}
