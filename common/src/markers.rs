use bevy_ecs::prelude::*;

// Marker components to disambiguate agent archetypes.
#[derive(Component, Debug, Default)]
pub struct PlayerMarker;

#[derive(Component, Debug, Default)]
pub struct GhostMarker;
