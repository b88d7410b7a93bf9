#[allow(clippy::wildcard_imports)]
use bevy_ecs::prelude::*;
use bevy_math::{Vec2, Vec3};

// ============================================================================
// Shared Agent Components
// ============================================================================

// World-space position of an agent. Y is fixed per agent type.
#[derive(Debug, Clone, Copy, Component, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub const fn ground(self) -> Vec2 {
        Vec2::new(self.x, self.z)
    }

    // Offset on the ground plane only, Y is kept.
    #[must_use]
    pub fn offset(self, movement: Vec3) -> Self {
        Self {
            x: self.x + movement.x,
            y: self.y,
            z: self.z + movement.z,
        }
    }

    // Euclidean distance on the XZ plane, height is ignored.
    #[must_use]
    pub fn ground_distance(&self, other: &Self) -> f32 {
        (other.x - self.x).hypot(other.z - self.z)
    }
}

// Smoothed heading in radians, 0 faces +Z.
#[derive(Debug, Clone, Copy, Component, PartialEq, Default)]
pub struct FaceDirection(pub f32);

// Fixed collision radius of an agent.
#[derive(Debug, Clone, Copy, Component, PartialEq)]
pub struct Radius(pub f32);
