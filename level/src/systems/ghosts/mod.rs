mod behavior;
mod movement;
mod spawn;
mod systems;

pub use behavior::{Decision, apply_decision, decide, has_arrived, pick_patrol_target, sees_player};
pub use movement::{desired_direction, smooth_facing, step_ghost, wrap_angle};
pub use spawn::{ghosts_spawn_system, pick_spawn_position, spawn_ghost};
pub use systems::{ghosts_behavior_system, ghosts_movement_system};
