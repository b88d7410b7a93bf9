pub mod ghosts;
pub mod helpers;
pub mod players;

pub use ghosts::{Resolution, ResolvedMove, resolve_ghost_movement};
pub use helpers::{overlap_square_vs_wall, overlaps_any_wall};
pub use players::resolve_player_movement;
