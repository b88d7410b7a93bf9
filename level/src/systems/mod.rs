pub mod encounter;
pub mod ghosts;
pub mod pellets;
pub mod players;
pub mod transitions;
