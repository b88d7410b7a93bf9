pub mod centering;
pub mod collision;
pub mod components;
pub mod constants;
pub mod markers;
pub mod maze;
