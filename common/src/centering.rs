use bevy_math::{Vec2, Vec3};

use crate::{
    components::Position,
    constants::{CENTERING_THRESHOLD, CENTERING_WEIGHT},
    maze::Maze,
};

// Small corrective vector pulling an agent back toward the center of its path cell.
// Zero when the agent is near the center or its nearest cell is not a path.
#[must_use]
pub fn corridor_centering(maze: &Maze, pos: &Position) -> Vec3 {
    let cell = maze.world_to_cell(pos.x, pos.z);
    if !maze.is_path(cell) {
        return Vec3::ZERO;
    }

    let center = maze.cell_center_world(cell.row, cell.col);
    let offset = center - Vec2::new(pos.x, pos.z);
    if offset.length() <= CENTERING_THRESHOLD {
        return Vec3::ZERO;
    }

    Vec3::new(offset.x * CENTERING_WEIGHT, 0.0, offset.y * CENTERING_WEIGHT)
}

/// Centering nudge with the part along `heading` removed, so it only ever pulls sideways
/// and never holds an agent back from the direction it is travelling. With no heading the
/// full nudge applies.
#[must_use]
pub fn lateral_centering(maze: &Maze, pos: &Position, heading: Vec3) -> Vec3 {
    let nudge = corridor_centering(maze, pos);
    let Some(axis) = Vec3::new(heading.x, 0.0, heading.z).try_normalize() else {
        return nudge;
    };
    nudge - axis * nudge.dot(axis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn near_center_needs_no_nudge() {
        let maze = Maze::default();
        let c = maze.cell_center_world(5, 5);
        let pos = Position::new(c.x + 0.5, 1.0, c.y - 0.5);
        assert_eq!(corridor_centering(&maze, &pos), Vec3::ZERO);
    }

    #[test]
    fn off_center_is_pulled_back() {
        let maze = Maze::default();
        let c = maze.cell_center_world(5, 5);
        let pos = Position::new(c.x + 1.5, 1.0, c.y);
        let nudge = corridor_centering(&maze, &pos);
        assert!(nudge.x < 0.0);
        assert!((nudge.x + 1.5 * CENTERING_WEIGHT).abs() < 1e-6);
        assert_eq!(nudge.y, 0.0);
        assert!(nudge.z.abs() < 1e-6);
    }

    #[test]
    fn nudge_along_heading_is_dropped() {
        let maze = Maze::default();
        let c = maze.cell_center_world(4, 4);
        // Past the center along +x and slightly off it along z
        let pos = Position::new(c.x + 1.8, 1.0, c.y + 0.6);
        let full = corridor_centering(&maze, &pos);
        assert!(full.x < 0.0 && full.z < 0.0);

        let sideways = lateral_centering(&maze, &pos, Vec3::X * 2.5);
        assert!(sideways.x.abs() < 1e-6);
        assert!((sideways.z - full.z).abs() < 1e-6);
        assert_eq!(sideways.y, 0.0);
    }

    #[test]
    fn no_heading_keeps_full_nudge() {
        let maze = Maze::default();
        let c = maze.cell_center_world(4, 4);
        let pos = Position::new(c.x + 1.5, 1.0, c.y);
        assert_eq!(lateral_centering(&maze, &pos, Vec3::ZERO), corridor_centering(&maze, &pos));
    }

    #[test]
    fn wall_cells_are_ignored() {
        let maze = Maze::default();
        let c = maze.cell_center_world(0, 0);
        let pos = Position::new(c.x + 1.5, 1.0, c.y + 1.5);
        assert_eq!(corridor_centering(&maze, &pos), Vec3::ZERO);
    }
}
