use bevy_math::Vec3;

use super::helpers::{overlap_square_vs_wall, overlaps_any_wall};
use crate::{components::Position, constants::COLLISION_BUFFER, maze::Wall};

// Extra push past the contact plane so float error cannot leave a sliver of overlap.
const SEPARATION_MARGIN: f32 = 1e-4;

/// Moves the player by `movement`, pushing it out of every wall it would penetrate.
///
/// Each overlapping wall is resolved along the axis of least overlap. If the result still
/// penetrates a wall (tight corners), the player keeps its previous position.
#[must_use]
pub fn resolve_player_movement(walls: &[Wall], current_pos: &Position, radius: f32, movement: Vec3) -> Position {
    let half = radius + COLLISION_BUFFER;
    let mut candidate = current_pos.offset(movement);

    for wall in walls {
        if !overlap_square_vs_wall(&candidate, wall, half) {
            continue;
        }

        let overlap_x = (candidate.x + half - wall.min_x).min(wall.max_x - (candidate.x - half));
        let overlap_z = (candidate.z + half - wall.min_z).min(wall.max_z - (candidate.z - half));
        let center = wall.center();

        if overlap_x < overlap_z {
            let push = overlap_x + SEPARATION_MARGIN;
            candidate.x += if candidate.x < center.x { -push } else { push };
        } else {
            let push = overlap_z + SEPARATION_MARGIN;
            candidate.z += if candidate.z < center.y { -push } else { push };
        }
    }

    if overlaps_any_wall(walls, &candidate, half) {
        return *current_pos;
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        constants::PLAYER_RADIUS,
        maze::{Maze, MazeConfig},
    };
    use rand::{Rng, SeedableRng, rngs::StdRng};

    fn corridor() -> Maze {
        Maze::new(&MazeConfig {
            layout: vec!["#####".into(), "#...#".into(), "#####".into()],
            ..MazeConfig::default()
        })
    }

    #[test]
    fn free_move_is_unchanged() {
        let m = corridor();
        let start = Position::new(0.0, 1.6, 0.0);
        let end = resolve_player_movement(m.walls(), &start, PLAYER_RADIUS, Vec3::new(1.0, 0.0, 0.2));
        assert_eq!(end, Position::new(1.0, 1.6, 0.2));
    }

    #[test]
    fn pushes_out_along_least_overlap() {
        let m = corridor();
        let start = Position::new(0.0, 1.6, 0.0);
        // Into the top wall while also moving along the corridor.
        let end = resolve_player_movement(m.walls(), &start, PLAYER_RADIUS, Vec3::new(0.7, 0.0, -1.8));
        let half = PLAYER_RADIUS + COLLISION_BUFFER;
        assert!((end.x - 0.7).abs() < 1e-6);
        assert!((end.z - (-2.0 + half)).abs() < 1e-3);
        assert!(!overlaps_any_wall(m.walls(), &end, half));
    }

    #[test]
    fn random_walk_never_penetrates_walls() {
        let m = Maze::default();
        let start = m.cell_center_world(16, 9);
        let mut pos = Position::new(start.x, 1.6, start.y);
        let mut rng = StdRng::seed_from_u64(11);
        let half = PLAYER_RADIUS + COLLISION_BUFFER;

        for _ in 0..5_000 {
            let movement = Vec3::new(rng.random_range(-0.8..0.8), 0.0, rng.random_range(-0.8..0.8));
            pos = resolve_player_movement(m.walls(), &pos, PLAYER_RADIUS, movement);
            assert!(!overlaps_any_wall(m.walls(), &pos, half));
        }
    }
}
