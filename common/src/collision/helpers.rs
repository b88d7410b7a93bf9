use crate::{components::Position, maze::Wall};

// Check if two 1D ranges overlap. Touching ranges do not count as penetration.
#[must_use]
pub fn ranges_overlap_1d(a_min: f32, a_max: f32, b_min: f32, b_max: f32) -> bool {
    a_max > b_min && a_min < b_max
}

// Axis-aligned wall overlap against a square with the given half-extent.
#[must_use]
pub fn overlap_square_vs_wall(entity_pos: &Position, wall: &Wall, half: f32) -> bool {
    ranges_overlap_1d(entity_pos.x - half, entity_pos.x + half, wall.min_x, wall.max_x)
        && ranges_overlap_1d(entity_pos.z - half, entity_pos.z + half, wall.min_z, wall.max_z)
}

// First wall, closest to the entity, whose box penetrates the entity's square.
#[must_use]
pub fn closest_overlapping_wall<'a>(walls: &'a [Wall], entity_pos: &Position, half: f32) -> Option<&'a Wall> {
    walls
        .iter()
        .filter(|wall| overlap_square_vs_wall(entity_pos, wall, half))
        .min_by(|a, b| {
            let da = a.center().distance_squared(entity_pos.ground());
            let db = b.center().distance_squared(entity_pos.ground());
            da.total_cmp(&db)
        })
}

#[must_use]
pub fn overlaps_any_wall(walls: &[Wall], entity_pos: &Position, half: f32) -> bool {
    walls.iter().any(|wall| overlap_square_vs_wall(entity_pos, wall, half))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::CellCoord;

    fn wall() -> Wall {
        Wall {
            cell: CellCoord::new(0, 0),
            min_x: 0.0,
            max_x: 2.0,
            min_z: 0.0,
            max_z: 2.0,
        }
    }

    #[test]
    fn touching_is_not_overlap() {
        assert!(!ranges_overlap_1d(0.0, 1.0, 1.0, 2.0));
        assert!(ranges_overlap_1d(0.0, 1.01, 1.0, 2.0));
    }

    #[test]
    fn square_overlap_needs_both_axes() {
        let w = wall();
        assert!(overlap_square_vs_wall(&Position::new(2.4, 0.0, 1.0), &w, 0.5));
        assert!(!overlap_square_vs_wall(&Position::new(2.6, 0.0, 1.0), &w, 0.5));
        assert!(!overlap_square_vs_wall(&Position::new(2.4, 0.0, 3.0), &w, 0.5));
    }

    #[test]
    fn closest_wall_is_chosen() {
        let near = wall();
        let far = Wall {
            min_x: 2.0,
            max_x: 4.0,
            ..wall()
        };
        let walls = [far, near];
        let hit = closest_overlapping_wall(&walls, &Position::new(1.5, 0.0, 1.0), 1.0);
        assert_eq!(hit, Some(&near));
    }
}
