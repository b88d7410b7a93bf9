use bevy_ecs::prelude::*;
use bevy_math::Vec2;
use serde::Deserialize;
use tracing::warn;

use crate::constants::{CELL_SIZE, DEFAULT_LAYOUT, WALL_HEIGHT};

// ============================================================================
// Cells
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Wall,
    Path,
}

// Result of a cell lookup, which may fall outside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellType {
    Wall,
    Path,
    OutOfBounds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellCoord {
    pub row: i32,
    pub col: i32,
}

impl CellCoord {
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

// Axis-aligned footprint of one wall cell on the XZ plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wall {
    pub cell: CellCoord,
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
}

impl Wall {
    #[must_use]
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            f32::midpoint(self.min_x, self.max_x),
            f32::midpoint(self.min_z, self.max_z),
        )
    }
}

// ============================================================================
// Configuration
// ============================================================================

// Static level geometry, handed to the maze once at level load.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MazeConfig {
    pub layout: Vec<String>,
    pub cell_size: f32,
    pub wall_height: f32,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            layout: DEFAULT_LAYOUT.iter().map(|row| (*row).to_string()).collect(),
            cell_size: CELL_SIZE,
            wall_height: WALL_HEIGHT,
        }
    }
}

// ============================================================================
// Maze
// ============================================================================

/// Immutable grid of wall and path cells with cell/world conversions.
///
/// Built once from a [`MazeConfig`]. Construction never fails: ragged rows are padded
/// with walls, the outer border is forced to walls, unknown characters become walls and
/// an empty layout is replaced by the default level.
#[derive(Resource, Debug, Clone)]
pub struct Maze {
    rows: i32,
    cols: i32,
    cell_size: f32,
    wall_height: f32,
    cells: Vec<Cell>,
    walls: Vec<Wall>,
    pellets: Vec<CellCoord>,
    player_start: Option<CellCoord>,
}

impl Maze {
    #[must_use]
    pub fn new(config: &MazeConfig) -> Self {
        let layout: Vec<&str> = if config.layout.iter().all(|row| row.is_empty()) {
            warn!("empty maze layout, using the default level");
            DEFAULT_LAYOUT.to_vec()
        } else {
            config.layout.iter().map(String::as_str).collect()
        };

        let cell_size = if config.cell_size.is_finite() && config.cell_size > 0.0 {
            config.cell_size
        } else {
            warn!(cell_size = config.cell_size, "invalid cell size, using {}", CELL_SIZE);
            CELL_SIZE
        };

        let rows = layout.len() as i32;
        let cols = layout.iter().map(|row| row.chars().count()).max().unwrap_or(0) as i32;

        let ragged = layout.iter().filter(|row| row.chars().count() as i32 != cols).count();
        if ragged > 0 {
            warn!(ragged, cols, "ragged maze rows, padding with walls");
        }

        let mut cells = vec![Cell::Wall; (rows * cols) as usize];
        let mut pellets = Vec::new();
        let mut player_start = None;
        let mut border_fixes = 0;

        for (row, line) in layout.iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                let (row, col) = (row as i32, col as i32);
                let on_border = row == 0 || col == 0 || row == rows - 1 || col == cols - 1;

                let cell = match ch {
                    '#' | '1' => Cell::Wall,
                    '.' | ' ' | '0' | 'P' => Cell::Path,
                    other => {
                        warn!(row, col, "unknown maze character {other:?}, treating as wall");
                        Cell::Wall
                    }
                };

                if on_border && cell == Cell::Path {
                    border_fixes += 1;
                    continue;
                }

                cells[(row * cols + col) as usize] = cell;
                match ch {
                    '.' => pellets.push(CellCoord::new(row, col)),
                    'P' => player_start = Some(CellCoord::new(row, col)),
                    _ => {}
                }
            }
        }

        if border_fixes > 0 {
            warn!(border_fixes, "open border cells closed with walls");
        }

        let mut maze = Self {
            rows,
            cols,
            cell_size,
            wall_height: config.wall_height,
            cells,
            walls: Vec::new(),
            pellets,
            player_start,
        };
        maze.walls = maze.build_walls();
        maze
    }

    fn build_walls(&self) -> Vec<Wall> {
        let half = self.cell_size / 2.0;
        let mut walls = Vec::new();
        for row in 0..self.rows {
            for col in 0..self.cols {
                if self.cell_type(row, col) != CellType::Wall {
                    continue;
                }
                let center = self.cell_center_world(row, col);
                walls.push(Wall {
                    cell: CellCoord::new(row, col),
                    min_x: center.x - half,
                    max_x: center.x + half,
                    min_z: center.y - half,
                    max_z: center.y + half,
                });
            }
        }
        walls
    }

    #[must_use]
    pub const fn rows(&self) -> i32 {
        self.rows
    }

    #[must_use]
    pub const fn cols(&self) -> i32 {
        self.cols
    }

    #[must_use]
    pub const fn cell_size(&self) -> f32 {
        self.cell_size
    }

    #[must_use]
    pub const fn wall_height(&self) -> f32 {
        self.wall_height
    }

    #[must_use]
    pub fn cell_type(&self, row: i32, col: i32) -> CellType {
        if !(0..self.rows).contains(&row) || !(0..self.cols).contains(&col) {
            return CellType::OutOfBounds;
        }
        match self.cells[(row * self.cols + col) as usize] {
            Cell::Wall => CellType::Wall,
            Cell::Path => CellType::Path,
        }
    }

    #[must_use]
    pub fn is_path(&self, cell: CellCoord) -> bool {
        self.cell_type(cell.row, cell.col) == CellType::Path
    }

    // World (x, z) of a cell center; the returned Vec2 carries z in `y`.
    #[must_use]
    pub fn cell_center_world(&self, row: i32, col: i32) -> Vec2 {
        let x = (col as f32 - self.cols as f32 / 2.0 + 0.5) * self.cell_size;
        let z = (row as f32 - self.rows as f32 / 2.0 + 0.5) * self.cell_size;
        Vec2::new(x, z)
    }

    // Nearest cell to a world point. Only for soft heuristics, not authoritative collision.
    #[must_use]
    pub fn world_to_cell(&self, x: f32, z: f32) -> CellCoord {
        let col = (x / self.cell_size + self.cols as f32 / 2.0 - 0.5).round() as i32;
        let row = (z / self.cell_size + self.rows as f32 / 2.0 - 0.5).round() as i32;
        CellCoord::new(row, col)
    }

    #[must_use]
    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    #[must_use]
    pub fn pellet_cells(&self) -> &[CellCoord] {
        &self.pellets
    }

    #[must_use]
    pub const fn player_start(&self) -> Option<CellCoord> {
        self.player_start
    }

    pub fn path_cells(&self) -> impl Iterator<Item = CellCoord> + '_ {
        (0..self.rows)
            .flat_map(move |row| (0..self.cols).map(move |col| CellCoord::new(row, col)))
            .filter(|cell| self.is_path(*cell))
    }
}

impl Default for Maze {
    fn default() -> Self {
        Self::new(&MazeConfig::default())
    }
}
