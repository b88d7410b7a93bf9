// ============================================================================
// Floating-Point Comparisons
// ============================================================================

// Small value for floating-point comparisons (near-zero checks, division guards).
pub const PHYSICS_EPSILON: f32 = 1e-6;

// ============================================================================
// Grid & Field
// ============================================================================

pub const CELL_SIZE: f32 = 4.0; // Each maze cell in world units
pub const WALL_HEIGHT: f32 = 4.0; // Wall meshes are built this tall

// Default level, 21 rows x 20 columns.
// '#' wall, '.' path with pellet, ' ' path without pellet, 'P' player start
pub const DEFAULT_LAYOUT: [&str; 21] = [
    "####################",
    "#........##........#",
    "#.##.###.##.###.##.#",
    "#.##.###.##.###.##.#",
    "#..................#",
    "#.##.......#.#.##..#",
    "#....##.####.##....#",
    "####.#........#.####",
    "####.#.##  ##.#.####",
    "#.....#      #.....#",
    "#.###.# #### #.###.#",
    "#.....#      #.....#",
    "####.#.##  ##.#.####",
    "####.#........#.####",
    "#........##........#",
    "#.##.###.##.###.##.#",
    "#..#.....P......#..#",
    "##.#.#.######.#.#.##",
    "#....#...##...#....#",
    "#..................#",
    "####################",
];

// ============================================================================
// Player
// ============================================================================

pub const PLAYER_RADIUS: f32 = 0.4;
pub const PLAYER_EYE_HEIGHT: f32 = 1.6; // Camera height, the player's fixed Y

// ============================================================================
// Ghosts
// ============================================================================

pub const GHOST_RADIUS: f32 = 0.6;
pub const GHOST_HEIGHT: f32 = 1.0; // Ghosts float on a fixed plane

// ============================================================================
// Collision Tuning
// ============================================================================

pub const COLLISION_BUFFER: f32 = 0.1; // Added to each half-extent of an agent's box
pub const BOUNCE_DISTANCE: f32 = 0.2; // Push-back away from a wall when sliding fails

// ============================================================================
// Corridor Centering
// ============================================================================

pub const CENTERING_THRESHOLD: f32 = 1.0; // Off-center distance before nudging kicks in
pub const CENTERING_WEIGHT: f32 = 0.03;
