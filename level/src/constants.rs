use std::time::Duration;

// ============================================================================
// Level Loop
// ============================================================================

pub const TICK_RATE: u64 = 60; // Frames per second of the level loop

// ============================================================================
// Ghost Perception
// ============================================================================

pub const DETECTION_RANGE: f32 = 10.0; // Ground distance at which a ghost sees the player
pub const MEMORY_DURATION: Duration = Duration::from_millis(3000); // How long a lost player is searched for
pub const ARRIVAL_RADIUS: f32 = 1.0; // Close enough to a target to count as arrived

// ============================================================================
// Ghost Behavior
// ============================================================================

pub const GHOSTS_NUM: usize = 4;
pub const GHOST_SPEEDS: [f32; GHOSTS_NUM] = [2.5, 3.0, 3.5, 4.0]; // units per second, one per ghost

pub const PATROL_EXPIRY_MIN: Duration = Duration::from_secs(5);
pub const PATROL_EXPIRY_MAX: Duration = Duration::from_secs(10);
pub const PATROL_TARGET_ATTEMPTS: usize = 10;
pub const PATROL_FALLBACK_OFFSET: f32 = 2.0; // Max offset when no path cell is found for a target

pub const PATROL_JITTER: f32 = 0.3; // Wide wander
pub const SEARCH_JITTER: f32 = 0.1; // Slight wander
pub const FACING_SMOOTHING: f32 = 0.1; // Fraction of the heading error closed per tick

// ============================================================================
// Ghost Spawning
// ============================================================================

pub const SPAWN_ATTEMPTS: usize = 100;
pub const SPAWN_MIN_PLAYER_DISTANCE: f32 = 12.0;

// ============================================================================
// Encounters & Outcomes
// ============================================================================

pub const CATCH_RADIUS: f32 = 1.2;
pub const LOSS_DISPLAY_DELAY: Duration = Duration::from_millis(2000); // "Caught" message time before handoff
pub const WIN_DISPLAY_DELAY: Duration = Duration::from_millis(2000);

// ============================================================================
// Pellets
// ============================================================================

pub const PELLET_COLLECT_RADIUS: f32 = 1.0;
pub const PELLET_SCORE: u32 = 10;

// ============================================================================
// Player
// ============================================================================

pub const PLAYER_SPEED: f32 = 5.0; // units per second
