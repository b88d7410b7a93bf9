use std::{path::Path, time::Duration};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use crate::{constants::*, resources::LevelTuning};
use common::maze::MazeConfig;

const LOG_FILTER: &str = "info";

// ============================================================================
// Level Configuration
// ============================================================================

/// Everything needed to build one maze level. Every field has a default, so a JSON file
/// only needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    pub level_id: String,
    pub door_id: String,
    pub maze: MazeConfig,
    pub num_ghosts: usize,
    pub ghost_speeds: Vec<f32>,
    pub detection_range: f32,
    pub catch_radius: f32,
    pub memory_duration_ms: u64,
    pub loss_delay_ms: u64,
    pub win_delay_ms: u64,
    pub seed: Option<u64>,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            level_id: "maze".to_string(),
            door_id: "maze-door".to_string(),
            maze: MazeConfig::default(),
            num_ghosts: GHOSTS_NUM,
            ghost_speeds: GHOST_SPEEDS.to_vec(),
            detection_range: DETECTION_RANGE,
            catch_radius: CATCH_RADIUS,
            memory_duration_ms: MEMORY_DURATION.as_millis() as u64,
            loss_delay_ms: LOSS_DISPLAY_DELAY.as_millis() as u64,
            win_delay_ms: WIN_DISPLAY_DELAY.as_millis() as u64,
            seed: None,
        }
    }
}

impl LevelConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("Failed to parse level config {}", path.display()))
    }

    // Speed of the n-th ghost; speeds are cycled when there are more ghosts than entries.
    #[must_use]
    pub fn ghost_speed(&self, index: usize) -> f32 {
        if self.ghost_speeds.is_empty() {
            GHOST_SPEEDS[index % GHOST_SPEEDS.len()]
        } else {
            self.ghost_speeds[index % self.ghost_speeds.len()]
        }
    }

    #[must_use]
    pub const fn tuning(&self) -> LevelTuning {
        LevelTuning {
            detection_range: self.detection_range,
            catch_radius: self.catch_radius,
            memory_duration: Duration::from_millis(self.memory_duration_ms),
            loss_delay: Duration::from_millis(self.loss_delay_ms),
            win_delay: Duration::from_millis(self.win_delay_ms),
        }
    }
}

// ============================================================================
// Logging
// ============================================================================

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
