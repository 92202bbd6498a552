//! Runtime simulation parameters
//!
//! Everything here can differ between embeddings (window size, tuning
//! experiments) without recompiling; fixed balance numbers stay in
//! [`consts`](crate::consts).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts;

/// Parameters fixed for the lifetime of one `GameState`, except the world
/// bounds which track host resizes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// World width in pixels
    pub world_width: f32,
    /// World height in pixels
    pub world_height: f32,
    /// Broad-phase cell side in pixels
    pub cell_size: f32,
    /// Seconds between contact-damage exchanges while the player overlaps
    /// an enemy. 0 exchanges damage on every overlapping tick.
    pub contact_damage_cooldown: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            world_width: consts::WORLD_WIDTH,
            world_height: consts::WORLD_HEIGHT,
            cell_size: consts::GRID_CELL_SIZE,
            contact_damage_cooldown: 0.0,
        }
    }
}

impl SimConfig {
    pub fn world_size(&self) -> Vec2 {
        Vec2::new(self.world_width, self.world_height)
    }

    pub fn world_center(&self) -> Vec2 {
        self.world_size() * 0.5
    }

    /// Parse from JSON. Missing fields fall back to defaults, so partial
    /// overrides like `{"cell_size": 32.0}` are fine.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
