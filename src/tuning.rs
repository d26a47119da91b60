//! Data-driven game balance
//!
//! Every gameplay number lives here so balance passes can ship as JSON
//! without touching code. Units: pixels, milliseconds, px/s, px/s².

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Physics ===
    /// Downward acceleration applied to the character (px/s²)
    pub gravity: f32,
    /// Vertical velocity set by a jump (px/s, negative is up)
    pub jump_velocity: f32,

    // === Speed ===
    /// Scroll speed at the start of every run (px per reference frame)
    pub base_speed: f32,
    /// Speed gained per reference frame while running
    pub speed_ramp: f32,
    /// Scroll exactly `speed` px per rendered frame, ignoring frame timing
    pub frame_locked_scroll: bool,

    // === Spawner ===
    /// Lower bound of the spawn interval before speed scaling (ms)
    pub min_spawn_interval_ms: f32,
    /// Upper bound of the spawn interval before speed scaling (ms)
    pub max_spawn_interval_ms: f32,
    /// Probability that a spawn is a batch rather than a single obstacle
    pub batch_chance: f64,
    /// Smallest batch (slots)
    pub batch_min: u32,
    /// Largest batch (slots)
    pub batch_max: u32,
    /// Per-slot probability of leaving the batch gap in that slot
    pub gap_chance: f64,
    /// Obstacle edge length at multiplier 1 (px)
    pub obstacle_size: f32,
    /// Horizontal distance between batch slots at multiplier 1 (px)
    pub obstacle_spacing: f32,

    // === Character ===
    /// Character width and height (px)
    pub character_size: [f32; 2],
    /// Character left edge (px from the viewport's left)
    pub character_x: f32,
    /// Height above the ground line the character starts at (px)
    pub character_drop: f32,
    /// Character hitbox scale (fraction of the sprite on each axis)
    pub character_hitbox: [f32; 2],
    /// Time each run-cycle frame is shown (ms)
    pub frame_duration_ms: f32,

    // === Layout ===
    /// Ground line as a fraction of the viewport height
    pub ground_ratio: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 2000.0,
            jump_velocity: -900.0,

            base_speed: 5.0,
            speed_ramp: 0.001,
            frame_locked_scroll: false,

            min_spawn_interval_ms: 2000.0,
            max_spawn_interval_ms: 4000.0,
            batch_chance: 0.3,
            batch_min: 2,
            batch_max: 4,
            gap_chance: 0.5,
            obstacle_size: 50.0,
            obstacle_spacing: 60.0,

            character_size: [64.0, 64.0],
            character_x: 100.0,
            character_drop: 36.0,
            character_hitbox: [0.8, 0.8],
            frame_duration_ms: 100.0,

            ground_ratio: 0.78,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Reference frames represented by a frame delta
    pub fn scroll_frames(&self, dt_ms: f32) -> f32 {
        if self.frame_locked_scroll {
            1.0
        } else {
            crate::reference_frames(dt_ms)
        }
    }
}
