//! Spike Runner - An endless runner on an HTML canvas
//!
//! Core modules:
//! - `sim`: Simulation (entities, scene, physics, collisions, spawner, game state)
//! - `renderer`: 2D surface abstraction, canvas backend, HUD
//! - `platform`: Browser/native platform abstraction (input, frame clock)
//! - `persistence`: Key/value storage for the high score
//! - `tuning`: Data-driven game balance

pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::HighScore;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Length of the 60 Hz reference frame that scroll speeds are expressed in (ms)
    pub const REFERENCE_FRAME_MS: f32 = 1000.0 / 60.0;
    /// Largest frame delta the simulation accepts (ms); longer gaps are clamped
    pub const MAX_FRAME_MS: f32 = 100.0;

    /// Draw/update priorities (lower is drawn first)
    pub const Z_GROUND: i32 = -10;
    pub const Z_OBSTACLE: i32 = 0;
    pub const Z_CHARACTER: i32 = 1;

    /// Character run cycle
    pub const CHARACTER_FRAMES: [&str; 3] = [
        "assets/enemy-0.png",
        "assets/enemy-1.png",
        "assets/enemy-2.png",
    ];
    /// Spike sprite (drawn stretched to the obstacle's size)
    pub const OBSTACLE_SPRITE: &str = "assets/smallspike.png";

    /// Storage key for the persisted high score
    pub const HIGH_SCORE_KEY: &str = "highScore";
    /// How long the persisted high score lives (days)
    pub const HIGH_SCORE_TTL_DAYS: u32 = 365;
}

/// Convert a frame delta into a count of 60 Hz reference frames
#[inline]
pub fn reference_frames(dt_ms: f32) -> f32 {
    dt_ms / consts::REFERENCE_FRAME_MS
}
