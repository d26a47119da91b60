//! Game state: score, speed and the Running/GameOver machine

use serde::{Deserialize, Serialize};

use crate::highscores::HighScore;
use crate::persistence::KvStore;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    #[default]
    Running,
    /// Run ended; waiting for a click to restart
    GameOver,
}

/// Canvas dimensions (px)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Y of the ground line
    pub fn ground_y(&self, ground_ratio: f32) -> f32 {
        self.height * ground_ratio
    }
}

/// Shared run state, passed explicitly to entities and the spawner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameContext {
    /// Obstacles passed this run
    pub score: u32,
    /// Best score across sessions
    pub high_score: HighScore,
    /// Scroll speed (px per reference frame)
    pub speed: f32,
    /// Current phase
    pub phase: GamePhase,
    /// Speed every run starts at
    base_speed: f32,
}

impl GameContext {
    pub fn new(base_speed: f32, high_score: HighScore) -> Self {
        Self {
            score: 0,
            high_score,
            speed: base_speed,
            phase: GamePhase::Running,
            base_speed,
        }
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Count a passed obstacle
    pub fn award_point(&mut self) {
        if self.is_running() {
            self.score += 1;
        }
    }

    /// Ramp up the speed (never while the run is over, never downward)
    pub fn accelerate(&mut self, amount: f32) {
        if self.is_running() && amount > 0.0 {
            self.speed += amount;
        }
    }

    /// Running → GameOver. Commits the high score if beaten.
    ///
    /// Returns true if this call ended the run.
    pub fn end_run(&mut self, store: &mut dyn KvStore) -> bool {
        if self.is_over() {
            return false;
        }
        self.phase = GamePhase::GameOver;
        let record = self.high_score.submit(self.score, store);
        log::info!(
            "Game over: score {} (high score {}{})",
            self.score,
            self.high_score.best,
            if record { ", new record" } else { "" }
        );
        true
    }

    /// GameOver → Running with fresh counters
    pub fn restart(&mut self) {
        self.phase = GamePhase::Running;
        self.score = 0;
        self.speed = self.base_speed;
    }
}
