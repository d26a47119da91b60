//! Obstacle spawner
//!
//! Runs on its own countdown rather than every frame. Each firing may place
//! a single spike or a batch of 2-4; a batch always leaves at least one
//! slot empty so it can be cleared. The next firing is scheduled after a
//! random interval divided by the current game speed, so spawns tighten as
//! the run speeds up.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::tuning::Tuning;

/// Score needed per extra concurrent obstacle
const SCORE_PER_OBSTACLE: u32 = 10;
/// Most obstacles allowed on screen before a spawn is skipped
const MAX_CONCURRENT: usize = 3;
/// Score at which obstacles reach full size
const SCORE_FOR_FULL_SIZE: f32 = 30.0;
/// Largest obstacle size multiplier
const MAX_SIZE_MULTIPLIER: f32 = 2.0;

/// Obstacles allowed on screen at `score`: 1, 2, 3 at scores 0, 10, 20+
pub fn max_obstacles(score: u32) -> usize {
    (1 + (score / SCORE_PER_OBSTACLE) as usize).min(MAX_CONCURRENT)
}

/// Obstacle size multiplier at `score`: linear from 1 to 2 over 30 points
pub fn size_multiplier(score: u32) -> f32 {
    (1.0 + score as f32 / SCORE_FOR_FULL_SIZE).min(MAX_SIZE_MULTIPLIER)
}

/// Placement for one obstacle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleSpawn {
    pub x: f32,
    pub y: f32,
    /// Edge length (square)
    pub size: f32,
    pub multiplier: f32,
    /// Slot index within the batch
    pub slot: u32,
}

/// Cancellable one-shot countdown
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpawnTimer {
    due_in_ms: Option<f32>,
}

impl SpawnTimer {
    pub fn schedule(&mut self, delay_ms: f32) {
        self.due_in_ms = Some(delay_ms.max(0.0));
    }

    pub fn cancel(&mut self) {
        self.due_in_ms = None;
    }

    pub fn is_pending(&self) -> bool {
        self.due_in_ms.is_some()
    }

    pub fn remaining_ms(&self) -> Option<f32> {
        self.due_in_ms
    }

    /// Count down. Returns true (once) when the timer fires.
    pub fn advance(&mut self, dt_ms: f32) -> bool {
        match self.due_in_ms {
            Some(remaining) if remaining - dt_ms <= 0.0 => {
                self.due_in_ms = None;
                true
            }
            Some(remaining) => {
                self.due_in_ms = Some(remaining - dt_ms);
                false
            }
            None => false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Spawner {
    rng: Pcg32,
    timer: SpawnTimer,
    /// Countdown held across a pause
    suspended_ms: Option<f32>,
}

impl Spawner {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            timer: SpawnTimer::default(),
            suspended_ms: None,
        }
    }

    /// (Re)start the chain: fire on the next advance
    pub fn start(&mut self) {
        self.suspended_ms = None;
        self.timer.schedule(0.0);
    }

    /// Drop any pending firing
    pub fn cancel(&mut self) {
        self.suspended_ms = None;
        self.timer.cancel();
    }

    /// Stop counting down but remember how long was left
    pub fn suspend(&mut self) {
        self.suspended_ms = self.timer.remaining_ms();
        self.timer.cancel();
    }

    /// Continue after `suspend`. With no held countdown the chain restarts.
    pub fn resume(&mut self) {
        let delay = self.suspended_ms.take().unwrap_or(0.0);
        self.timer.schedule(delay);
    }

    pub fn is_scheduled(&self) -> bool {
        self.timer.is_pending()
    }

    /// Time until the next firing (ms), if one is scheduled
    pub fn remaining_ms(&self) -> Option<f32> {
        self.timer.remaining_ms()
    }

    /// Count down the timer. Returns true when a spawn cycle is due.
    pub fn advance(&mut self, dt_ms: f32) -> bool {
        self.timer.advance(dt_ms)
    }

    /// Schedule the next firing. Returns the delay (ms).
    pub fn reschedule(&mut self, speed: f32, tuning: &Tuning) -> f32 {
        let min = tuning.min_spawn_interval_ms;
        let max = tuning.max_spawn_interval_ms.max(min);
        let interval = min + self.rng.random::<f32>() * (max - min);
        let delay = interval / speed.max(f32::EPSILON);
        self.timer.schedule(delay);
        delay
    }

    /// Decide what to place this cycle.
    ///
    /// Returns nothing when `active` obstacles already meet the score-based
    /// cap. Slots run left to right from just past the right edge.
    pub fn plan(
        &mut self,
        score: u32,
        active: usize,
        tuning: &Tuning,
        viewport_width: f32,
        ground_y: f32,
    ) -> Vec<ObstacleSpawn> {
        if active >= max_obstacles(score) {
            return Vec::new();
        }

        let multiplier = size_multiplier(score);
        let slots = self.batch_size(tuning);
        let size = tuning.obstacle_size * multiplier;
        let spacing = tuning.obstacle_spacing * multiplier;
        let gap_chance = tuning.gap_chance.clamp(0.0, 1.0);

        let mut placed = Vec::with_capacity(slots as usize);
        let mut gap = false;
        for slot in 0..slots {
            if !gap && self.rng.random_bool(gap_chance) {
                gap = true;
                continue;
            }
            placed.push(ObstacleSpawn {
                x: viewport_width + slot as f32 * spacing,
                y: ground_y - size,
                size,
                multiplier,
                slot,
            });
        }

        if !gap && slots > 1 {
            let index = self.rng.random_range(0..placed.len());
            placed.remove(index);
        }

        placed
    }

    fn batch_size(&mut self, tuning: &Tuning) -> u32 {
        if !self.rng.random_bool(tuning.batch_chance.clamp(0.0, 1.0)) {
            return 1;
        }
        let lo = tuning.batch_min.max(1);
        let hi = tuning.batch_max.max(lo);
        self.rng.random_range(lo..=hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const GROUND_Y: f32 = 468.0;
    const WIDTH: f32 = 800.0;

    #[test]
    fn test_max_obstacles_curve() {
        assert_eq!(max_obstacles(0), 1);
        assert_eq!(max_obstacles(9), 1);
        assert_eq!(max_obstacles(10), 2);
        assert_eq!(max_obstacles(19), 2);
        assert_eq!(max_obstacles(20), 3);
        assert_eq!(max_obstacles(25), 3);
        assert_eq!(max_obstacles(30), 3);
        assert_eq!(max_obstacles(1000), 3);
    }

    #[test]
    fn test_size_multiplier_curve() {
        assert_eq!(size_multiplier(0), 1.0);
        assert!((size_multiplier(15) - 1.5).abs() < 1e-6);
        assert_eq!(size_multiplier(30), 2.0);
        assert_eq!(size_multiplier(1000), 2.0);
    }

    #[test]
    fn test_timer_fires_once() {
        let mut timer = SpawnTimer::default();
        assert!(!timer.advance(16.0));

        timer.schedule(40.0);
        assert!(!timer.advance(16.0));
        assert!(!timer.advance(16.0));
        assert!(timer.advance(16.0));
        assert!(!timer.is_pending());
        assert!(!timer.advance(16.0));
    }

    #[test]
    fn test_timer_cancel() {
        let mut timer = SpawnTimer::default();
        timer.schedule(10.0);
        timer.cancel();
        assert!(!timer.advance(100.0));
    }

    #[test]
    fn test_start_fires_immediately() {
        let mut spawner = Spawner::new(1);
        spawner.start();
        assert!(spawner.advance(0.0));
    }

    #[test]
    fn test_suspend_keeps_countdown() {
        let tuning = Tuning::default();
        let mut spawner = Spawner::new(21);
        let delay = spawner.reschedule(5.0, &tuning);
        assert!(!spawner.advance(100.0));

        spawner.suspend();
        assert!(!spawner.is_scheduled());
        assert!(!spawner.advance(10_000.0));

        spawner.resume();
        let left = spawner.remaining_ms().unwrap();
        assert!((left - (delay - 100.0)).abs() < 1e-3);
        assert!(!spawner.advance(0.0));
    }

    #[test]
    fn test_resume_without_countdown_restarts() {
        let mut spawner = Spawner::new(2);
        spawner.suspend();
        spawner.resume();
        assert!(spawner.advance(0.0));

        // Cancelling drops a held countdown
        spawner.start();
        spawner.suspend();
        spawner.cancel();
        spawner.resume();
        assert_eq!(spawner.remaining_ms(), Some(0.0));
    }

    #[test]
    fn test_reschedule_scales_with_speed() {
        let tuning = Tuning::default();
        let mut spawner = Spawner::new(7);
        for _ in 0..100 {
            let slow = spawner.reschedule(5.0, &tuning);
            assert!((400.0..800.0).contains(&slow));
            let fast = spawner.reschedule(10.0, &tuning);
            assert!((200.0..400.0).contains(&fast));
        }
        assert!(spawner.is_scheduled());
    }

    #[test]
    fn test_no_capacity_no_spawn() {
        let tuning = Tuning::default();
        let mut spawner = Spawner::new(3);
        assert!(spawner.plan(0, 1, &tuning, WIDTH, GROUND_Y).is_empty());
        assert!(spawner.plan(12, 2, &tuning, WIDTH, GROUND_Y).is_empty());
        assert!(spawner.plan(500, 3, &tuning, WIDTH, GROUND_Y).is_empty());
    }

    #[test]
    fn test_forced_batches_keep_a_gap() {
        let tuning = Tuning {
            batch_chance: 1.0,
            batch_min: 4,
            batch_max: 4,
            gap_chance: 0.0,
            ..Default::default()
        };
        let mut spawner = Spawner::new(11);
        for _ in 0..50 {
            let plan = spawner.plan(0, 0, &tuning, WIDTH, GROUND_Y);
            assert_eq!(plan.len(), 3);
        }
    }

    #[test]
    fn test_placement_geometry() {
        let tuning = Tuning {
            batch_chance: 1.0,
            batch_min: 3,
            batch_max: 3,
            gap_chance: 1.0,
            ..Default::default()
        };
        let mut spawner = Spawner::new(5);
        // Score 15: multiplier 1.5, size 75, spacing 90; slot 0 is the gap
        let plan = spawner.plan(15, 0, &tuning, WIDTH, GROUND_Y);
        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].slot, 1);
        assert!((plan[0].x - (WIDTH + 90.0)).abs() < 1e-3);
        assert!((plan[1].x - (WIDTH + 180.0)).abs() < 1e-3);
        for spawn in &plan {
            assert!((spawn.size - 75.0).abs() < 1e-3);
            assert!((spawn.y + spawn.size - GROUND_Y).abs() < 1e-3);
        }
    }

    #[test]
    fn test_single_spawn_can_be_skipped() {
        let tuning = Tuning {
            batch_chance: 0.0,
            gap_chance: 1.0,
            ..Default::default()
        };
        let mut spawner = Spawner::new(9);
        assert!(spawner.plan(0, 0, &tuning, WIDTH, GROUND_Y).is_empty());

        let tuning = Tuning {
            batch_chance: 0.0,
            gap_chance: 0.0,
            ..Default::default()
        };
        let plan = spawner.plan(0, 0, &tuning, WIDTH, GROUND_Y);
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].x, WIDTH);
    }

    #[test]
    fn test_same_seed_same_plans() {
        let tuning = Tuning::default();
        let mut a = Spawner::new(42);
        let mut b = Spawner::new(42);
        for score in 0..40 {
            assert_eq!(
                a.plan(score, 0, &tuning, WIDTH, GROUND_Y),
                b.plan(score, 0, &tuning, WIDTH, GROUND_Y)
            );
        }
    }

    proptest! {
        #[test]
        fn batches_always_have_an_empty_slot(seed in any::<u64>(), score in 0u32..100) {
            let tuning = Tuning { batch_chance: 1.0, ..Default::default() };
            let mut spawner = Spawner::new(seed);
            let plan = spawner.plan(score, 0, &tuning, WIDTH, GROUND_Y);
            prop_assert!(plan.len() <= tuning.batch_max as usize - 1);
            prop_assert!(plan.len() >= tuning.batch_min as usize - 1);
            // Slots are strictly increasing, left to right
            prop_assert!(plan.windows(2).all(|w| w[0].slot < w[1].slot && w[0].x < w[1].x));
        }

        #[test]
        fn difficulty_curve_is_bounded_and_monotone(score in 0u32..10_000) {
            prop_assert!((1..=3).contains(&max_obstacles(score)));
            prop_assert!(max_obstacles(score) <= max_obstacles(score + 1));
            let m = size_multiplier(score);
            prop_assert!((1.0..=2.0).contains(&m));
            prop_assert!(m <= size_multiplier(score + 1));
        }
    }
}
