//! Frame timing

use crate::consts::{MAX_FRAME_MS, REFERENCE_FRAME_MS};

/// Turns animation-frame timestamps into frame deltas
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_time_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delta since the previous call (ms).
    ///
    /// The first frame counts as one reference frame. Deltas are clamped to
    /// `[0, MAX_FRAME_MS]` so a backgrounded tab does not teleport entities.
    pub fn delta(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_time_ms {
            Some(last) => ((now_ms - last) as f32).clamp(0.0, MAX_FRAME_MS),
            None => REFERENCE_FRAME_MS,
        };
        self.last_time_ms = Some(now_ms);
        dt
    }

    /// Forget the last timestamp (after a pause)
    pub fn reset(&mut self) {
        self.last_time_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_is_reference() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.delta(1234.0), REFERENCE_FRAME_MS);
        assert_eq!(clock.delta(1250.0), 16.0);
    }

    #[test]
    fn test_delta_is_clamped() {
        let mut clock = FrameClock::new();
        clock.delta(0.0);
        assert_eq!(clock.delta(5000.0), MAX_FRAME_MS);
        assert_eq!(clock.delta(4000.0), 0.0);
    }

    #[test]
    fn test_reset() {
        let mut clock = FrameClock::new();
        clock.delta(0.0);
        clock.reset();
        assert_eq!(clock.delta(9000.0), REFERENCE_FRAME_MS);
    }
}
