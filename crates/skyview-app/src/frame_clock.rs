//! Wall-clock frame deltas for the sun animation.

use std::time::Instant;
use tracing::warn;

/// Longest delta handed to the animation.
pub const MAX_FRAME_MS: f64 = 250.0;

pub struct FrameClock {
    previous: Instant,
    frame_count: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            previous: Instant::now(),
            frame_count: 0,
        }
    }

    /// Milliseconds since the previous tick (or reset), clamped to
    /// [`MAX_FRAME_MS`].
    pub fn tick(&mut self) -> f64 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.previous).as_secs_f64() * 1000.0;
        self.previous = now;
        self.frame_count += 1;
        clamp_frame_ms(elapsed)
    }

    /// Restart timing from now, e.g. after a long initialization.
    pub fn reset(&mut self) {
        self.previous = Instant::now();
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

pub fn clamp_frame_ms(elapsed_ms: f64) -> f64 {
    if elapsed_ms > MAX_FRAME_MS {
        warn!(
            "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
            elapsed_ms, MAX_FRAME_MS
        );
        MAX_FRAME_MS
    } else {
        elapsed_ms.max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_frames_pass_through() {
        assert_eq!(clamp_frame_ms(16.0), 16.0);
        assert_eq!(clamp_frame_ms(0.0), 0.0);
        assert_eq!(clamp_frame_ms(MAX_FRAME_MS), MAX_FRAME_MS);
    }

    #[test]
    fn test_long_frames_are_clamped() {
        assert_eq!(clamp_frame_ms(5_000.0), MAX_FRAME_MS);
    }

    #[test]
    fn test_tick_is_bounded_and_counts() {
        let mut clock = FrameClock::new();
        for _ in 0..3 {
            let dt = clock.tick();
            assert!((0.0..=MAX_FRAME_MS).contains(&dt));
        }
        assert_eq!(clock.frame_count(), 3);
    }

    #[test]
    fn test_reset_restarts_timing() {
        let mut clock = FrameClock::new();
        std::thread::sleep(std::time::Duration::from_millis(20));
        clock.reset();
        assert!(clock.tick() < 20.0);
    }
}
