//! Per-frame timing of the simulation passes

use std::time::{Duration, Instant};

use serde::Serialize;

/// Wall-clock time spent in each pass of the last `step()`
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct FrameStats {
    pub bristles_ms: f64,
    pub splat_ms: f64,
    pub fluid_ms: f64,
    pub composite_ms: f64,
    /// Contacts that landed on the painting this frame
    pub contacts: u32,
    pub simulated: bool,
    pub redrawn: bool,
}

impl FrameStats {
    pub(crate) fn reset(&mut self) {
        *self = FrameStats::default();
    }

    pub fn total_ms(&self) -> f64 {
        self.bristles_ms + self.splat_ms + self.fluid_ms + self.composite_ms
    }
}

/// Runs `f` and returns its result with the elapsed time in milliseconds
#[inline]
pub(crate) fn timed<T>(f: impl FnOnce() -> T) -> (T, f64) {
    let start = Instant::now();
    let value = f();
    (value, duration_ms(start.elapsed()))
}

#[inline]
fn duration_ms(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_sums_passes() {
        let stats = FrameStats {
            bristles_ms: 1.0,
            splat_ms: 2.0,
            fluid_ms: 3.0,
            composite_ms: 4.0,
            ..FrameStats::default()
        };
        assert_eq!(stats.total_ms(), 10.0);
    }

    #[test]
    fn test_timed_returns_value() {
        let (value, ms) = timed(|| 21 * 2);
        assert_eq!(value, 42);
        assert!(ms >= 0.0);
    }

    #[test]
    fn test_reset() {
        let mut stats = FrameStats {
            contacts: 3,
            ..FrameStats::default()
        };
        stats.reset();
        assert_eq!(stats, FrameStats::default());
    }
}
