//! Wall-clock frame timing.
//!
//! The scene is driven by absolute elapsed time, not by accumulated deltas,
//! so a stalled frame jumps the sun forward rather than slowing it down.

use std::time::{Duration, Instant};

/// Statistics for the frames since the previous report.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameStats {
    /// Total frames since the clock started.
    pub frame_count: u64,
    /// Seconds since the clock started.
    pub elapsed: f32,
    /// Average frames per second over the reporting window.
    pub fps: f64,
}

/// Elapsed-time source for the frame loop, plus a frame counter.
pub struct FrameClock {
    start: Instant,
    frame_count: u64,
    window_start: Instant,
    window_frames: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    fn starting_at(start: Instant) -> Self {
        Self {
            start,
            frame_count: 0,
            window_start: start,
            window_frames: 0,
        }
    }

    /// Count a frame and return seconds since the clock started.
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> f32 {
        self.frame_count += 1;
        self.window_frames += 1;
        now.saturating_duration_since(self.start).as_secs_f32()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Report once every `interval` frames; 0 never reports.
    pub fn stats(&mut self, interval: u64) -> Option<FrameStats> {
        self.stats_at(interval, Instant::now())
    }

    fn stats_at(&mut self, interval: u64, now: Instant) -> Option<FrameStats> {
        if interval == 0 || self.frame_count == 0 || self.frame_count % interval != 0 {
            return None;
        }
        let window = now.saturating_duration_since(self.window_start);
        let fps = if window > Duration::ZERO {
            self.window_frames as f64 / window.as_secs_f64()
        } else {
            0.0
        };
        self.window_start = now;
        self.window_frames = 0;
        Some(FrameStats {
            frame_count: self.frame_count,
            elapsed: now.saturating_duration_since(self.start).as_secs_f32(),
            fps,
        })
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_returns_absolute_time() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);
        let t1 = clock.tick_at(start + Duration::from_millis(500));
        let t2 = clock.tick_at(start + Duration::from_millis(2500));
        assert!((t1 - 0.5).abs() < 1e-6);
        assert!((t2 - 2.5).abs() < 1e-6);
        assert_eq!(clock.frame_count(), 2);
    }

    #[test]
    fn test_time_never_negative() {
        let start = Instant::now() + Duration::from_secs(10);
        let mut clock = FrameClock::starting_at(start);
        assert_eq!(clock.tick_at(Instant::now()), 0.0);
    }

    #[test]
    fn test_stats_every_interval() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);
        let mut reports = Vec::new();
        for i in 1..=10u64 {
            let now = start + Duration::from_millis(i * 10);
            clock.tick_at(now);
            if let Some(stats) = clock.stats_at(5, now) {
                reports.push(stats);
            }
        }
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].frame_count, 5);
        assert_eq!(reports[1].frame_count, 10);
        // 5 frames in 50 ms.
        assert!((reports[0].fps - 100.0).abs() < 1e-6, "fps {}", reports[0].fps);
        assert!((reports[1].elapsed - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_stats_disabled_with_zero_interval() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);
        clock.tick_at(start);
        assert!(clock.stats_at(0, start).is_none());
    }

    #[test]
    fn test_no_stats_before_first_frame() {
        let mut clock = FrameClock::new();
        assert!(clock.stats(1).is_none());
    }
}
