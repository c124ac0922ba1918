//! # Frame Clock
//!
//! Wall-clock time between redraws. The delta drives camera movement and the FPS readout
//! in the HUD.

use web_time::{Duration, Instant};

/// Measures the time between consecutive frames so camera movement is independent of
/// the frame rate.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    last_frame: Instant,
    delta: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(start: Instant) -> Self {
        Self {
            last_frame: start,
            delta: Duration::ZERO,
        }
    }

    /// Starts a new frame and returns the time since the previous one.
    pub fn tick(&mut self) -> Duration {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> Duration {
        self.delta = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;
        self.delta
    }

    /// Duration of the most recent frame.
    pub fn delta(&self) -> Duration {
        self.delta
    }

    /// Frames per second implied by the most recent frame, zero before the first tick.
    pub fn frames_per_second(&self) -> f32 {
        let seconds = self.delta.as_secs_f32();
        if seconds > 0.0 {
            seconds.recip()
        } else {
            0.0
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
