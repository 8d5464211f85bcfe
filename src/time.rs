//! Frame timing
//!
//! [`Time`] tracks the delta between frames and the total elapsed run
//! time; the driver calls [`Time::update`] exactly once per frame and
//! feeds the scaled delta into the scene.

use std::time::{Duration, Instant};

/// Frame clock owned by the frame driver
#[derive(Clone, Debug)]
pub struct Time {
    delta: Duration,
    elapsed: Duration,
    frame_count: u64,
    time_scale: f32,
    startup: Instant,
    last_update: Instant,
}

impl Time {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
            time_scale: 1.0,
            startup: now,
            last_update: now,
        }
    }

    /// Advance the clock; call once at the top of each frame
    pub fn update(&mut self) {
        let now = Instant::now();
        self.delta = now.duration_since(self.last_update);
        self.elapsed = now.duration_since(self.startup);
        self.last_update = now;
        self.frame_count += 1;
    }

    pub fn delta(&self) -> Duration {
        self.delta
    }

    /// Delta in seconds with the time scale applied
    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32() * self.time_scale
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Simulation speed multiplier; clamped at zero
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}
