//! Simulated-time source for the frame loop
//!
//! One `Clock` value is owned by the [`Scenario`](super::scenario::Scenario) and
//! ticked once per frame. It turns wall-clock frame time into a bounded delta,
//! scales it by a real-to-simulated multiplier, and keeps the running total of
//! simulated seconds that the stability search rewinds between trials.

use std::time::Instant;

/// Longest frame the clock will report, in real seconds
pub const MAX_FRAME: f64 = 0.05;

#[derive(Debug, Clone)]
pub struct Clock {
    last_frame: Option<Instant>,
    unscaled: f64, // clamped real seconds of the current frame
    multiplier: f64, // simulated seconds per real second
    paused: bool,
    total_time: f64, // accumulated simulated seconds

    // rate counters, rolled over every real second
    counter_time: f64,
    frame_count: u32,
    update_count: u64,
    fps: u32,
    ups: u64,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock {
    pub fn new() -> Self {
        Self {
            last_frame: None,
            unscaled: 0.0,
            multiplier: 1.0,
            paused: false,
            total_time: 0.0,
            counter_time: 0.0,
            frame_count: 0,
            update_count: 0,
            fps: 0,
            ups: 0,
        }
    }

    /// Measure the wall-clock time since the previous call and cache it as
    /// this frame's unscaled delta. The very first call reports 0.
    pub fn tick(&mut self) -> f64 {
        let now = Instant::now();
        let elapsed = match self.last_frame {
            Some(prev) => now.duration_since(prev).as_secs_f64(),
            None => 0.0,
        };
        self.last_frame = Some(now);
        self.tick_with(elapsed)
    }

    /// Same as [`Clock::tick`] but with an externally supplied frame time
    pub fn tick_with(&mut self, elapsed: f64) -> f64 {
        // NaN lands on 0 through max()
        self.unscaled = elapsed.max(0.0).min(MAX_FRAME);

        self.counter_time += self.unscaled;
        if self.counter_time > 1.0 {
            self.fps = self.frame_count;
            self.ups = self.update_count;
            self.frame_count = 0;
            self.update_count = 0;
            self.counter_time -= 1.0;
        }

        self.unscaled
    }

    /// Scaled simulated delta for this frame, 0 while paused
    pub fn delta(&self) -> f64 {
        if self.paused {
            0.0
        } else {
            self.unscaled * self.multiplier
        }
    }

    /// Raw frame delta, ignoring the multiplier. Camera and UI timing use this.
    pub fn delta_unscaled(&self, respect_pause: bool) -> f64 {
        if respect_pause && self.paused {
            0.0
        } else {
            self.unscaled
        }
    }

    pub fn advance_total_time(&mut self, dt: f64) {
        self.total_time += dt;
    }

    pub fn total_time(&self) -> f64 {
        self.total_time
    }

    pub fn set_total_time(&mut self, t: f64) {
        self.total_time = t;
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    pub fn set_multiplier(&mut self, value: f64) {
        self.multiplier = value;
    }

    /// Scale the current multiplier by `factor`
    pub fn change_multiplier(&mut self, factor: f64) {
        self.multiplier *= factor;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn record_frame(&mut self) {
        self.frame_count += 1;
    }

    /// Count integrator sub-steps taken this frame
    pub fn record_updates(&mut self, n: u64) {
        self.update_count += n;
    }

    /// Frames in the last full second, or the running count before the first rollover
    pub fn fps(&self) -> u32 {
        if self.fps > 0 { self.fps } else { self.frame_count }
    }

    pub fn ups(&self) -> u64 {
        if self.ups > 0 { self.ups } else { self.update_count }
    }
}
