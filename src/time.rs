//! Tick timing for the frame scheduler.
//!
//! [`Clock`] measures elapsed and per-tick delta time with `std::time`.
//! Delta time is clamped to a configurable maximum so a stalled frame (a
//! paused process, a dragged window) cannot inject an enormous integration
//! step into the modules. A fixed delta can be set for deterministic tests.

use std::time::Instant;

/// Default upper bound on delta time, seconds.
pub const DEFAULT_MAX_DELTA: f32 = 0.1;

/// Time tracking for the scheduler loop.
#[derive(Debug)]
pub struct Clock {
    start: Instant,
    last_tick: Instant,
    elapsed_secs: f32,
    delta_secs: f32,
    tick_count: u64,
    /// Clamp applied to raw delta time.
    max_delta: f32,
    /// Fixed delta for deterministic updates (overrides measurement).
    fixed_delta: Option<f32>,
}

impl Clock {
    /// Create a clock starting from now.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_tick: now,
            elapsed_secs: 0.0,
            delta_secs: 0.0,
            tick_count: 0,
            max_delta: DEFAULT_MAX_DELTA,
            fixed_delta: None,
        }
    }

    /// Advance the clock by one tick. Returns `(elapsed, delta)` in seconds.
    ///
    /// Delta is never negative and never exceeds the configured maximum.
    pub fn update(&mut self) -> (f32, f32) {
        let now = Instant::now();
        let raw = now.duration_since(self.last_tick).as_secs_f32();
        self.delta_secs = self
            .fixed_delta
            .unwrap_or(raw)
            .clamp(0.0, self.max_delta);
        self.last_tick = now;
        self.elapsed_secs = now.duration_since(self.start).as_secs_f32();
        self.tick_count += 1;
        (self.elapsed_secs, self.delta_secs)
    }

    /// Seconds since the clock was created.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs
    }

    /// Clamped delta of the most recent tick, seconds.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Ticks since creation.
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.tick_count
    }

    /// Set the delta-time clamp. Values at or below zero fall back to the
    /// default.
    pub fn set_max_delta(&mut self, max: f32) {
        self.max_delta = if max > 0.0 { max } else { DEFAULT_MAX_DELTA };
    }

    /// Use a fixed delta instead of wall-clock measurement.
    ///
    /// Pass `None` to return to measured timing.
    pub fn set_fixed_delta(&mut self, delta: Option<f32>) {
        self.fixed_delta = delta;
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}
