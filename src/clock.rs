//! Frame clock for the host loop.
//!
//! Produces the `delta_time` fed to [`MorphEngine::advance`](crate::MorphEngine::advance).
//! Deltas are clamped to [`FrameClock::max_delta`] so a stall (window drag,
//! breakpoint, tab switch) shows up as one long frame instead of a jump.
//!
//! ```ignore
//! let mut clock = FrameClock::new();
//! loop {
//!     let dt = clock.tick();
//!     engine.advance(dt, &config, reader.snapshot());
//! }
//! ```

use std::time::{Duration, Instant};

/// Default upper bound on a single frame's delta, in seconds.
pub const DEFAULT_MAX_DELTA: f32 = 0.25;

/// Wall-clock frame timer.
#[derive(Debug)]
pub struct FrameClock {
    last_frame: Instant,
    /// Scaled seconds handed out so far.
    elapsed_secs: f64,
    delta_secs: f32,
    frame_count: u64,
    paused: bool,
    fixed_delta: Option<f32>,
    time_scale: f32,
    max_delta: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            elapsed_secs: 0.0,
            delta_secs: 0.0,
            frame_count: 0,
            paused: false,
            fixed_delta: None,
            time_scale: 1.0,
            max_delta: DEFAULT_MAX_DELTA,
        }
    }

    /// Measure the frame and return its delta in seconds. Call once per frame.
    ///
    /// Returns 0 while paused.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let raw = now.duration_since(self.last_frame);
        self.last_frame = now;
        self.frame_count += 1;
        self.advance_by(raw)
    }

    /// Like [`tick`](Self::tick) with a supplied wall-clock delta. Useful for
    /// tests and for hosts that already measure frame time.
    pub fn advance_by(&mut self, raw: Duration) -> f32 {
        if self.paused {
            self.delta_secs = 0.0;
            return 0.0;
        }

        let base = self.fixed_delta.unwrap_or(raw.as_secs_f32()).min(self.max_delta);
        self.delta_secs = base * self.time_scale;
        self.elapsed_secs += self.delta_secs as f64;
        self.delta_secs
    }

    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Scaled seconds handed out since creation or [`reset`](Self::reset).
    #[inline]
    pub fn elapsed(&self) -> f64 {
        self.elapsed_secs
    }

    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[inline]
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    #[inline]
    pub fn max_delta(&self) -> f32 {
        self.max_delta
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume without counting the paused interval as frame time.
    pub fn resume(&mut self) {
        if self.paused {
            self.last_frame = Instant::now();
            self.paused = false;
        }
    }

    /// Use a constant delta regardless of wall time. `None` restores real timing.
    pub fn set_fixed_delta(&mut self, delta: Option<f32>) {
        self.fixed_delta = delta.filter(|d| d.is_finite() && *d >= 0.0);
    }

    /// Set the time scale multiplier. Negative and non-finite values become 0.
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = if scale.is_finite() { scale.max(0.0) } else { 0.0 };
    }

    /// Set the stall clamp. Non-positive values are ignored.
    pub fn set_max_delta(&mut self, max_delta: f32) {
        if max_delta.is_finite() && max_delta > 0.0 {
            self.max_delta = max_delta;
        }
    }

    pub fn reset(&mut self) {
        self.last_frame = Instant::now();
        self.elapsed_secs = 0.0;
        self.delta_secs = 0.0;
        self.frame_count = 0;
        self.paused = false;
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
    use std::thread;

    #[test]
    fn test_clock_new() {
        let clock = FrameClock::new();
        assert_eq!(clock.frame(), 0);
        assert!(!clock.is_paused());
        assert_eq!(clock.time_scale(), 1.0);
    }

    #[test]
    fn test_tick_measures_time() {
        let mut clock = FrameClock::new();
        thread::sleep(Duration::from_millis(10));
        let dt = clock.tick();
        assert!(dt > 0.0);
        assert_eq!(clock.frame(), 1);
    }

    #[test]
    fn test_stall_is_clamped() {
        let mut clock = FrameClock::new();
        let dt = clock.advance_by(Duration::from_secs(3));
        assert_eq!(dt, DEFAULT_MAX_DELTA);
    }

    #[test]
    fn test_pause() {
        let mut clock = FrameClock::new();
        clock.advance_by(Duration::from_millis(16));
        let before = clock.elapsed();

        clock.pause();
        assert_eq!(clock.advance_by(Duration::from_millis(16)), 0.0);
        assert_eq!(clock.elapsed(), before);

        clock.resume();
        assert!(clock.advance_by(Duration::from_millis(16)) > 0.0);
    }

    #[test]
    fn test_time_scale() {
        let mut clock = FrameClock::new();
        clock.set_time_scale(2.0);
        let dt = clock.advance_by(Duration::from_millis(100));
        assert!((dt - 0.2).abs() < 1e-6);

        clock.set_time_scale(-1.0);
        assert_eq!(clock.time_scale(), 0.0);
        clock.set_time_scale(f32::NAN);
        assert_eq!(clock.time_scale(), 0.0);
    }

    #[test]
    fn test_fixed_delta() {
        let mut clock = FrameClock::new();
        clock.set_fixed_delta(Some(1.0 / 60.0));
        let dt = clock.advance_by(Duration::from_millis(100));
        assert!((dt - 1.0 / 60.0).abs() < 1e-6);

        clock.set_fixed_delta(Some(f32::NAN));
        let dt = clock.advance_by(Duration::from_millis(100));
        assert!((dt - 0.1).abs() < 1e-6);
    }
}
