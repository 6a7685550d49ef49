//! Frame clock for modulation evaluation.
//!
//! Provides a single source of truth for the ambient time shared by all
//! modulation nodes evaluated within one session. The clock is advanced
//! explicitly by the animation loop, once per frame, before any node is
//! evaluated for that frame.
//!
//! # Example
//!
//! ```
//! use strange::time::Clock;
//!
//! let mut clock = Clock::new(0.0, 1.0 / 60.0);
//!
//! // In your animation loop:
//! clock.tick();
//!
//! println!("Time: {:.4}s", clock.time());
//! println!("Frame: {}", clock.frame());
//! ```

/// Ambient clock driven by the animation loop.
///
/// Unlike a wall clock, this advances only when [`Clock::tick`] is called,
/// so every modulation evaluated within one frame sees the same time.
#[derive(Debug, Clone, PartialEq)]
pub struct Clock {
    /// Current ambient time in seconds.
    time: f64,
    /// Amount added to `time` by each tick.
    step: f64,
    /// Total ticks since creation or reset.
    frame: u64,
}

impl Clock {
    /// Create a clock starting at `time` advancing by `step` per tick.
    pub fn new(time: f64, step: f64) -> Self {
        Self { time, step, frame: 0 }
    }

    /// Advance the clock by one step. Call once per frame.
    ///
    /// Returns the new time for convenience.
    pub fn tick(&mut self) -> f64 {
        self.time += self.step;
        self.frame += 1;
        self.time
    }

    /// Current ambient time in seconds.
    #[inline]
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Time added per tick.
    #[inline]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Total ticks since creation or reset.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Set the ambient time directly.
    pub fn set_time(&mut self, time: f64) {
        self.time = time;
    }

    /// Set the per-tick step.
    pub fn set_step(&mut self, step: f64) {
        self.step = step;
    }

    /// Reset the clock to time zero and frame zero, keeping the step.
    pub fn reset(&mut self) {
        self.time = 0.0;
        self.frame = 0;
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new(0.0, 1.0 / 60.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_new() {
        let clock = Clock::new(2.0, 0.5);
        assert_eq!(clock.time(), 2.0);
        assert_eq!(clock.step(), 0.5);
        assert_eq!(clock.frame(), 0);
    }

    #[test]
    fn test_tick_advances_by_step() {
        let mut clock = Clock::new(0.0, 0.25);
        assert_eq!(clock.tick(), 0.25);
        assert_eq!(clock.tick(), 0.5);
        assert_eq!(clock.frame(), 2);
    }

    #[test]
    fn test_set_time_and_step() {
        let mut clock = Clock::new(0.0, 1.0);
        clock.set_time(10.0);
        clock.set_step(0.1);
        clock.tick();
        assert!((clock.time() - 10.1).abs() < 1e-12);
    }

    #[test]
    fn test_reset() {
        let mut clock = Clock::new(0.0, 0.5);
        clock.tick();
        clock.tick();
        clock.reset();
        assert_eq!(clock.time(), 0.0);
        assert_eq!(clock.frame(), 0);
        // Step survives a reset
        assert_eq!(clock.step(), 0.5);
    }
}
