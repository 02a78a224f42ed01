//! Simulation clock
//!
//! The encounter counts frames, not seconds. The clock turns wall-clock
//! deltas into whole ticks for hosts that pace the simulation in real time,
//! and converts tick counts back to seconds for reports.

use std::time::Duration;

/// Ticks per simulated second
pub const TICK_RATE: u32 = 60;

/// Fixed-step tick accumulator
#[derive(Debug, Clone)]
pub struct TickClock {
    /// Seconds per tick
    step: f32,
    /// Time carried over that has not yet made a whole tick
    accumulator: f32,
    /// Ticks handed out so far
    ticks: u64,
}

impl TickClock {
    pub fn new(tick_rate: u32) -> Self {
        Self {
            step: 1.0 / tick_rate.max(1) as f32,
            accumulator: 0.0,
            ticks: 0,
        }
    }

    /// Feed elapsed wall-clock time; returns how many ticks are now due
    pub fn update(&mut self, delta: Duration) -> u32 {
        self.accumulator += delta.as_secs_f32();
        let mut due = 0;
        while self.accumulator >= self.step {
            self.accumulator -= self.step;
            due += 1;
        }
        self.ticks += due as u64;
        due
    }

    /// Count one tick directly, for headless runs
    pub fn advance(&mut self) {
        self.ticks += 1;
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Simulated time elapsed
    pub fn elapsed(&self) -> f32 {
        self.ticks as f32 * self.step
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.ticks = 0;
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new(TICK_RATE)
    }
}
