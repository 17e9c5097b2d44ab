//! Fixed-timestep tick accumulator.
//!
//! Decouples the simulation rate from whatever cadence the caller polls at:
//! elapsed wall time is banked and paid out in whole ticks of a fixed
//! duration. Each agent owns its own accumulator, advanced by an externally
//! supplied delta, so the core never reads a process-wide clock.

use serde::{Deserialize, Serialize};

/// Banks elapsed time and converts it into whole simulation ticks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickAccumulator {
    tick_seconds: f32,
    accumulated: f32,
}

impl TickAccumulator {
    /// Creates an accumulator with the given tick duration in seconds.
    pub fn new(tick_seconds: f32) -> Self {
        Self {
            tick_seconds,
            accumulated: 0.0,
        }
    }

    /// The fixed tick duration in seconds.
    pub fn tick_seconds(&self) -> f32 {
        self.tick_seconds
    }

    /// Banks `dt` seconds and returns how many whole ticks to run now.
    ///
    /// Returns zero when not enough time has accumulated; the remainder is
    /// carried over to the next call.
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulated += dt;
        let mut ticks = 0;
        while self.accumulated > self.tick_seconds {
            self.accumulated -= self.tick_seconds;
            ticks += 1;
        }
        ticks
    }

    /// Drops any banked time, e.g. on reset.
    pub fn clear(&mut self) {
        self.accumulated = 0.0;
    }
}
