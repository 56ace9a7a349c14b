//! Fixed-timestep scheduler
//!
//! Turns display-refresh timestamps into a whole number of simulation steps.
//! Leftover time carries over in the accumulator.

use crate::consts::{FRAME_INTERVAL_MS, MAX_FRAME_DELTA_MS};

#[derive(Debug, Clone)]
pub struct FixedStep {
    accumulator: f64,
    last_timestamp: Option<f64>,
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new()
    }
}

impl FixedStep {
    pub fn new() -> Self {
        Self {
            accumulator: 0.0,
            last_timestamp: None,
        }
    }

    /// Feed a display callback timestamp (ms); returns how many steps to run.
    ///
    /// The first timestamp only primes the clock. Deltas are capped at
    /// `MAX_FRAME_DELTA_MS` so a long stall does not replay every missed step.
    pub fn advance(&mut self, timestamp_ms: f64) -> u32 {
        let delta = match self.last_timestamp {
            Some(last) => (timestamp_ms - last).clamp(0.0, MAX_FRAME_DELTA_MS),
            None => 0.0,
        };
        self.last_timestamp = Some(timestamp_ms);
        self.accumulator += delta;

        let mut steps = 0;
        while self.accumulator >= FRAME_INTERVAL_MS {
            self.accumulator -= FRAME_INTERVAL_MS;
            steps += 1;
        }
        steps
    }

    /// Leftover time not yet simulated
    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    /// Drop any pending time, keeping the last timestamp
    pub fn clear(&mut self) {
        self.accumulator = 0.0;
    }
}
