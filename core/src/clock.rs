//! Simulation clock: owns tick state, cadence and pause.
//!
//! The core holds no timer. The front end reads `tick_interval()` and calls
//! the engine at that cadence.

use crate::types::Tick;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimClock {
    pub current_tick:     Tick,
    pub ticks_per_second: u32,
    pub paused:           bool,
}

impl SimClock {
    pub fn new(ticks_per_second: u32) -> Self {
        Self {
            current_tick: 0,
            ticks_per_second: ticks_per_second.max(1),
            paused: false,
        }
    }

    /// Advance one tick. Returns the new tick number.
    /// Panics if called while paused; callers must check.
    pub fn advance(&mut self) -> Tick {
        assert!(!self.paused, "advance() called on paused clock");
        self.current_tick += 1;
        self.current_tick
    }

    pub fn pause(&mut self)  { self.paused = true;  }
    pub fn resume(&mut self) { self.paused = false; }

    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    pub fn set_speed(&mut self, ticks_per_second: u32) {
        self.ticks_per_second = ticks_per_second.max(1);
    }

    /// Wall-clock time between ticks.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.ticks_per_second
    }
}
