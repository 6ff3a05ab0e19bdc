//! Fixed-timestep accumulator.

use sim_core::{TICK_DELTA, TICKS_PER_SECOND};

/// Longest backlog of unsimulated time, in seconds. Anything beyond it is
/// dropped so a long stall (breakpoint, suspended laptop) resumes at most
/// one second behind instead of spiraling into catch-up.
const MAX_BACKLOG_SECONDS: f32 = 1.0;

/// Accumulates elapsed wall time and pays it out in whole 60 Hz ticks.
///
/// The leftover fraction of a tick stays in the accumulator, so feeding the
/// clock frame times of any cadence still averages out to the fixed rate.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameClock {
    accumulator: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `elapsed` seconds and returns how many whole ticks are now due.
    pub fn accumulate(&mut self, elapsed: f32) -> u32 {
        if elapsed > 0.0 {
            self.accumulator = (self.accumulator + elapsed).min(MAX_BACKLOG_SECONDS);
        }
        let due = (self.accumulator * TICKS_PER_SECOND as f32) as u32;
        self.accumulator = (self.accumulator - due as f32 * TICK_DELTA).max(0.0);
        due
    }

    /// Unsimulated remainder, in seconds. Hosts use it to interpolate
    /// rendering between ticks.
    pub fn backlog(&self) -> f32 {
        self.accumulator
    }
}
