//! Fixed-tick time base.
//!
//! Every gameplay duration in the simulation is stored and compared as an
//! integer number of ticks. Seconds only appear at the boundaries: config
//! files author durations in seconds, and the host converts wall time into
//! ticks before stepping the simulation.

/// Simulation rate. One tick is 1/60 of a second.
pub const TICKS_PER_SECOND: u32 = 60;

/// Duration of a single tick in seconds.
pub const TICK_DELTA: f32 = 1.0 / TICKS_PER_SECOND as f32;

/// Converts a duration in seconds to whole ticks, rounding down.
#[inline]
pub fn ticks(seconds: f32) -> u32 {
    (seconds * TICKS_PER_SECOND as f32).floor() as u32
}

/// Converts a tick count back to seconds.
#[inline]
pub fn seconds(ticks: u32) -> f32 {
    ticks as f32 / TICKS_PER_SECOND as f32
}

/// Monotonic tick counter for a running level.
///
/// The `start_timestamp` is a host-provided epoch (seconds); `timestamp()`
/// advances it by whole elapsed simulation seconds so that save files can
/// record an absolute time without consulting a wall clock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Clock {
    tick: u64,
    start_timestamp: u64,
}

impl Clock {
    pub fn new(start_timestamp: u64) -> Self {
        Self {
            tick: 0,
            start_timestamp,
        }
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn timestamp(&self) -> u64 {
        self.start_timestamp + self.tick / TICKS_PER_SECOND as u64
    }

    pub fn advance(&mut self) {
        self.tick += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seconds_to_ticks_rounds_down() {
        assert_eq!(ticks(1.0), 60);
        assert_eq!(ticks(0.75), 45);
        assert_eq!(ticks(1.5), 90);
        assert_eq!(ticks(0.016), 0);
    }

    #[test]
    fn tick_conversion_round_trips() {
        for n in [0u32, 1, 59, 60, 61, 4500, 123_456] {
            assert_eq!(ticks(seconds(n)), n);
        }
    }

    #[test]
    fn clock_timestamp_advances_by_whole_seconds() {
        let mut clock = Clock::new(1_000);
        for _ in 0..119 {
            clock.advance();
        }
        assert_eq!(clock.tick(), 119);
        assert_eq!(clock.timestamp(), 1_001);
        clock.advance();
        assert_eq!(clock.timestamp(), 1_002);
    }
}
