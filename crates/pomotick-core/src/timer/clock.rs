//! Per-session countdown bookkeeping.
//!
//! The clock owns no timer of its own. Whoever drives it calls `tick()` once
//! per elapsed second.

use serde::{Deserialize, Serialize};

/// Result of advancing the clock by one second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTick {
    pub remaining: u64,
    /// True only for the tick that reached zero.
    pub elapsed: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionClock {
    remaining: u64,
    running: bool,
}

impl SessionClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start(&mut self, duration_secs: u64) {
        self.remaining = duration_secs;
        self.running = true;
    }

    /// Advance by one second.
    ///
    /// A stopped clock reports `elapsed = false` and does not move. The clock
    /// stops itself on the tick that reaches zero, so a zero-crossing is
    /// reported exactly once.
    pub fn tick(&mut self) -> ClockTick {
        if !self.running {
            return ClockTick {
                remaining: self.remaining,
                elapsed: false,
            };
        }
        self.remaining = self.remaining.saturating_sub(1);
        let elapsed = self.remaining == 0;
        if elapsed {
            self.running = false;
        }
        ClockTick {
            remaining: self.remaining,
            elapsed,
        }
    }

    pub fn cancel(&mut self) {
        self.running = false;
        self.remaining = 0;
    }
}

/// Format seconds as `M:SS` (minutes unpadded).
pub fn format_clock(total_secs: u64) -> String {
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_counts_down_to_zero_once() {
        let mut clock = SessionClock::new();
        clock.start(3);
        assert_eq!(clock.tick(), ClockTick { remaining: 2, elapsed: false });
        assert_eq!(clock.tick(), ClockTick { remaining: 1, elapsed: false });
        assert_eq!(clock.tick(), ClockTick { remaining: 0, elapsed: true });
        // Already elapsed: no second zero-crossing.
        assert_eq!(clock.tick(), ClockTick { remaining: 0, elapsed: false });
        assert!(!clock.is_running());
    }

    #[test]
    fn tick_is_noop_before_start() {
        let mut clock = SessionClock::new();
        let t = clock.tick();
        assert!(!t.elapsed);
        assert_eq!(t.remaining, 0);
    }

    #[test]
    fn cancel_zeroes_and_stops() {
        let mut clock = SessionClock::new();
        clock.start(10);
        clock.tick();
        clock.cancel();
        assert_eq!(clock.remaining(), 0);
        assert!(!clock.is_running());
        assert!(!clock.tick().elapsed);
    }

    #[test]
    fn restart_replaces_remaining() {
        let mut clock = SessionClock::new();
        clock.start(10);
        clock.tick();
        clock.start(5);
        assert_eq!(clock.remaining(), 5);
        assert!(clock.is_running());
    }

    #[test]
    fn format_clock_pads_seconds_only() {
        assert_eq!(format_clock(1500), "25:00");
        assert_eq!(format_clock(65), "1:05");
        assert_eq!(format_clock(0), "0:00");
        assert_eq!(format_clock(3600), "60:00");
    }
}
