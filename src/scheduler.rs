//! Tick pacing for the animation and glitch timers
//!
//! Portable replacement for a periodic hardware timer: the caller polls
//! with the current time and sleeps for the returned duration.

use embassy_time::{Duration, Instant};

/// Periodic deadline tracker
///
/// When polling falls more than two periods behind, the missed ticks are
/// dropped and the schedule restarts from `now`; there is no catch-up burst.
#[derive(Debug, Clone, Copy)]
pub struct TickScheduler {
    period: Duration,
    next_tick: Instant,
}

impl TickScheduler {
    /// First tick is due one period after `start`
    pub fn new(start: Instant, period: Duration) -> Self {
        Self {
            period,
            next_tick: start + period,
        }
    }

    /// Returns `true` if a tick is due and schedules the next one
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next_tick {
            return false;
        }

        let max_drift = self.period + self.period;
        if now.duration_since(self.next_tick) > max_drift {
            self.next_tick = now;
        }
        self.next_tick += self.period;
        true
    }

    /// Time left until the next tick (zero if already due)
    pub fn sleep_duration(&self, now: Instant) -> Duration {
        self.next_tick
            .checked_duration_since(now)
            .unwrap_or(Duration::from_millis(0))
    }

    pub const fn period(&self) -> Duration {
        self.period
    }

    pub const fn next_tick(&self) -> Instant {
        self.next_tick
    }
}
