//! Clock and timing utilities.
//!
//! Every timestamp in Handsign is fractional seconds relative to a clock
//! epoch. Components that care about elapsed time (the debouncer, the
//! fingertip report) take a [`Clock`] so tests and replays can drive time
//! explicitly instead of sleeping.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Seconds since a clock epoch.
pub type TimestampSecs = f64;

/// A source of timestamps.
pub trait Clock: Send + Sync {
    /// Seconds elapsed since this clock's epoch.
    fn now_secs(&self) -> TimestampSecs;
}

/// Monotonic clock anchored at construction time.
#[derive(Debug, Clone)]
pub struct SystemClock {
    /// The instant the clock started.
    epoch: Instant,

    /// Wall-clock time at epoch (ISO 8601 string).
    epoch_wall: String,
}

impl SystemClock {
    /// Create a new clock anchored to now.
    pub fn start() -> Self {
        Self {
            epoch: Instant::now(),
            epoch_wall: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Wall-clock time at clock start.
    pub fn epoch_wall(&self) -> &str {
        &self.epoch_wall
    }

    /// The underlying epoch instant.
    pub fn epoch(&self) -> Instant {
        self.epoch
    }
}

impl Clock for SystemClock {
    fn now_secs(&self) -> TimestampSecs {
        self.epoch.elapsed().as_secs_f64()
    }
}

/// Clock whose time only moves when told to.
///
/// Used by tests and by replay, where recorded timestamps drive time.
#[derive(Debug, Default)]
pub struct ManualClock {
    bits: AtomicU64,
}

impl ManualClock {
    pub fn new(start_secs: TimestampSecs) -> Self {
        Self {
            bits: AtomicU64::new(start_secs.to_bits()),
        }
    }

    /// Jump to an absolute time.
    pub fn set(&self, secs: TimestampSecs) {
        self.bits.store(secs.to_bits(), Ordering::SeqCst);
    }

    /// Move time forward by `delta_secs`.
    pub fn advance(&self, delta_secs: f64) {
        let mut current = self.bits.load(Ordering::SeqCst);
        loop {
            let next = (f64::from_bits(current) + delta_secs).to_bits();
            match self
                .bits
                .compare_exchange(current, next, Ordering::SeqCst, Ordering::SeqCst)
            {
                Ok(_) => return,
                Err(actual) => current = actual,
            }
        }
    }
}

impl Clock for ManualClock {
    fn now_secs(&self) -> TimestampSecs {
        f64::from_bits(self.bits.load(Ordering::SeqCst))
    }
}

/// Fires at most once per interval, counting from a start time.
#[derive(Debug)]
pub struct ReportThrottle {
    interval_secs: f64,
    last_fired: TimestampSecs,
}

impl ReportThrottle {
    /// The first report becomes due one interval after `start`.
    pub fn new(interval_secs: f64, start: TimestampSecs) -> Self {
        Self {
            interval_secs,
            last_fired: start,
        }
    }

    /// Check if enough time has passed for the next report.
    /// Returns true and updates internal state if ready.
    pub fn should_fire(&mut self, now: TimestampSecs) -> bool {
        if now - self.last_fired >= self.interval_secs {
            self.last_fired = now;
            true
        } else {
            false
        }
    }

    pub fn interval_secs(&self) -> f64 {
        self.interval_secs
    }
}
