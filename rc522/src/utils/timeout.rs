//! Bounded-wait helpers used across the crate.
//!
//! Every asynchronous chip operation is awaited by sleeping a fixed interval
//! and then sampling an IRQ register, for at most `attempts` rounds. These
//! helpers centralize the defaults so tests and code agree on the bound.

use std::time::Duration;

/// Interval between two IRQ register samples.
pub const DEFAULT_POLL_INTERVAL_MS: u32 = 100;

/// Number of samples before an operation is declared timed out.
pub const DEFAULT_POLL_ATTEMPTS: u32 = 50;

/// Convert milliseconds to Duration.
pub fn ms(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

/// Sleep-then-sample retry bound for chip IRQ flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval_ms: u32,
    pub attempts: u32,
}

impl PollPolicy {
    pub const fn new(interval_ms: u32, attempts: u32) -> Self {
        Self {
            interval_ms,
            attempts,
        }
    }

    /// Upper bound on the time spent waiting for one operation.
    pub fn max_wait(&self) -> Duration {
        ms(self.interval_ms as u64 * self.attempts as u64)
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL_MS, DEFAULT_POLL_ATTEMPTS)
    }
}
