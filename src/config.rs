//! # Runtime configuration.
//!
//! Provides [`Config`], the explicitly constructed settings object passed to
//! monitors and to the showcase. There is no process-wide configuration: every
//! component receives the values it needs from the caller.
//!
//! ## Sentinel values
//! - `wait_timeout = 0s` → monitors never suspend (`next()` only pops what is queued)
//! - `emit_interval = 0s` → the showcase producer emits back-to-back
//! - `max_transaction_sum = 0` → sums span the whole non-negative `i32` range

use std::time::Duration;

/// Wait applied to a single `Monitor::next` pull when nothing is queued.
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(3);

/// Configuration for monitors and the observer showcase.
///
/// ## Field semantics
/// - `wait_timeout`: per-pull wait before a monitor reports "no more events"
/// - `rounds`: producer rounds in the showcase (one transaction + one customer each)
/// - `emit_interval`: pause before each emission in the showcase
/// - `max_transaction_sum`: exclusive upper bound for random transaction sums
///
/// ## Notes
/// All fields are public. Prefer the accessors below over sentinel checks.
#[derive(Clone, Debug)]
pub struct Config {
    /// Maximum time a consumer waits for the next event.
    ///
    /// When it elapses with an empty queue, the monitor yields `None` and the
    /// consumption loop ends. `Duration::ZERO` disables suspension.
    pub wait_timeout: Duration,

    /// Number of producer rounds in the showcase.
    pub rounds: usize,

    /// Delay before every emission in the showcase.
    pub emit_interval: Duration,

    /// Exclusive upper bound of generated transaction sums (`0` = `i32::MAX`).
    pub max_transaction_sum: u32,
}

impl Config {
    /// Returns the monitor wait as an `Option`.
    ///
    /// - `None` → do not suspend
    /// - `Some(d)` → suspend up to `d` per pull
    #[inline]
    pub fn wait(&self) -> Option<Duration> {
        if self.wait_timeout == Duration::ZERO {
            None
        } else {
            Some(self.wait_timeout)
        }
    }

    /// Returns the producer pause as an `Option` (`None` = no pause).
    #[inline]
    pub fn emit_pause(&self) -> Option<Duration> {
        if self.emit_interval == Duration::ZERO {
            None
        } else {
            Some(self.emit_interval)
        }
    }

    /// Returns the exclusive upper bound for transaction sums.
    #[inline]
    pub fn transaction_bound(&self) -> u32 {
        match self.max_transaction_sum {
            0 => i32::MAX as u32,
            n => n,
        }
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `wait_timeout = 3s`
    /// - `rounds = 5`
    /// - `emit_interval = 100ms`
    /// - `max_transaction_sum = 0` (full non-negative `i32` range)
    fn default() -> Self {
        Self {
            wait_timeout: DEFAULT_WAIT_TIMEOUT,
            rounds: 5,
            emit_interval: Duration::from_millis(100),
            max_transaction_sum: 0,
        }
    }
}
