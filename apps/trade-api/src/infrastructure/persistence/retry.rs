//! Retry policy with exponential backoff for repository writes.
//!
//! Transient database failures (connection loss, lock contention,
//! pool exhaustion) are retried here inside the adapter, so that the
//! service layer only ever sees a write that either committed or
//! exhausted its retries.

use std::time::Duration;

use rand::Rng;

/// Retry policy configuration for repository writes.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of retry attempts (default: 5).
    pub max_attempts: u32,
    /// Initial backoff duration (default: 100ms).
    pub initial_backoff: Duration,
    /// Maximum backoff duration (default: 5s).
    pub max_backoff: Duration,
    /// Backoff multiplier for exponential growth (default: 2.0).
    pub backoff_multiplier: f64,
    /// Jitter factor for randomization (default: 0.2 = ±20%).
    pub jitter_factor: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(5),
            backoff_multiplier: 2.0,
            jitter_factor: 0.2,
        }
    }
}

/// Per-write backoff state. One calculator lives for the duration of a
/// single insert's retry loop and is discarded afterwards.
#[derive(Debug)]
pub struct BackoffCalculator {
    attempt: u32,
    policy: RetryPolicy,
}

impl BackoffCalculator {
    /// Start a fresh retry sequence under the given policy.
    #[must_use]
    pub fn new(policy: &RetryPolicy) -> Self {
        Self {
            attempt: 0,
            policy: policy.clone(),
        }
    }

    /// Delay before the next attempt, or `None` once the attempt budget
    /// is spent.
    ///
    /// Each delay doubles (per the multiplier) from the initial backoff,
    /// is randomized by the jitter factor, and never exceeds the
    /// configured maximum.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn next_backoff(&mut self) -> Option<Duration> {
        if self.attempt >= self.policy.max_attempts {
            return None;
        }

        let cap_ms = self.policy.max_backoff.as_millis() as u64 as f64;
        let base_ms = (self.policy.initial_backoff.as_millis() as u64 as f64
            * self.policy.backoff_multiplier.powi(self.attempt as i32))
        .min(cap_ms);

        // Spread concurrent retries apart so lock contention does not
        // resynchronize on every attempt.
        let spread = base_ms * self.policy.jitter_factor;
        let low = (base_ms - spread).max(0.0);
        let high = base_ms + spread;
        let delay_ms = rand::rng().random_range(low..=high).min(cap_ms) as u64;

        self.attempt += 1;
        Some(Duration::from_millis(delay_ms))
    }

    /// How many attempts have been consumed so far.
    #[must_use]
    pub const fn current_attempt(&self) -> u32 {
        self.attempt
    }
}
