//! Retry policy for failed classifier calls.
//!
//! Implements exponential backoff with configurable parameters.

use super::ClassifierError;
use std::time::Duration;

/// Retry policy implementing exponential backoff.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of attempts per call before degrading to unavailable.
    pub max_attempts: u32,
    /// Initial backoff duration in milliseconds.
    pub initial_backoff_ms: u64,
    /// Maximum backoff duration in milliseconds (cap for exponential growth).
    pub max_backoff_ms: u64,
    /// Multiplier applied to backoff after each failed attempt.
    pub backoff_multiplier: f64,
}

impl RetryPolicy {
    /// Backoff to sleep after the given number of failed attempts.
    ///
    /// Uses exponential backoff: `initial_backoff * multiplier^failures`,
    /// capped at `max_backoff_ms`.
    pub fn backoff(&self, failures: u32) -> Duration {
        let backoff = self.initial_backoff_ms as f64 * self.backoff_multiplier.powi(failures as i32);
        Duration::from_millis(backoff.min(self.max_backoff_ms as f64) as u64)
    }

    /// Whether a failed call should be attempted again.
    ///
    /// Returns true if the error kind is retryable and the attempt budget is
    /// not exhausted. `attempts` counts calls already made.
    pub fn should_retry(&self, error: &ClassifierError, attempts: u32) -> bool {
        error.is_retryable() && attempts < self.max_attempts
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff_ms: 500,
            max_backoff_ms: 8_000,
            backoff_multiplier: 2.0,
        }
    }
}
