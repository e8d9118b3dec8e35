//! Retry policy for optimistic updates
//!
//! `update` snapshots the prior value, runs the transform without holding
//! the store lock, then commits with a compare-and-swap. A lost race is
//! retried according to this policy.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for update retry behavior
///
/// # Example
/// ```ignore
/// let retry = RetryConfig::default()
///     .with_max_retries(200)
///     .with_base_delay_ms(1)
///     .with_max_delay_ms(50);
/// let store = PlainStore::with_retry(StoreIdentity::global("scores"), retry);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Maximum number of retry attempts (0 = no retries)
    pub max_retries: usize,
    /// Base delay between retries in milliseconds (exponential backoff, 0 = yield only)
    pub base_delay_ms: u64,
    /// Maximum delay between retries in milliseconds
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 1000,
            base_delay_ms: 0,
            max_delay_ms: 10,
        }
    }
}

impl RetryConfig {
    /// Create a new RetryConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a RetryConfig with no retries
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            ..Default::default()
        }
    }

    /// Set maximum number of retries
    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set base delay for exponential backoff
    pub fn with_base_delay_ms(mut self, base_delay_ms: u64) -> Self {
        self.base_delay_ms = base_delay_ms;
        self
    }

    /// Set maximum delay between retries
    pub fn with_max_delay_ms(mut self, max_delay_ms: u64) -> Self {
        self.max_delay_ms = max_delay_ms;
        self
    }

    /// Calculate delay for a given attempt (exponential backoff)
    pub fn calculate_delay(&self, attempt: usize) -> Duration {
        // Cap the shift to prevent overflow (1 << 63 is the max for u64)
        let shift = attempt.min(63);
        let multiplier = 1u64 << shift;
        let delay_ms = self.base_delay_ms.saturating_mul(multiplier);
        Duration::from_millis(delay_ms.min(self.max_delay_ms))
    }

    /// Wait before the next attempt
    pub(crate) fn backoff(&self, attempt: usize) {
        let delay = self.calculate_delay(attempt);
        if delay.is_zero() {
            std::thread::yield_now();
        } else {
            std::thread::sleep(delay);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_grows_exponentially_until_cap() {
        let config = RetryConfig::new()
            .with_base_delay_ms(2)
            .with_max_delay_ms(10);
        assert_eq!(config.calculate_delay(0), Duration::from_millis(2));
        assert_eq!(config.calculate_delay(1), Duration::from_millis(4));
        assert_eq!(config.calculate_delay(2), Duration::from_millis(8));
        assert_eq!(config.calculate_delay(3), Duration::from_millis(10));
        assert_eq!(config.calculate_delay(200), Duration::from_millis(10));
    }

    #[test]
    fn test_zero_base_delay_never_sleeps() {
        let config = RetryConfig::default();
        assert!(config.calculate_delay(0).is_zero());
        assert!(config.calculate_delay(50).is_zero());
    }

    #[test]
    fn test_no_retry() {
        assert_eq!(RetryConfig::no_retry().max_retries, 0);
    }
}
