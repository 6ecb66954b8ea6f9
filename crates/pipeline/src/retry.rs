//! Bounded retry with exponential backoff

use std::time::Duration;

/// Default maximum retry attempts
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default base backoff delay
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(500);

/// Retry policy for transient failures (sink commits, transport reads)
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Maximum retries after the first attempt
    pub max_retries: u32,

    /// Base delay, doubled each retry
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay: DEFAULT_BASE_DELAY,
        }
    }
}

impl RetryPolicy {
    /// Create a policy
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
        }
    }

    /// Delay before retry N (exponential, capped at 64x base)
    pub fn delay(&self, attempt: u32) -> Duration {
        self.base_delay * (1 << attempt.min(6))
    }

    /// Total attempts this policy allows (first try + retries)
    pub fn attempts(&self) -> u32 {
        self.max_retries + 1
    }
}
