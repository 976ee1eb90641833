//! Pacing between platform calls.
//!
//! The pipeline calls [`RateLimiter::wait_before_next_call`] after every
//! request. [`FixedDelay`] sleeps for a constant interval; other strategies
//! (token bucket, adaptive) can be dropped in without touching the pipeline.

use std::time::Duration;

#[allow(async_fn_in_trait)]
pub trait RateLimiter {
    async fn wait_before_next_call(&self);
}

/// Sleeps for the same interval before every call. A zero interval never
/// yields to the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    #[must_use]
    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    #[must_use]
    pub fn none() -> Self {
        Self::new(Duration::ZERO)
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl RateLimiter for FixedDelay {
    async fn wait_before_next_call(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}
