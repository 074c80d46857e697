//! Retry policy with configurable backoff
//!
//! A [`RetryPolicy`] runs any async operation up to `max_attempts` times,
//! sleeping between attempts (never after the last one). Errors for which the
//! retry predicate returns `false` are returned immediately.

use std::fmt;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Delay schedule between attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backoff {
    /// Retry immediately
    None,
    /// Same delay before every retry
    Fixed(Duration),
    /// `base * attempt` (1s, 2s, 3s, ... for a 1s base)
    Linear(Duration),
    /// `base * factor^(attempt - 1)`
    Exponential { base: Duration, factor: u32 },
}

impl Backoff {
    /// Delay to wait after the given failed attempt (1-based)
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let attempt = attempt.max(1);
        match *self {
            Backoff::None => Duration::ZERO,
            Backoff::Fixed(delay) => delay,
            Backoff::Linear(base) => base.saturating_mul(attempt),
            Backoff::Exponential { base, factor } => {
                base.saturating_mul(factor.saturating_pow(attempt - 1))
            }
        }
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Backoff::Linear(Duration::from_millis(1000))
    }
}

/// Bounded retry with backoff and a retry predicate
pub struct RetryPolicy<E> {
    max_attempts: u32,
    backoff: Backoff,
    retry_on: fn(&E) -> bool,
}

impl<E> RetryPolicy<E> {
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

    /// Policy retrying every error. `max_attempts` is clamped to at least one.
    pub fn new(max_attempts: u32, backoff: Backoff) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff,
            retry_on: |_| true,
        }
    }

    /// Only retry errors accepted by `predicate`
    pub fn retry_if(mut self, predicate: fn(&E) -> bool) -> Self {
        self.retry_on = predicate;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn backoff(&self) -> Backoff {
        self.backoff
    }

    pub fn should_retry(&self, error: &E) -> bool {
        (self.retry_on)(error)
    }

    /// Run `op` under this policy. `op` receives the 1-based attempt number.
    pub async fn run<T, F, Fut>(&self, mut op: F) -> Result<T, E>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: fmt::Display,
    {
        let mut attempt = 1;
        loop {
            match op(attempt).await {
                Ok(value) => {
                    if attempt > 1 {
                        debug!(attempt, "Succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(e) => {
                    warn!(
                        attempt,
                        max_attempts = self.max_attempts,
                        error = %e,
                        "Attempt failed"
                    );

                    if attempt >= self.max_attempts || !self.should_retry(&e) {
                        return Err(e);
                    }

                    let delay = self.backoff.delay_for(attempt);
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                    attempt += 1;
                }
            }
        }
    }
}

impl<E> Default for RetryPolicy<E> {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_ATTEMPTS, Backoff::default())
    }
}

impl<E> Clone for RetryPolicy<E> {
    fn clone(&self) -> Self {
        Self {
            max_attempts: self.max_attempts,
            backoff: self.backoff,
            retry_on: self.retry_on,
        }
    }
}

impl<E> fmt::Debug for RetryPolicy<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryPolicy")
            .field("max_attempts", &self.max_attempts)
            .field("backoff", &self.backoff)
            .finish_non_exhaustive()
    }
}
