//! Timeout, retry and circuit breaking for downstream quote calls.

use std::future::Future;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use payments_model::QuoteError;

/// Consecutive-failure circuit breaker.
///
/// Closed until `failure_threshold` calls fail in a row, then open for
/// `cool_down`. Once the cool-down elapses calls are let through again; the
/// next success closes the circuit, the next failure re-opens it.
pub struct CircuitBreaker {
    failure_threshold: u32,
    cool_down: Duration,
    state: Mutex<BreakerState>,
}

#[derive(Default)]
struct BreakerState {
    consecutive_failures: u32,
    opened_at: Option<Instant>,
}

impl CircuitBreaker {
    pub fn new(failure_threshold: u32, cool_down: Duration) -> Self {
        Self {
            failure_threshold: failure_threshold.max(1),
            cool_down,
            state: Mutex::new(BreakerState::default()),
        }
    }

    /// Returns true if a call may proceed.
    pub fn allow(&self) -> bool {
        let state = self.lock();
        match state.opened_at {
            None => true,
            Some(opened_at) => opened_at.elapsed() >= self.cool_down,
        }
    }

    pub fn is_open(&self) -> bool {
        !self.allow()
    }

    pub fn record_success(&self) {
        let mut state = self.lock();
        state.consecutive_failures = 0;
        state.opened_at = None;
    }

    pub fn record_failure(&self) {
        let mut state = self.lock();
        state.consecutive_failures = state.consecutive_failures.saturating_add(1);
        if state.consecutive_failures >= self.failure_threshold {
            state.opened_at = Some(Instant::now());
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BreakerState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for CircuitBreaker {
    fn default() -> Self {
        Self::new(5, Duration::from_secs(30))
    }
}

/// Policy wrapped around every downstream call.
pub struct ResiliencePolicy {
    timeout: Duration,
    max_retries: u32,
    base_backoff: Duration,
    breaker: CircuitBreaker,
}

impl ResiliencePolicy {
    /// Creates a policy with a 100ms base backoff and the default breaker.
    ///
    /// # Arguments
    /// * `timeout` - Limit for a single attempt
    /// * `max_retries` - Attempts allowed after the first one
    pub fn new(timeout: Duration, max_retries: u32) -> Self {
        Self {
            timeout,
            max_retries,
            base_backoff: Duration::from_millis(100),
            breaker: CircuitBreaker::default(),
        }
    }

    pub fn with_backoff(mut self, base_backoff: Duration) -> Self {
        self.base_backoff = base_backoff;
        self
    }

    pub fn with_breaker(mut self, breaker: CircuitBreaker) -> Self {
        self.breaker = breaker;
        self
    }

    pub fn breaker(&self) -> &CircuitBreaker {
        &self.breaker
    }

    /// Runs `call` under the policy.
    ///
    /// Retryable failures (timeouts, connection errors, 5xx) are retried with
    /// a doubling delay. The breaker counts one failure per exhausted call.
    pub async fn execute<T, F, Fut>(&self, mut call: F) -> Result<T, QuoteError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, QuoteError>>,
    {
        if !self.breaker.allow() {
            return Err(QuoteError::Unavailable("circuit open".into()));
        }

        let mut attempt: u32 = 0;
        loop {
            let outcome = match tokio::time::timeout(self.timeout, call()).await {
                Ok(result) => result,
                Err(_) => Err(QuoteError::Timeout),
            };

            match outcome {
                Ok(value) => {
                    self.breaker.record_success();
                    return Ok(value);
                }
                Err(err) if err.is_retryable() && attempt < self.max_retries => {
                    let delay = self.base_backoff.saturating_mul(1 << attempt.min(16));
                    attempt += 1;
                    tracing::warn!(
                        error = %err,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        "Quote call failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(err) => {
                    self.breaker.record_failure();
                    return Err(err);
                }
            }
        }
    }
}
