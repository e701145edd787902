//! Retry scheduling through per-region admission control.
//!
//! Every outer call moves through `PENDING -> IN_FLIGHT -> { SUCCESS |
//! RETRYABLE_FAILURE -> BACKOFF_WAIT -> PENDING | FATAL_FAILURE }`. Each
//! pass through PENDING re-enters the region's limiter; retries are never
//! exempt from rate limiting.

use crate::{RegionLimiters, RetryPolicy};
use riftgate_core::Region;
use riftgate_error::{ApiError, ApiErrorKind, RetryableError};
use std::future::Future;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, instrument, warn};

/// Bookkeeping for one outer call.
///
/// Owned by the call that created it and never shared across calls.
pub struct CallContext {
    region: Region,
    deadline: Option<Instant>,
    started_at: Instant,
    attempts: AtomicU32,
}

impl CallContext {
    fn new(region: Region, deadline: Option<Instant>) -> Self {
        Self {
            region,
            deadline,
            started_at: Instant::now(),
            attempts: AtomicU32::new(0),
        }
    }

    /// The region this call is admitted under.
    pub fn region(&self) -> Region {
        self.region
    }

    /// Attempts executed so far.
    pub fn attempts(&self) -> u32 {
        self.attempts.load(Ordering::Relaxed)
    }

    /// Record one executed attempt, returning the new total.
    fn record_attempt(&self) -> u32 {
        self.attempts.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// The caller's overall admission budget in milliseconds, if bounded.
    fn queue_budget_ms(&self) -> u64 {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(self.started_at))
            .unwrap_or(Duration::ZERO)
            .as_millis() as u64
    }
}

/// Runs units of work through a region's limiter with bounded retries.
///
/// The scheduler owns no limiter state itself; it only sequences
/// acquire -> attempt -> classify -> backoff against [`RegionLimiters`].
#[derive(Clone)]
pub struct RequestScheduler {
    limiters: RegionLimiters,
    policy: RetryPolicy,
}

impl RequestScheduler {
    /// Create a scheduler over a per-region limiter set.
    pub fn new(limiters: RegionLimiters, policy: RetryPolicy) -> Self {
        Self { limiters, policy }
    }

    /// The retry policy in force.
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Run one unit of work under `region`'s admission control.
    ///
    /// `attempt` is invoked once per admission; a retryable failure (429 or
    /// 5xx) waits out the computed backoff and re-enters the limiter, up to
    /// the policy's retry bound. The final rejection is the most recent
    /// classified error.
    pub async fn schedule<T, F, Fut>(&self, region: Region, attempt: F) -> Result<T, ApiError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        self.schedule_with_deadline(region, None, attempt).await
    }

    /// [`schedule`](Self::schedule) with an overall caller deadline.
    ///
    /// The deadline bounds time spent queued for admission: a submission
    /// still waiting when it fires is dequeued without consuming tokens and
    /// the call rejects with a timeout classification. It does not revoke
    /// an admission that has already been granted.
    #[instrument(skip(self, attempt), fields(region = %region))]
    pub async fn schedule_with_deadline<T, F, Fut>(
        &self,
        region: Region,
        deadline: Option<Instant>,
        attempt: F,
    ) -> Result<T, ApiError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let limiter = self.limiters.get(region);
        let context = CallContext::new(region, deadline);

        loop {
            // The admission guard is held for the attempt only; it drops
            // before any backoff sleep so the concurrency slot frees while
            // this call waits.
            let outcome = {
                let _guard = match context.deadline {
                    Some(deadline) => {
                        match tokio::time::timeout_at(deadline, limiter.acquire()).await {
                            Ok(guard) => guard,
                            Err(_) => {
                                warn!(
                                    region = %context.region(),
                                    "caller deadline expired while queued for admission"
                                );
                                return Err(ApiError::new(ApiErrorKind::Timeout {
                                    limit_ms: context.queue_budget_ms(),
                                }));
                            }
                        }
                    }
                    None => limiter.acquire().await,
                };
                context.record_attempt();
                attempt().await
            };

            let executed = context.attempts();
            match outcome {
                Ok(value) => {
                    debug!(attempts = executed, "call resolved");
                    return Ok(value);
                }
                Err(err)
                    if err.is_retryable() && (executed as usize) <= self.policy.max_retries() =>
                {
                    let delay = self
                        .policy
                        .backoff_delay(err.retry_after_hint(), executed - 1);
                    warn!(
                        attempt = executed,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "transient failure, will re-enter admission after backoff"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(err) if err.is_retryable() => {
                    warn!(attempt = executed, error = %err, "retries exhausted, rejecting");
                    return Err(err);
                }
                Err(err) => {
                    warn!(attempt = executed, error = %err, "fatal failure, rejecting");
                    return Err(err);
                }
            }
        }
    }
}
