//! Backoff computation and upstream delay-hint handling.

use rand::Rng;
use std::time::Duration;

/// Fallback backoff base when the upstream supplies no delay hint.
pub const DEFAULT_DELAY_HINT_MS: u64 = 3_000;

/// Lower clamp for upstream delay hints.
pub const MIN_DELAY_HINT_MS: u64 = 1_000;

/// Upper clamp for upstream delay hints.
pub const MAX_DELAY_HINT_MS: u64 = 60_000;

/// Parse a `Retry-After` header value into milliseconds.
///
/// The upstream sends seconds, occasionally fractional. Non-numeric values
/// (including HTTP-date forms) are ignored and fall back to the default
/// hint downstream.
///
/// # Examples
///
/// ```
/// use riftgate_rate_limit::parse_retry_after;
///
/// assert_eq!(parse_retry_after("2"), Some(2_000));
/// assert_eq!(parse_retry_after("0.2"), Some(200));
/// assert_eq!(parse_retry_after("soon"), None);
/// ```
pub fn parse_retry_after(value: &str) -> Option<u64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|secs| secs.is_finite() && *secs >= 0.0)
        .map(|secs| (secs * 1_000.0) as u64)
}

/// Retry bounds and backoff computation for one scheduler.
///
/// Backoff for retry `n` (0-based) is `jitter(base * 2^n)`, where `base` is
/// the clamped upstream hint (or [`DEFAULT_DELAY_HINT_MS`] without one) and
/// `jitter` multiplies by a uniform factor in `[0.9, 1.1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retries: usize,
}

impl RetryPolicy {
    /// Create a policy with an explicit retry bound.
    pub fn new(max_retries: usize) -> Self {
        Self { max_retries }
    }

    /// Retries allowed after the initial attempt.
    pub fn max_retries(&self) -> usize {
        self.max_retries
    }

    /// Clamp an optional upstream hint into the accepted band.
    ///
    /// Present hints clamp to `[MIN_DELAY_HINT_MS, MAX_DELAY_HINT_MS]`;
    /// absent hints fall back to [`DEFAULT_DELAY_HINT_MS`].
    pub fn clamp_hint(hint_ms: Option<u64>) -> u64 {
        hint_ms
            .map(|hint| hint.clamp(MIN_DELAY_HINT_MS, MAX_DELAY_HINT_MS))
            .unwrap_or(DEFAULT_DELAY_HINT_MS)
    }

    /// Pre-jitter backoff for the given 0-based retry index.
    pub fn backoff_base_ms(hint_ms: Option<u64>, retry_index: u32) -> u64 {
        let base = Self::clamp_hint(hint_ms);
        base.saturating_mul(1u64 << retry_index.min(20))
    }

    /// Realized backoff delay: the pre-jitter value scaled by a uniform
    /// random factor in `[0.9, 1.1]`.
    pub fn backoff_delay(&self, hint_ms: Option<u64>, retry_index: u32) -> Duration {
        let pre_jitter = Self::backoff_base_ms(hint_ms, retry_index);
        let factor = rand::thread_rng().gen_range(0.9..=1.1);
        Duration::from_millis((pre_jitter as f64 * factor).round() as u64)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_retries: 6 }
    }
}
