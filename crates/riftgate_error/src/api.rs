//! Classified errors for outbound API attempts and retry logic.

use std::fmt;

/// Trimmed snapshot of a non-success upstream response.
///
/// Carries everything the retry policy and the caller need to act on a
/// failure: the status code, the rate-limit-relevant response headers, a
/// bounded prefix of the body for diagnostics, and the parsed `Retry-After`
/// hint in milliseconds when the upstream supplied one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResponseSnapshot {
    /// HTTP status code of the response.
    pub status: u16,
    /// Trimmed header snapshot (rate-limit and content headers only).
    pub headers: Vec<(String, String)>,
    /// Bounded prefix of the response body.
    pub body: String,
    /// Parsed upstream delay hint in milliseconds, if present and numeric.
    pub retry_after_ms: Option<u64>,
}

impl ResponseSnapshot {
    /// Create a snapshot from its parts.
    pub fn new(
        status: u16,
        headers: Vec<(String, String)>,
        body: String,
        retry_after_ms: Option<u64>,
    ) -> Self {
        Self {
            status,
            headers,
            body,
            retry_after_ms,
        }
    }
}

impl fmt::Display for ResponseSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "status {}", self.status)?;
        if let Some(hint) = self.retry_after_ms {
            write!(f, " (retry after {}ms)", hint)?;
        }
        Ok(())
    }
}

/// Classified failure conditions for one API attempt.
#[derive(Debug, Clone, PartialEq, derive_more::Display)]
pub enum ApiErrorKind {
    /// Malformed input rejected before any network call.
    #[display("invalid request: {_0}")]
    Validation(String),
    /// Per-attempt deadline exceeded.
    #[display("attempt deadline of {limit_ms}ms exceeded")]
    Timeout {
        /// The deadline that was exceeded, in milliseconds.
        limit_ms: u64,
    },
    /// Upstream throttled the request (status 429).
    #[display("rate limited by upstream: {_0}")]
    RateLimited(ResponseSnapshot),
    /// Upstream server failure (status 5xx).
    #[display("upstream server error: {_0}")]
    Server(ResponseSnapshot),
    /// Upstream rejected the request (any other non-2xx status).
    #[display("upstream rejected request: {_0}")]
    Client(ResponseSnapshot),
    /// The request could not be sent at all.
    #[display("transport failure: {_0}")]
    Transport(String),
    /// A success response carried an undecodable body.
    #[display("failed to decode response body: {_0}")]
    Decode(String),
}

impl ApiErrorKind {
    /// Check if this failure should be retried.
    ///
    /// Only upstream throttling and server-side failures are transient.
    /// Timeouts are deliberately fatal (see the crate-level taxonomy notes).
    pub fn is_retryable(&self) -> bool {
        matches!(self, ApiErrorKind::RateLimited(_) | ApiErrorKind::Server(_))
    }

    /// The upstream delay hint in milliseconds, when one was supplied.
    pub fn retry_after_hint(&self) -> Option<u64> {
        self.snapshot().and_then(|s| s.retry_after_ms)
    }

    /// The HTTP status of the failed response, when one was received.
    pub fn status(&self) -> Option<u16> {
        self.snapshot().map(|s| s.status)
    }

    /// The trimmed response snapshot, when one was captured.
    pub fn snapshot(&self) -> Option<&ResponseSnapshot> {
        match self {
            ApiErrorKind::RateLimited(s) | ApiErrorKind::Server(s) | ApiErrorKind::Client(s) => {
                Some(s)
            }
            _ => None,
        }
    }
}

/// Classified API error with source location tracking.
///
/// # Examples
///
/// ```
/// use riftgate_error::{ApiError, ApiErrorKind, RetryableError};
///
/// let err = ApiError::new(ApiErrorKind::Validation("empty match id".into()));
/// assert!(format!("{}", err).contains("empty match id"));
/// assert!(!err.is_retryable());
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("API Error: {} at line {} in {}", kind, line, file)]
pub struct ApiError {
    /// The kind of error that occurred
    pub kind: ApiErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ApiError {
    /// Create a new ApiError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ApiErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ApiErrorKind {
        &self.kind
    }
}

/// Trait for errors that support retry logic.
///
/// Transient errors like 503 (service unavailable) or 429 (rate limit)
/// return true from [`RetryableError::is_retryable`]. Permanent errors like
/// 401 (unauthorized) or 400 (bad request) return false and must be
/// propagated immediately.
///
/// # Examples
///
/// ```
/// use riftgate_error::{ApiError, ApiErrorKind, ResponseSnapshot, RetryableError};
///
/// let err = ApiError::new(ApiErrorKind::Server(ResponseSnapshot::new(
///     503,
///     vec![],
///     "overloaded".to_string(),
///     None,
/// )));
/// assert!(err.is_retryable());
/// ```
pub trait RetryableError {
    /// Returns true if this error should trigger a retry.
    fn is_retryable(&self) -> bool;

    /// Upstream-supplied delay hint in milliseconds, if any.
    ///
    /// The retry policy uses this as the backoff base instead of its
    /// default when present.
    fn retry_after_hint(&self) -> Option<u64> {
        None
    }
}

impl RetryableError for ApiError {
    fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }

    fn retry_after_hint(&self) -> Option<u64> {
        self.kind.retry_after_hint()
    }
}
