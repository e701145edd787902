//! Admission control and retry scheduling for the Riftgate gateway client.
//!
//! The upstream enforces a compound quota per routing region: a short burst
//! window and a long sustained window at the same time. This crate owns the
//! in-process state that keeps every region inside both windows under
//! arbitrary concurrent load:
//!
//! - [`DualWindowLimiter`] — two chained sliding-window token buckets plus a
//!   concurrency gate, one instance per region.
//! - [`RegionLimiters`] — the per-region limiter set; regions never share
//!   state or block one another.
//! - [`RetryPolicy`] — delay-hint parsing, clamping, and jittered
//!   exponential backoff.
//! - [`RequestScheduler`] — runs attempts through admission control and
//!   re-submits retryable failures through the same limiter.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod limiter;
mod regions;
mod retry;
mod scheduler;

pub use limiter::{AdmissionGuard, DualWindowLimiter};
pub use regions::RegionLimiters;
pub use retry::{
    parse_retry_after, RetryPolicy, DEFAULT_DELAY_HINT_MS, MAX_DELAY_HINT_MS, MIN_DELAY_HINT_MS,
};
pub use scheduler::{CallContext, RequestScheduler};
