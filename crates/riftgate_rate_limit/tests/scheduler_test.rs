//! Tests for retry scheduling through admission control.

use riftgate_core::{RateWindow, Region};
use riftgate_error::{ApiError, ApiErrorKind, ResponseSnapshot};
use riftgate_rate_limit::{RegionLimiters, RequestScheduler, RetryPolicy};
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use tokio::time::Instant;

fn scheduler(max_retries: usize) -> RequestScheduler {
    let fast = RateWindow::new(10_000, 1_000).expect("fast window");
    let slow = RateWindow::new(100_000, 60_000).expect("slow window");
    RequestScheduler::new(
        RegionLimiters::new(fast, slow, 5),
        RetryPolicy::new(max_retries),
    )
}

fn server_error() -> ApiError {
    ApiError::new(ApiErrorKind::Server(ResponseSnapshot::new(
        503,
        vec![("content-type".into(), "text/plain".into())],
        "overloaded".into(),
        None,
    )))
}

fn rate_limited(hint_ms: u64) -> ApiError {
    ApiError::new(ApiErrorKind::RateLimited(ResponseSnapshot::new(
        429,
        vec![("retry-after".into(), (hint_ms / 1_000).to_string())],
        String::new(),
        Some(hint_ms),
    )))
}

#[tokio::test(start_paused = true)]
async fn test_retryable_failure_then_success() {
    let scheduler = scheduler(6);
    let attempts = AtomicU32::new(0);

    let start = Instant::now();
    let value = scheduler
        .schedule(Region::Americas, || async {
            match attempts.fetch_add(1, Ordering::SeqCst) {
                0 => Err(server_error()),
                _ => Ok(42u32),
            }
        })
        .await
        .expect("second attempt succeeds");

    assert_eq!(value, 42);
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
    // First-retry backoff is jitter(3000ms * 2^0): within [2700, 3300]ms.
    let elapsed = start.elapsed();
    assert!(
        elapsed >= Duration::from_millis(2_700),
        "call resolved before the computed backoff (elapsed {:?})",
        elapsed
    );
    assert!(elapsed <= Duration::from_millis(3_400), "elapsed {:?}", elapsed);
}

#[tokio::test(start_paused = true)]
async fn test_upstream_hint_drives_the_first_delay() {
    let scheduler = scheduler(6);
    let attempts = AtomicU32::new(0);

    let start = Instant::now();
    scheduler
        .schedule(Region::Europe, || async {
            match attempts.fetch_add(1, Ordering::SeqCst) {
                0 => Err(rate_limited(10_000)),
                _ => Ok(()),
            }
        })
        .await
        .expect("second attempt succeeds");

    // jitter(10000ms * 2^0) lies in [9000, 11000]ms; the elapsed time must
    // track the hint, not the 3000ms default.
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_millis(9_000), "elapsed {:?}", elapsed);
    assert!(elapsed <= Duration::from_millis(11_100), "elapsed {:?}", elapsed);
}

#[tokio::test(start_paused = true)]
async fn test_backoff_doubles_from_the_clamped_hint() {
    let scheduler = scheduler(6);
    let attempts = AtomicU32::new(0);

    let start = Instant::now();
    scheduler
        .schedule(Region::Americas, || async {
            match attempts.fetch_add(1, Ordering::SeqCst) {
                0 | 1 => Err(rate_limited(2_000)),
                _ => Ok(()),
            }
        })
        .await
        .expect("third attempt succeeds");

    // Delays are jitter(2000) + jitter(4000): total within [5400, 6600]ms.
    // A scheduler ignoring the hint would wait 3000 + 6000 = 9000ms.
    assert_eq!(attempts.load(Ordering::SeqCst), 3);
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_millis(5_400), "elapsed {:?}", elapsed);
    assert!(elapsed <= Duration::from_millis(6_700), "elapsed {:?}", elapsed);
}

#[tokio::test(start_paused = true)]
async fn test_exhausted_retries_reject_with_last_error() {
    let scheduler = scheduler(2);
    let attempts = AtomicU32::new(0);

    let err = scheduler
        .schedule(Region::Asia, || async {
            attempts.fetch_add(1, Ordering::SeqCst);
            Err::<(), _>(server_error())
        })
        .await
        .expect_err("persistent 5xx must reject");

    assert!(matches!(err.kind(), ApiErrorKind::Server(_)));
    // Initial attempt + 2 retries, then no further network attempts.
    assert_eq!(attempts.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn test_fatal_client_error_is_never_retried() {
    let scheduler = scheduler(6);
    let attempts = AtomicU32::new(0);

    let err = scheduler
        .schedule(Region::Americas, || async {
            attempts.fetch_add(1, Ordering::SeqCst);
            Err::<(), _>(ApiError::new(ApiErrorKind::Client(ResponseSnapshot::new(
                404,
                vec![],
                "not found".into(),
                None,
            ))))
        })
        .await
        .expect_err("client error is fatal");

    assert!(matches!(err.kind(), ApiErrorKind::Client(_)));
    assert_eq!(attempts.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_validation_failure_rejects_immediately() {
    let scheduler = scheduler(6);
    let attempts = AtomicU32::new(0);

    let err = scheduler
        .schedule(Region::Americas, || async {
            attempts.fetch_add(1, Ordering::SeqCst);
            Err::<(), _>(ApiError::new(ApiErrorKind::Validation(
                "empty identifier".into(),
            )))
        })
        .await
        .expect_err("validation is fatal");

    assert!(matches!(err.kind(), ApiErrorKind::Validation(_)));
    assert_eq!(attempts.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_timeouts_are_fatal_by_policy() {
    let scheduler = scheduler(6);
    let attempts = AtomicU32::new(0);

    let err = scheduler
        .schedule(Region::Sea, || async {
            attempts.fetch_add(1, Ordering::SeqCst);
            Err::<(), _>(ApiError::new(ApiErrorKind::Timeout { limit_ms: 15_000 }))
        })
        .await
        .expect_err("timeout is fatal");

    assert!(matches!(err.kind(), ApiErrorKind::Timeout { .. }));
    assert_eq!(attempts.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_deadline_while_queued_consumes_no_attempt() {
    let fast = RateWindow::new(10_000, 1_000).expect("fast window");
    let slow = RateWindow::new(100_000, 60_000).expect("slow window");
    let limiters = RegionLimiters::new(fast, slow, 1);
    let scheduler = RequestScheduler::new(limiters.clone(), RetryPolicy::default());

    // Hold the region's only concurrency slot so the call stays queued.
    let _held = limiters.get(Region::Americas).acquire().await;

    let attempts = AtomicU32::new(0);
    let err = scheduler
        .schedule_with_deadline(
            Region::Americas,
            Some(Instant::now() + Duration::from_millis(100)),
            || async {
                attempts.fetch_add(1, Ordering::SeqCst);
                Ok(())
            },
        )
        .await
        .expect_err("queued call must hit its deadline");

    assert!(matches!(err.kind(), ApiErrorKind::Timeout { .. }));
    assert_eq!(attempts.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn test_retries_re_enter_admission_control() {
    // One admission per second: the retry cannot run before the window
    // grants a second token, on top of the backoff delay.
    let fast = RateWindow::new(1, 1_000).expect("fast window");
    let slow = RateWindow::new(100_000, 60_000).expect("slow window");
    let scheduler =
        RequestScheduler::new(RegionLimiters::new(fast, slow, 5), RetryPolicy::default());

    let attempts = AtomicU32::new(0);
    let start = Instant::now();
    scheduler
        .schedule(Region::Europe, || async {
            match attempts.fetch_add(1, Ordering::SeqCst) {
                0 => Err(server_error()),
                _ => Ok(()),
            }
        })
        .await
        .expect("second attempt succeeds");

    assert_eq!(attempts.load(Ordering::SeqCst), 2);
    assert!(start.elapsed() >= Duration::from_millis(2_700));
}
