//! Dual-window rate limiter with a bounded-concurrency gate.
//!
//! One instance exists per routing region. Admission requires a concurrency
//! permit, then a token from the fast (burst) window, then a token from the
//! slow (sustained) window. Each window's check-and-debit runs under a fair
//! async mutex held across any pacing sleep, so submissions within a region
//! are served strictly FIFO and no two submissions can both observe the
//! last token as available.

use riftgate_core::RateWindow;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedSemaphorePermit, Semaphore};
use tokio::time::Instant;
use tracing::trace;

/// Sliding-window state for one quota window.
///
/// A grant occupies a slot for exactly `interval` after its timestamp, so
/// any sliding interval contains at most `limit` grants. Slots are a
/// one-way debit: completing the admitted work does not free a slot early.
struct WindowState {
    window: RateWindow,
    grants: VecDeque<Instant>,
    last_grant: Option<Instant>,
}

impl WindowState {
    fn new(window: RateWindow) -> Self {
        Self {
            window,
            grants: VecDeque::with_capacity(window.limit() as usize),
            last_grant: None,
        }
    }

    /// Drop grant records older than one interval.
    fn expire(&mut self, now: Instant) {
        let horizon = self.window.interval();
        while let Some(front) = self.grants.front() {
            if now.duration_since(*front) >= horizon {
                self.grants.pop_front();
            } else {
                break;
            }
        }
    }

    fn at_capacity(&self) -> bool {
        self.grants.len() >= self.window.limit() as usize
    }

    /// Earliest instant the minimum inter-grant spacing allows a new grant.
    fn spacing_clears_at(&self) -> Option<Instant> {
        self.last_grant.map(|last| last + self.window.grant_spacing())
    }

    fn debit(&mut self, now: Instant) {
        self.grants.push_back(now);
        self.last_grant = Some(now);
    }
}

/// RAII guard for an admission.
///
/// Dropping the guard releases the concurrency slot immediately. Window
/// tokens are never returned; they expire on their own one interval after
/// the grant.
pub struct AdmissionGuard {
    _permit: OwnedSemaphorePermit,
}

/// Admits at most `fast.limit` units per `fast.interval` AND at most
/// `slow.limit` units per `slow.interval`, with a bounded number in flight,
/// for one region.
///
/// # Example
///
/// ```rust,ignore
/// let limiter = DualWindowLimiter::new(fast, slow, 5);
///
/// let guard = limiter.acquire().await;
/// // make the API call...
/// drop(guard); // releases the concurrency slot only
/// ```
pub struct DualWindowLimiter {
    fast: Mutex<WindowState>,
    slow: Mutex<WindowState>,
    gate: Arc<Semaphore>,
    max_concurrent: u32,
}

impl DualWindowLimiter {
    /// Create a limiter for one region.
    pub fn new(fast: RateWindow, slow: RateWindow, max_concurrent: u32) -> Self {
        Self {
            fast: Mutex::new(WindowState::new(fast)),
            slow: Mutex::new(WindowState::new(slow)),
            gate: Arc::new(Semaphore::new(max_concurrent as usize)),
            max_concurrent,
        }
    }

    /// The configured in-flight bound.
    pub fn max_concurrent(&self) -> u32 {
        self.max_concurrent
    }

    /// Currently available concurrency slots (diagnostic).
    pub fn available_slots(&self) -> usize {
        self.gate.available_permits()
    }

    /// Suspend until a concurrency slot is free and both windows grant a
    /// token: the fast window smooths bursts before the slow window applies
    /// the binding long-term constraint.
    ///
    /// Dropping the returned future before it resolves (a caller deadline
    /// firing while queued) dequeues the submission. The concurrency slot
    /// comes first and its permit is released on drop, so a waiter queued
    /// at the gate has debited nothing; a window not yet debited keeps all
    /// its tokens. A fast-window token already debited when the slow window
    /// stalls is not returned.
    pub async fn acquire(&self) -> AdmissionGuard {
        let permit = self
            .gate
            .clone()
            .acquire_owned()
            .await
            .expect("admission semaphore is never closed");
        Self::take(&self.fast).await;
        Self::take(&self.slow).await;
        trace!("admission granted");
        AdmissionGuard { _permit: permit }
    }

    /// Try to acquire without waiting.
    ///
    /// Returns `None` if the concurrency gate or any window would block.
    /// Like a cancelled `acquire`, a fast-window debit is not rolled back
    /// when the slow window refuses.
    pub fn try_acquire(&self) -> Option<AdmissionGuard> {
        let permit = self.gate.clone().try_acquire_owned().ok()?;
        let now = Instant::now();
        Self::try_take(&self.fast, now)?;
        Self::try_take(&self.slow, now)?;
        Some(AdmissionGuard { _permit: permit })
    }

    /// Wait for one token from one window.
    ///
    /// The mutex is tokio's fair lock, so waiters queue FIFO; holding it
    /// across the pacing sleeps keeps check-and-debit atomic per region.
    async fn take(bucket: &Mutex<WindowState>) {
        let mut state = bucket.lock().await;
        loop {
            let now = Instant::now();
            state.expire(now);
            if state.at_capacity() {
                let oldest = *state
                    .grants
                    .front()
                    .expect("window at capacity holds at least one grant");
                tokio::time::sleep_until(oldest + state.window.interval()).await;
                continue;
            }
            if let Some(earliest) = state.spacing_clears_at() {
                if now < earliest {
                    tokio::time::sleep_until(earliest).await;
                    continue;
                }
            }
            state.debit(now);
            return;
        }
    }

    fn try_take(bucket: &Mutex<WindowState>, now: Instant) -> Option<()> {
        let mut state = bucket.try_lock().ok()?;
        state.expire(now);
        if state.at_capacity() {
            return None;
        }
        if let Some(earliest) = state.spacing_clears_at() {
            if now < earliest {
                return None;
            }
        }
        state.debit(now);
        Some(())
    }
}
