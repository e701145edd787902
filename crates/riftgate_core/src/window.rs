//! Rolling quota window description.

use riftgate_error::{ConfigError, RiftgateResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Ceiling on the derived inter-grant spacing, in milliseconds.
///
/// Spacing smooths bursts so a window does not grant its entire capacity at
/// a refill boundary; the cap keeps long windows from slowing every grant to
/// a crawl.
pub const GRANT_SPACING_CEILING_MS: u64 = 50;

/// "At most `limit` admissions per rolling `interval_ms`."
///
/// # Examples
///
/// ```
/// use riftgate_core::RateWindow;
/// use std::time::Duration;
///
/// let fast = RateWindow::new(20, 1000).unwrap();
/// assert_eq!(fast.grant_spacing(), Duration::from_millis(50));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct RateWindow {
    limit: u32,
    interval_ms: u64,
}

impl RateWindow {
    /// Create a window, rejecting zero limits or intervals.
    pub fn new(limit: u32, interval_ms: u64) -> RiftgateResult<Self> {
        let window = Self { limit, interval_ms };
        window.validate()?;
        Ok(window)
    }

    /// Check the window invariants (both fields nonzero).
    ///
    /// Deserialized windows are validated through here before use.
    pub fn validate(&self) -> RiftgateResult<()> {
        if self.limit == 0 {
            return Err(ConfigError::new("rate window limit must be nonzero"))?;
        }
        if self.interval_ms == 0 {
            return Err(ConfigError::new("rate window interval must be nonzero"))?;
        }
        Ok(())
    }

    /// Maximum admissions per rolling interval.
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Rolling interval length in milliseconds.
    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Rolling interval length.
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Minimum spacing between grants: `interval / limit`, capped at
    /// [`GRANT_SPACING_CEILING_MS`].
    pub fn grant_spacing(&self) -> Duration {
        let spacing_ms = (self.interval_ms / u64::from(self.limit)).min(GRANT_SPACING_CEILING_MS);
        Duration::from_millis(spacing_ms)
    }
}
