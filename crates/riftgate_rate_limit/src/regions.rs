//! Per-region limiter set.

use crate::DualWindowLimiter;
use riftgate_core::{RateWindow, Region, RiftgateConfig};
use std::collections::HashMap;
use std::sync::Arc;

/// One [`DualWindowLimiter`] per routing region.
///
/// Regions are fully independent: each limiter owns its own window state and
/// concurrency gate, so calls targeting different regions never block one
/// another. Every region's limiter is built eagerly at construction; the
/// set is immutable afterwards.
#[derive(Clone)]
pub struct RegionLimiters {
    limiters: HashMap<Region, Arc<DualWindowLimiter>>,
}

impl RegionLimiters {
    /// Build a limiter for every region from the same window shape.
    pub fn new(fast: RateWindow, slow: RateWindow, max_concurrent: u32) -> Self {
        let limiters = Region::all()
            .map(|region| {
                (
                    region,
                    Arc::new(DualWindowLimiter::new(fast, slow, max_concurrent)),
                )
            })
            .collect();
        Self { limiters }
    }

    /// Build the per-region set from gateway configuration.
    pub fn from_config(config: &RiftgateConfig) -> Self {
        Self::new(*config.fast(), *config.slow(), *config.max_concurrent())
    }

    /// The limiter owning `region`'s admission state.
    pub fn get(&self, region: Region) -> Arc<DualWindowLimiter> {
        self.limiters
            .get(&region)
            .cloned()
            .expect("every region has a limiter by construction")
    }
}
