//! Core data types for the Riftgate gateway client.
//!
//! This crate provides the routing and configuration types shared across the
//! Riftgate workspace: the closed [`Region`] enumeration with shard routing,
//! the [`RateWindow`] quota description, and layered TOML configuration.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod region;
mod telemetry;
mod window;

pub use config::{RequestConfig, RiftgateConfig};
pub use region::{Region, ShardCode};
pub use telemetry::init_tracing;
pub use window::RateWindow;
