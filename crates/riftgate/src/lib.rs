//! Rate-limited, multi-region gateway client for the Riot REST API.
//!
//! The upstream enforces a compound quota per routing region (a short burst
//! window and a long sustained window simultaneously) and intermittently
//! returns transient failures. [`RiftClient`] wraps every outbound call in
//! region routing, dual-window admission control, bounded concurrency, and
//! a jittered retry policy so arbitrary concurrent callers never violate
//! either quota.
//!
//! ```no_run
//! use riftgate::{Region, RiftClient, RiftgateConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RiftgateConfig::load()?;
//!     let client = RiftClient::from_env(&config)?;
//!
//!     let account = client
//!         .account_by_riot_id(Region::Americas, "Faker", "KR1")
//!         .await?;
//!     println!("puuid: {}", account.puuid());
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod invoke;
mod models;
mod operations;
mod routes;

pub use client::RiftClient;
pub use models::{
    AccountDto, ActiveShardDto, MatchDto, MatchIdsFilter, MatchMetadataDto, SummonerDto,
    TimelineDto,
};

pub use riftgate_core::{Region, RiftgateConfig, ShardCode};
pub use riftgate_error::{ApiError, ApiErrorKind, ResponseSnapshot, RiftgateError, RiftgateResult};
