//! Error types for the Riftgate gateway client.
//!
//! This crate provides the foundation error types used throughout the Riftgate workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern for clean error handling:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! The central type for outbound calls is [`ApiError`], whose kind classifies
//! each failed attempt as retryable (rate limited, server error) or fatal
//! (validation, timeout, client error, transport, decode).
//!
//! # Examples
//!
//! ```
//! use riftgate_error::{RiftgateResult, HttpError};
//!
//! fn build_client() -> RiftgateResult<String> {
//!     Err(HttpError::new("TLS backend unavailable"))?
//! }
//!
//! match build_client() {
//!     Ok(client) => println!("Got: {}", client),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod api;
mod config;
mod error;
mod http;

pub use api::{ApiError, ApiErrorKind, ResponseSnapshot, RetryableError};
pub use config::ConfigError;
pub use error::{RiftgateError, RiftgateErrorKind, RiftgateResult};
pub use http::HttpError;
