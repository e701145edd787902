//! Top-level error wrapper types.

use crate::{ApiError, ConfigError, HttpError};

/// Foundation error enum for the Riftgate workspace.
///
/// # Examples
///
/// ```
/// use riftgate_error::{RiftgateError, HttpError};
///
/// let http_err = HttpError::new("Connection failed");
/// let err: RiftgateError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum RiftgateErrorKind {
    /// Classified API error from an outbound attempt
    #[from(ApiError)]
    Api(ApiError),
    /// HTTP client construction error
    #[from(HttpError)]
    Http(HttpError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
}

/// Riftgate error with kind discrimination.
///
/// # Examples
///
/// ```
/// use riftgate_error::{RiftgateResult, ConfigError};
///
/// fn might_fail() -> RiftgateResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Riftgate Error: {}", _0)]
pub struct RiftgateError(Box<RiftgateErrorKind>);

impl RiftgateError {
    /// Create a new error from a kind.
    pub fn new(kind: RiftgateErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &RiftgateErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to RiftgateErrorKind
impl<T> From<T> for RiftgateError
where
    T: Into<RiftgateErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Riftgate operations.
///
/// # Examples
///
/// ```
/// use riftgate_error::{RiftgateResult, HttpError};
///
/// fn build_client() -> RiftgateResult<String> {
///     Err(HttpError::new("no TLS backend"))?
/// }
/// ```
pub type RiftgateResult<T> = std::result::Result<T, RiftgateError>;
