//! Gateway client construction and lifecycle.

use reqwest::header::HeaderMap;
use riftgate_core::RiftgateConfig;
use riftgate_error::{ConfigError, HttpError, RiftgateResult};
use riftgate_rate_limit::{RegionLimiters, RequestScheduler, RetryPolicy};
use std::time::Duration;
use tracing::{debug, instrument};

/// Environment variable holding the upstream credential.
pub(crate) const API_KEY_ENV: &str = "RIOT_API_KEY";

/// Rate-limited, multi-region gateway client.
///
/// One instance owns a limiter per routing region; clones of the reqwest
/// client inside are cheap, but the limiter state is deliberately not
/// shareable across instances — two clients would each believe they own the
/// quota. Construct once and share by reference (or `Arc`).
pub struct RiftClient {
    pub(crate) http: reqwest::Client,
    pub(crate) api_key: String,
    pub(crate) scheduler: RequestScheduler,
    pub(crate) timeout: Duration,
    pub(crate) client_tag: Option<String>,
    pub(crate) extra_headers: HeaderMap,
}

impl RiftClient {
    /// Create a client with an explicit credential.
    ///
    /// # Errors
    ///
    /// Returns an error if the credential is empty, the configuration
    /// violates its invariants, or the HTTP client cannot be built.
    #[instrument(skip(api_key, config), fields(key_len = api_key.as_ref().len()))]
    pub fn new(api_key: impl AsRef<str>, config: &RiftgateConfig) -> RiftgateResult<Self> {
        let api_key = api_key.as_ref().trim().to_string();
        if api_key.is_empty() {
            return Err(ConfigError::new("upstream credential must not be empty"))?;
        }
        config.validate()?;

        debug!("Building gateway HTTP client");
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| HttpError::new(format!("failed to build HTTP client: {}", e)))?;

        let scheduler = RequestScheduler::new(
            RegionLimiters::from_config(config),
            RetryPolicy::new(*config.request().max_retries()),
        );

        Ok(Self {
            http,
            api_key,
            scheduler,
            timeout: config.request().timeout(),
            client_tag: config.client_tag().clone(),
            extra_headers: HeaderMap::new(),
        })
    }

    /// Create a client reading the credential from `RIOT_API_KEY`.
    ///
    /// A `.env` file in the working directory is honored.
    pub fn from_env(config: &RiftgateConfig) -> RiftgateResult<Self> {
        dotenvy::dotenv().ok();
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| ConfigError::new(format!("{} environment variable not set", API_KEY_ENV)))?;
        Self::new(api_key, config)
    }

    /// Attach caller-supplied default headers to every request.
    ///
    /// Headers merge over the built-in defaults; the authorization header is
    /// applied after these and can never be displaced.
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.extra_headers.extend(headers);
        self
    }

    /// The per-attempt deadline in milliseconds.
    pub(crate) fn timeout_ms(&self) -> u64 {
        self.timeout.as_millis() as u64
    }
}
