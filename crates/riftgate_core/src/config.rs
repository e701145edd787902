//! Configuration structures for the gateway client.
//!
//! TOML-based configuration with layered precedence:
//! - Bundled defaults (include_str! from riftgate.toml)
//! - User overrides (~/.config/riftgate/riftgate.toml, then ./riftgate.toml)
//!
//! The credential is never read from configuration files; callers pass it
//! explicitly or read it from the `RIOT_API_KEY` environment variable.

use crate::RateWindow;
use config::{Config, File, FileFormat};
use derive_getters::Getters;
use riftgate_error::{ConfigError, RiftgateResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

fn default_max_concurrent() -> u32 {
    5
}

fn default_fast_window() -> RateWindow {
    // Burst quota of the upstream development key: 20 per second.
    RateWindow::new(20, 1_000).expect("default fast window is valid")
}

fn default_slow_window() -> RateWindow {
    // Sustained quota of the upstream development key: 100 per 2 minutes.
    RateWindow::new(100, 120_000).expect("default slow window is valid")
}

fn default_timeout_ms() -> u64 {
    15_000
}

fn default_max_retries() -> usize {
    6
}

/// Per-attempt request settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Getters)]
pub struct RequestConfig {
    /// Hard per-attempt deadline in milliseconds.
    #[serde(default = "default_timeout_ms")]
    timeout_ms: u64,

    /// Retries after the initial attempt for retryable failures.
    #[serde(default = "default_max_retries")]
    max_retries: usize,
}

impl RequestConfig {
    /// The per-attempt deadline as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            max_retries: default_max_retries(),
        }
    }
}

/// Top-level gateway configuration.
///
/// # Example
///
/// ```no_run
/// use riftgate_core::RiftgateConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// // Load configuration (bundled defaults + user overrides)
/// let config = RiftgateConfig::load()?;
/// println!("fast window: {} per {}ms",
///     config.fast().limit(), config.fast().interval_ms());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Getters)]
pub struct RiftgateConfig {
    /// Maximum in-flight requests per region.
    #[serde(default = "default_max_concurrent")]
    max_concurrent: u32,

    /// Short burst window, enforced per region.
    #[serde(default = "default_fast_window")]
    fast: RateWindow,

    /// Long sustained window, enforced per region.
    #[serde(default = "default_slow_window")]
    slow: RateWindow,

    /// Per-attempt request settings.
    #[serde(default)]
    request: RequestConfig,

    /// Optional identifying header value attached to every request.
    #[serde(default)]
    client_tag: Option<String>,
}

impl Default for RiftgateConfig {
    fn default() -> Self {
        Self {
            max_concurrent: default_max_concurrent(),
            fast: default_fast_window(),
            slow: default_slow_window(),
            request: RequestConfig::default(),
            client_tag: None,
        }
    }
}

impl RiftgateConfig {
    /// Load configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// parsed values violate the window invariants.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> RiftgateResult<Self> {
        debug!("Loading configuration from file");

        let config: Self = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                ))
            })?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with precedence: user override > bundled default.
    ///
    /// Configuration sources in order of precedence (later sources override earlier):
    /// 1. Bundled defaults (riftgate.toml shipped with the library)
    /// 2. User config in home directory (~/.config/riftgate/riftgate.toml)
    /// 3. User config in current directory (./riftgate.toml)
    ///
    /// User config files are optional and silently skipped if not found.
    #[instrument]
    pub fn load() -> RiftgateResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        // Bundled default configuration
        const DEFAULT_CONFIG: &str = include_str!("../../../riftgate.toml");

        let mut builder = Config::builder()
            // Start with bundled defaults
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        // Add user config from home directory (optional)
        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/riftgate/riftgate.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        // Add user config from current directory (optional, highest precedence)
        builder = builder.add_source(File::with_name("riftgate").required(false));

        let config: Self = builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Check configuration invariants.
    pub fn validate(&self) -> RiftgateResult<()> {
        self.fast.validate()?;
        self.slow.validate()?;
        if self.max_concurrent == 0 {
            return Err(ConfigError::new("max_concurrent must be nonzero"))?;
        }
        if self.request.timeout_ms == 0 {
            return Err(ConfigError::new("request timeout must be nonzero"))?;
        }
        Ok(())
    }
}
