//! Tests for configuration loading and validation.

use riftgate_core::{RateWindow, RiftgateConfig};
use std::io::Write;
use std::time::Duration;

#[test]
fn test_defaults_match_upstream_development_quotas() {
    let config = RiftgateConfig::default();
    assert_eq!(*config.max_concurrent(), 5);
    assert_eq!(config.fast().limit(), 20);
    assert_eq!(config.fast().interval_ms(), 1_000);
    assert_eq!(config.slow().limit(), 100);
    assert_eq!(config.slow().interval_ms(), 120_000);
    assert_eq!(*config.request().timeout_ms(), 15_000);
    assert_eq!(*config.request().max_retries(), 6);
    assert!(config.client_tag().is_none());
    assert!(config.validate().is_ok());
}

#[test]
fn test_from_file_overrides_and_fills_defaults() {
    let mut file = tempfile::NamedTempFile::with_suffix(".toml").expect("temp file");
    writeln!(
        file,
        r#"
max_concurrent = 2
client_tag = "riftgate-itest"

[fast]
limit = 4
interval_ms = 500

[request]
max_retries = 1
"#
    )
    .expect("write config");

    let config = RiftgateConfig::from_file(file.path()).expect("parse config");
    assert_eq!(*config.max_concurrent(), 2);
    assert_eq!(config.fast().limit(), 4);
    assert_eq!(config.fast().interval_ms(), 500);
    // Unspecified sections keep their defaults.
    assert_eq!(config.slow().limit(), 100);
    assert_eq!(*config.request().max_retries(), 1);
    assert_eq!(*config.request().timeout_ms(), 15_000);
    assert_eq!(config.client_tag().as_deref(), Some("riftgate-itest"));
}

#[test]
fn test_zero_window_limit_is_rejected() {
    let mut file = tempfile::NamedTempFile::with_suffix(".toml").expect("temp file");
    writeln!(
        file,
        r#"
[fast]
limit = 0
interval_ms = 1000
"#
    )
    .expect("write config");

    let err = RiftgateConfig::from_file(file.path()).expect_err("zero limit must fail");
    assert!(format!("{}", err).contains("nonzero"));
}

#[test]
fn test_rate_window_rejects_zero_fields() {
    assert!(RateWindow::new(0, 1000).is_err());
    assert!(RateWindow::new(10, 0).is_err());
    assert!(RateWindow::new(10, 1000).is_ok());
}

#[test]
fn test_grant_spacing_derivation() {
    // interval / limit below the ceiling is used as-is.
    let window = RateWindow::new(100, 1_000).expect("window");
    assert_eq!(window.grant_spacing(), Duration::from_millis(10));

    // Long windows are capped at the 50ms ceiling.
    let slow = RateWindow::new(100, 120_000).expect("window");
    assert_eq!(slow.grant_spacing(), Duration::from_millis(50));
}
