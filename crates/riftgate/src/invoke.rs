//! Single-attempt HTTP invocation and response classification.
//!
//! One call to [`RiftClient::dispatch`] is exactly one network attempt: the
//! scheduler decides whether it runs again. Non-success responses are
//! translated into classified errors carrying a trimmed header snapshot, a
//! bounded body prefix, and the parsed upstream delay hint.

use crate::client::RiftClient;
use reqwest::header::{ACCEPT, RETRY_AFTER};
use reqwest::{Response, StatusCode, Url};
use riftgate_error::{ApiError, ApiErrorKind, ResponseSnapshot};
use riftgate_rate_limit::parse_retry_after;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Auth header expected by the upstream.
const AUTH_HEADER: &str = "x-riot-token";

/// Identifying header attached when a client tag is configured.
const CLIENT_TAG_HEADER: &str = "x-riftgate-client";

/// Maximum bytes of a failed response body kept for diagnostics.
const BODY_SNAPSHOT_LIMIT: usize = 4_096;

/// Response headers worth keeping in an error snapshot.
const SNAPSHOT_HEADERS: [&str; 6] = [
    "retry-after",
    "x-app-rate-limit",
    "x-app-rate-limit-count",
    "x-method-rate-limit",
    "x-method-rate-limit-count",
    "content-type",
];

/// Classify a non-success status with its response snapshot.
pub(crate) fn classify(status: StatusCode, snapshot: ResponseSnapshot) -> ApiErrorKind {
    if status == StatusCode::TOO_MANY_REQUESTS {
        ApiErrorKind::RateLimited(snapshot)
    } else if status.is_server_error() {
        ApiErrorKind::Server(snapshot)
    } else {
        ApiErrorKind::Client(snapshot)
    }
}

/// Capture the trimmed header set, delay hint, and bounded body prefix.
///
/// The body is streamed and dropped past [`BODY_SNAPSHOT_LIMIT`], so an
/// arbitrarily large error body never buffers in full.
pub(crate) async fn snapshot(mut response: Response) -> ResponseSnapshot {
    let status = response.status().as_u16();
    let headers: Vec<(String, String)> = response
        .headers()
        .iter()
        .filter(|(name, _)| SNAPSHOT_HEADERS.contains(&name.as_str()))
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();
    let retry_after_ms = response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_retry_after);

    let mut buf: Vec<u8> = Vec::new();
    while let Ok(Some(chunk)) = response.chunk().await {
        if !append_bounded(&mut buf, &chunk, BODY_SNAPSHOT_LIMIT) {
            break;
        }
    }
    let body = String::from_utf8_lossy(&buf).into_owned();
    ResponseSnapshot::new(status, headers, body, retry_after_ms)
}

/// Append a body chunk up to `limit` total bytes; returns `false` once the
/// buffer is full.
fn append_bounded(buf: &mut Vec<u8>, chunk: &[u8], limit: usize) -> bool {
    let remaining = limit.saturating_sub(buf.len());
    if chunk.len() < remaining {
        buf.extend_from_slice(chunk);
        true
    } else {
        buf.extend_from_slice(&chunk[..remaining]);
        false
    }
}

impl RiftClient {
    /// Run one attempt expecting a body.
    pub(crate) async fn execute<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        match self.dispatch(url, false).await? {
            Some(value) => Ok(value),
            None => Err(ApiError::new(ApiErrorKind::Decode(
                "upstream returned success without a body".into(),
            ))),
        }
    }

    /// Run one attempt where 404 is a legitimate empty result.
    pub(crate) async fn execute_optional<T: DeserializeOwned>(
        &self,
        url: Url,
    ) -> Result<Option<T>, ApiError> {
        self.dispatch(url, true).await
    }

    /// One network attempt: build headers, send with the per-attempt
    /// deadline, classify any non-success response.
    async fn dispatch<T: DeserializeOwned>(
        &self,
        url: Url,
        not_found_is_empty: bool,
    ) -> Result<Option<T>, ApiError> {
        debug!(url = %url, "dispatching attempt");

        let mut request = self.http.get(url).timeout(self.timeout);
        for (name, value) in self.extra_headers.iter() {
            request = request.header(name, value);
        }
        if !self.extra_headers.contains_key(ACCEPT) {
            request = request.header(ACCEPT, "application/json");
        }
        if let Some(tag) = &self.client_tag {
            request = request.header(CLIENT_TAG_HEADER, tag);
        }
        // Auth is applied last: caller-supplied headers may add, but can
        // never displace the credential.
        request = request.header(AUTH_HEADER, &self.api_key);

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::new(ApiErrorKind::Timeout {
                    limit_ms: self.timeout_ms(),
                })
            } else {
                ApiError::new(ApiErrorKind::Transport(e.to_string()))
            }
        })?;

        let status = response.status();
        if status.is_success() {
            let value = response.json::<T>().await.map_err(|e| {
                if e.is_timeout() {
                    ApiError::new(ApiErrorKind::Timeout {
                        limit_ms: self.timeout_ms(),
                    })
                } else {
                    ApiError::new(ApiErrorKind::Decode(e.to_string()))
                }
            })?;
            return Ok(Some(value));
        }

        if status == StatusCode::NOT_FOUND && not_found_is_empty {
            debug!("resource absent, returning no-data sentinel");
            return Ok(None);
        }

        let snapshot = snapshot(response).await;
        Err(ApiError::new(classify(status, snapshot)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(status: u16) -> ResponseSnapshot {
        ResponseSnapshot::new(status, vec![], String::new(), None)
    }

    #[test]
    fn classify_rate_limit() {
        let kind = classify(StatusCode::TOO_MANY_REQUESTS, snap(429));
        assert!(matches!(kind, ApiErrorKind::RateLimited(_)));
        assert!(kind.is_retryable());
    }

    #[test]
    fn classify_server_errors() {
        for status in [500u16, 502, 503, 504] {
            let kind = classify(
                StatusCode::from_u16(status).expect("valid status"),
                snap(status),
            );
            assert!(matches!(kind, ApiErrorKind::Server(_)), "status {}", status);
            assert!(kind.is_retryable());
        }
    }

    #[test]
    fn classify_client_errors_are_fatal() {
        for status in [400u16, 401, 403, 404] {
            let kind = classify(
                StatusCode::from_u16(status).expect("valid status"),
                snap(status),
            );
            assert!(matches!(kind, ApiErrorKind::Client(_)), "status {}", status);
            assert!(!kind.is_retryable());
        }
    }

    #[test]
    fn body_prefix_stops_at_the_byte_limit() {
        let mut buf = Vec::new();
        assert!(append_bounded(&mut buf, b"abc", 8));
        assert!(!append_bounded(&mut buf, &[b'x'; 100], 8));
        assert_eq!(buf.len(), 8);

        // A full buffer accepts nothing further.
        assert!(!append_bounded(&mut buf, b"more", 8));
        assert_eq!(buf, b"abcxxxxx");
    }

    #[test]
    fn snapshot_exposes_hint_through_the_error() {
        let kind = classify(
            StatusCode::TOO_MANY_REQUESTS,
            ResponseSnapshot::new(
                429,
                vec![("retry-after".into(), "7".into())],
                String::new(),
                Some(7_000),
            ),
        );
        assert_eq!(kind.retry_after_hint(), Some(7_000));
        assert_eq!(kind.status(), Some(429));
    }
}
