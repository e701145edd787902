//! URL construction for every public operation.
//!
//! Dynamic path segments are percent-encoded by the `Url` path builder;
//! query parameters with absent values are silently omitted.

use crate::models::MatchIdsFilter;
use reqwest::Url;
use riftgate_core::{Region, ShardCode};
use riftgate_error::{ApiError, ApiErrorKind};

/// Build an https URL from a host, encoded path segments, and the query
/// parameters that are present.
pub(crate) fn build_url(
    host: &str,
    segments: &[&str],
    query: &[(&str, Option<String>)],
) -> Result<Url, ApiError> {
    let mut url = Url::parse(&format!("https://{}", host))
        .map_err(|e| ApiError::new(ApiErrorKind::Validation(format!("invalid host {}: {}", host, e))))?;
    url.path_segments_mut()
        .map_err(|_| ApiError::new(ApiErrorKind::Validation(format!("host {} cannot carry a path", host))))?
        .extend(segments);
    if query.iter().any(|(_, value)| value.is_some()) {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in query {
            if let Some(value) = value {
                pairs.append_pair(key, value);
            }
        }
    }
    Ok(url)
}

pub(crate) fn account_by_riot_id(
    region: Region,
    game_name: &str,
    tag_line: &str,
) -> Result<Url, ApiError> {
    build_url(
        region.host(),
        &[
            "riot", "account", "v1", "accounts", "by-riot-id", game_name, tag_line,
        ],
        &[],
    )
}

pub(crate) fn match_ids_by_puuid(
    region: Region,
    puuid: &str,
    filter: &MatchIdsFilter,
) -> Result<Url, ApiError> {
    build_url(
        region.host(),
        &["lol", "match", "v5", "matches", "by-puuid", puuid, "ids"],
        &[
            ("start", filter.start.map(|v| v.to_string())),
            ("count", filter.count.map(|v| v.to_string())),
            ("queue", filter.queue.map(|v| v.to_string())),
            ("startTime", filter.start_time.map(|v| v.to_string())),
            ("endTime", filter.end_time.map(|v| v.to_string())),
        ],
    )
}

pub(crate) fn match_by_id(region: Region, match_id: &str) -> Result<Url, ApiError> {
    build_url(region.host(), &["lol", "match", "v5", "matches", match_id], &[])
}

pub(crate) fn match_timeline(region: Region, match_id: &str) -> Result<Url, ApiError> {
    build_url(
        region.host(),
        &["lol", "match", "v5", "matches", match_id, "timeline"],
        &[],
    )
}

pub(crate) fn active_shard(region: Region, game: &str, puuid: &str) -> Result<Url, ApiError> {
    build_url(
        region.host(),
        &[
            "riot",
            "account",
            "v1",
            "active-shards",
            "by-game",
            game,
            "by-puuid",
            puuid,
        ],
        &[],
    )
}

pub(crate) fn summoner_by_puuid(shard: &ShardCode, puuid: &str) -> Result<Url, ApiError> {
    build_url(
        &shard.host(),
        &["lol", "summoner", "v4", "summoners", "by-puuid", puuid],
        &[],
    )
}
