//! Response payloads and request filters for the public operations.
//!
//! Payload fields follow the upstream's camelCase wire names. Match and
//! timeline bodies carry a large, frequently-revised `info` object; it is
//! kept as raw JSON rather than chasing the upstream's schema churn.

use derive_getters::Getters;
use riftgate_core::ShardCode;
use serde::{Deserialize, Serialize};

/// An account resolved by riot id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct AccountDto {
    /// Globally unique player identifier.
    puuid: String,
    /// Display name half of the riot id, absent for some legacy accounts.
    #[serde(default)]
    game_name: Option<String>,
    /// Tag half of the riot id, absent for some legacy accounts.
    #[serde(default)]
    tag_line: Option<String>,
}

/// The shard a player is currently active on for a given game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct ActiveShardDto {
    /// Globally unique player identifier.
    puuid: String,
    /// Game the shard applies to.
    game: String,
    /// Shard code, e.g. `na1`.
    active_shard: String,
}

impl ActiveShardDto {
    /// The active shard as a normalized [`ShardCode`].
    pub fn shard(&self) -> ShardCode {
        ShardCode::new(&self.active_shard)
    }
}

/// A summoner profile served by the shard's platform host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct SummonerDto {
    /// Encrypted summoner id, absent on some shards.
    #[serde(default)]
    id: Option<String>,
    /// Globally unique player identifier.
    puuid: String,
    /// Icon shown on the profile.
    profile_icon_id: i64,
    /// Last modification timestamp, epoch milliseconds.
    revision_date: i64,
    /// Current level.
    summoner_level: i64,
}

/// Identity block common to match and timeline payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct MatchMetadataDto {
    /// Wire format revision of the payload.
    data_version: String,
    /// Shard-prefixed match identifier, e.g. `NA1_1234567890`.
    match_id: String,
    /// Puuids of every participant.
    participants: Vec<String>,
}

/// A completed match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct MatchDto {
    /// Identity block.
    metadata: MatchMetadataDto,
    /// Full match body, kept as raw JSON.
    info: serde_json::Value,
}

/// The event timeline of a completed match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct TimelineDto {
    /// Identity block.
    metadata: MatchMetadataDto,
    /// Frame-by-frame body, kept as raw JSON.
    info: serde_json::Value,
}

/// Optional filters for a match-id listing.
///
/// Every field is optional; absent fields are omitted from the query string
/// so the upstream applies its own defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchIdsFilter {
    /// Zero-based start index into the player's history.
    pub start: Option<u32>,
    /// Number of ids to return.
    pub count: Option<u32>,
    /// Restrict to a queue id.
    pub queue: Option<u32>,
    /// Earliest game start, epoch seconds.
    pub start_time: Option<i64>,
    /// Latest game start, epoch seconds.
    pub end_time: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_tolerates_missing_riot_id_halves() {
        let account: AccountDto =
            serde_json::from_str(r#"{"puuid":"abc-123"}"#).expect("deserialize");
        assert_eq!(account.puuid(), "abc-123");
        assert_eq!(account.game_name(), &None);
        assert_eq!(account.tag_line(), &None);
    }

    #[test]
    fn active_shard_normalizes_its_code() {
        let shard: ActiveShardDto = serde_json::from_str(
            r#"{"puuid":"abc","game":"lor","activeShard":"NA1"}"#,
        )
        .expect("deserialize");
        assert_eq!(shard.shard().as_str(), "na1");
    }

    #[test]
    fn match_payload_keeps_info_raw() {
        let body = r#"{
            "metadata": {
                "dataVersion": "2",
                "matchId": "NA1_42",
                "participants": ["p1", "p2"]
            },
            "info": {"gameDuration": 1800, "unknownNewField": true}
        }"#;
        let parsed: MatchDto = serde_json::from_str(body).expect("deserialize");
        assert_eq!(parsed.metadata().match_id(), "NA1_42");
        assert_eq!(parsed.info()["gameDuration"], 1800);
    }
}
