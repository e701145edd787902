//! Region routing for shard codes and match-style identifiers.
//!
//! The upstream partitions its shards into a small set of geographic routing
//! clusters. Account and match lookups are served by the cluster host, while
//! some profile lookups are served by the shard's own platform host. Either
//! way, admission control is always keyed by the cluster.

use strum::IntoEnumIterator;

/// A geographic routing cluster.
///
/// Every shard maps to exactly one region. Unrecognized shards resolve to
/// [`Region::DEFAULT`] rather than failing: the upstream occasionally
/// introduces new shards before client configuration catches up, and
/// failing closed would break availability for an edge case that should
/// degrade gracefully.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Region {
    /// North and South American shards.
    Americas,
    /// Korean and Japanese shards.
    Asia,
    /// European, Turkish and Russian shards.
    Europe,
    /// Southeast Asian shards.
    Sea,
}

impl Region {
    /// Fallback region for shards with no configured membership.
    pub const DEFAULT: Region = Region::Americas;

    /// Resolve the region a shard routes through.
    ///
    /// Lookup is case-insensitive ([`ShardCode`] normalizes on
    /// construction). Unknown shards resolve to [`Region::DEFAULT`].
    ///
    /// # Examples
    ///
    /// ```
    /// use riftgate_core::{Region, ShardCode};
    ///
    /// assert_eq!(Region::from_shard(&ShardCode::new("NA1")), Region::Americas);
    /// assert_eq!(Region::from_shard(&ShardCode::new("kr")), Region::Asia);
    /// ```
    pub fn from_shard(shard: &ShardCode) -> Region {
        match shard.as_str() {
            "na1" | "br1" | "la1" | "la2" | "oc1" => Region::Americas,
            "kr" | "jp1" => Region::Asia,
            "euw1" | "eun1" | "tr1" | "ru" | "me1" => Region::Europe,
            "sg2" | "ph2" | "th2" | "tw2" | "vn2" => Region::Sea,
            _ => Region::DEFAULT,
        }
    }

    /// Resolve the region from the shard prefix of a match-style identifier.
    ///
    /// Splits on the first `_` and routes by the prefix. An identifier with
    /// no delimiter (or an empty one) is treated as a bare shard code, which
    /// at worst resolves to the default region. Never fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use riftgate_core::Region;
    ///
    /// assert_eq!(Region::from_match_id("NA1_1234567890"), Region::Americas);
    /// assert_eq!(Region::from_match_id("euw1"), Region::Europe);
    /// ```
    pub fn from_match_id(id: &str) -> Region {
        let prefix = id.split('_').next().unwrap_or(id);
        Region::from_shard(&ShardCode::new(prefix))
    }

    /// Hostname of this region's routing cluster.
    pub fn host(&self) -> &'static str {
        match self {
            Region::Americas => "americas.api.riotgames.com",
            Region::Asia => "asia.api.riotgames.com",
            Region::Europe => "europe.api.riotgames.com",
            Region::Sea => "sea.api.riotgames.com",
        }
    }

    /// All regions, in declaration order.
    pub fn all() -> impl Iterator<Item = Region> {
        Region::iter()
    }
}

/// A short identifier for a specific data-center shard.
///
/// Immutable and case-insensitive; the code is normalized to lowercase on
/// construction so lookups and host formatting never have to re-normalize.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
#[display("{}", code)]
pub struct ShardCode {
    code: String,
}

impl ShardCode {
    /// Create a shard code, trimming whitespace and lowercasing.
    pub fn new(code: impl AsRef<str>) -> Self {
        Self {
            code: code.as_ref().trim().to_ascii_lowercase(),
        }
    }

    /// The normalized shard code.
    pub fn as_str(&self) -> &str {
        &self.code
    }

    /// Hostname of this shard's platform endpoint.
    pub fn host(&self) -> String {
        format!("{}.api.riotgames.com", self.code)
    }

    /// The region this shard routes through for admission control.
    pub fn region(&self) -> Region {
        Region::from_shard(self)
    }
}

impl From<&str> for ShardCode {
    fn from(code: &str) -> Self {
        ShardCode::new(code)
    }
}
