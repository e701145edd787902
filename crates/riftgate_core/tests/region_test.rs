//! Tests for shard-to-region routing.

use riftgate_core::{Region, ShardCode};

#[test]
fn test_known_shards_route_to_their_region() {
    assert_eq!(Region::from_shard(&ShardCode::new("na1")), Region::Americas);
    assert_eq!(Region::from_shard(&ShardCode::new("br1")), Region::Americas);
    assert_eq!(Region::from_shard(&ShardCode::new("kr")), Region::Asia);
    assert_eq!(Region::from_shard(&ShardCode::new("jp1")), Region::Asia);
    assert_eq!(Region::from_shard(&ShardCode::new("euw1")), Region::Europe);
    assert_eq!(Region::from_shard(&ShardCode::new("eun1")), Region::Europe);
    assert_eq!(Region::from_shard(&ShardCode::new("sg2")), Region::Sea);
}

#[test]
fn test_shard_lookup_is_case_insensitive() {
    assert_eq!(Region::from_shard(&ShardCode::new("NA1")), Region::Americas);
    assert_eq!(Region::from_shard(&ShardCode::new("Euw1")), Region::Europe);
    assert_eq!(Region::from_shard(&ShardCode::new("KR")), Region::Asia);
}

#[test]
fn test_unknown_shard_falls_back_to_default() {
    assert_eq!(Region::from_shard(&ShardCode::new("xx9")), Region::DEFAULT);
    assert_eq!(Region::from_shard(&ShardCode::new("")), Region::DEFAULT);
}

#[test]
fn test_match_id_routes_by_shard_prefix() {
    assert_eq!(Region::from_match_id("NA1_1234567890"), Region::Americas);
    assert_eq!(Region::from_match_id("EUW1_4510264634"), Region::Europe);
    assert_eq!(Region::from_match_id("KR_7001234567"), Region::Asia);
}

#[test]
fn test_match_id_without_delimiter_is_treated_as_shard() {
    assert_eq!(Region::from_match_id("euw1"), Region::Europe);
    assert_eq!(Region::from_match_id(""), Region::DEFAULT);
    // Only the first delimiter splits; the rest stays in the suffix.
    assert_eq!(Region::from_match_id("KR_123_456"), Region::Asia);
}

#[test]
fn test_shard_code_normalizes() {
    let shard = ShardCode::new("  EUW1 ");
    assert_eq!(shard.as_str(), "euw1");
    assert_eq!(shard.to_string(), "euw1");
    assert_eq!(shard.host(), "euw1.api.riotgames.com");
    assert_eq!(shard.region(), Region::Europe);
}

#[test]
fn test_region_hosts() {
    assert_eq!(Region::Americas.host(), "americas.api.riotgames.com");
    assert_eq!(Region::Sea.host(), "sea.api.riotgames.com");
}

#[test]
fn test_all_regions_enumerates_each_once() {
    let regions: Vec<Region> = Region::all().collect();
    assert_eq!(regions.len(), 4);
    assert!(regions.contains(&Region::Americas));
    assert!(regions.contains(&Region::Asia));
    assert!(regions.contains(&Region::Europe));
    assert!(regions.contains(&Region::Sea));
}
