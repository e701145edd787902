//! Public operations on [`RiftClient`].
//!
//! Each operation validates its inputs, resolves the routing region, and
//! submits a single-attempt closure to the scheduler. Rate limiting,
//! concurrency bounds, and retries all happen behind the submission; the
//! caller only ever sees the final outcome.

use crate::client::RiftClient;
use crate::models::{
    AccountDto, ActiveShardDto, MatchDto, MatchIdsFilter, SummonerDto, TimelineDto,
};
use crate::routes;
use riftgate_core::{Region, ShardCode};
use riftgate_error::{ApiError, ApiErrorKind, RiftgateResult};
use tracing::instrument;

fn require(value: &str, what: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::new(ApiErrorKind::Validation(format!(
            "{} must not be empty",
            what
        ))));
    }
    Ok(())
}

impl RiftClient {
    /// Resolve an account by its riot id.
    #[instrument(skip(self))]
    pub async fn account_by_riot_id(
        &self,
        region: Region,
        game_name: &str,
        tag_line: &str,
    ) -> RiftgateResult<AccountDto> {
        require(game_name, "game name")?;
        require(tag_line, "tag line")?;
        let url = routes::account_by_riot_id(region, game_name, tag_line)?;
        Ok(self
            .scheduler
            .schedule(region, || self.execute::<AccountDto>(url.clone()))
            .await?)
    }

    /// List match ids for a player, most recent first.
    ///
    /// The region must be supplied by the caller: a puuid carries no routing
    /// information of its own.
    #[instrument(skip(self, filter))]
    pub async fn match_ids_by_puuid(
        &self,
        region: Region,
        puuid: &str,
        filter: MatchIdsFilter,
    ) -> RiftgateResult<Vec<String>> {
        require(puuid, "puuid")?;
        let url = routes::match_ids_by_puuid(region, puuid, &filter)?;
        Ok(self
            .scheduler
            .schedule(region, || self.execute::<Vec<String>>(url.clone()))
            .await?)
    }

    /// Fetch a completed match by its shard-prefixed identifier.
    ///
    /// The region is derived from the identifier's shard prefix.
    #[instrument(skip(self))]
    pub async fn match_by_id(&self, match_id: &str) -> RiftgateResult<MatchDto> {
        require(match_id, "match id")?;
        let region = Region::from_match_id(match_id);
        let url = routes::match_by_id(region, match_id)?;
        Ok(self
            .scheduler
            .schedule(region, || self.execute::<MatchDto>(url.clone()))
            .await?)
    }

    /// Fetch the event timeline of a completed match.
    ///
    /// Timelines are pruned upstream after a retention window, so an absent
    /// timeline is a legitimate `None` rather than an error.
    #[instrument(skip(self))]
    pub async fn match_timeline(&self, match_id: &str) -> RiftgateResult<Option<TimelineDto>> {
        require(match_id, "match id")?;
        let region = Region::from_match_id(match_id);
        let url = routes::match_timeline(region, match_id)?;
        Ok(self
            .scheduler
            .schedule(region, || self.execute_optional::<TimelineDto>(url.clone()))
            .await?)
    }

    /// Resolve the shard a player is currently active on for a game.
    #[instrument(skip(self))]
    pub async fn platform_for_player(
        &self,
        region: Region,
        game: &str,
        puuid: &str,
    ) -> RiftgateResult<ActiveShardDto> {
        require(game, "game")?;
        require(puuid, "puuid")?;
        let url = routes::active_shard(region, game, puuid)?;
        Ok(self
            .scheduler
            .schedule(region, || self.execute::<ActiveShardDto>(url.clone()))
            .await?)
    }

    /// Fetch a summoner profile from a shard's platform host.
    ///
    /// The request is admitted under the shard's routing region, the same
    /// quota the upstream enforces for platform endpoints.
    #[instrument(skip(self))]
    pub async fn summoner_by_puuid(
        &self,
        shard: &ShardCode,
        puuid: &str,
    ) -> RiftgateResult<SummonerDto> {
        require(puuid, "puuid")?;
        let url = routes::summoner_by_puuid(shard, puuid)?;
        Ok(self
            .scheduler
            .schedule(shard.region(), || self.execute::<SummonerDto>(url.clone()))
            .await?)
    }
}
