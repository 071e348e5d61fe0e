//! Ranking endpoints

use serde::Serialize;

use crate::api::models::{Ranking, RankingPeriod, RankingType};
use crate::error::Result;
use crate::http::{ApiClient, ApiRequest};

/// Entries returned when no limit is given; also the server's cap
pub const DEFAULT_LIMIT: u32 = 100;

#[derive(Debug, Serialize)]
struct RebuildRequest {
    #[serde(rename = "type")]
    kind: RankingType,
    period: RankingPeriod,
}

pub async fn get(
    client: &ApiClient,
    kind: RankingType,
    period: RankingPeriod,
    limit: Option<u32>,
) -> Result<Ranking> {
    client
        .call(
            ApiRequest::get("/ranking/list")
                .query("type", kind)
                .query("period", period)
                .query("limit", limit.unwrap_or(DEFAULT_LIMIT)),
        )
        .await
}

/// Ask the backend to recompute rankings (admin only, enforced server side)
pub async fn rebuild(client: &ApiClient, kind: RankingType, period: RankingPeriod) -> Result<String> {
    let request = ApiRequest::post("/ranking/rebuild").json(&RebuildRequest { kind, period })?;
    client.call_message(request).await
}
