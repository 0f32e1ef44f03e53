//! Position lookups against a Uniswap v3 compatible subgraph.

use super::PositionIndexer;
use async_trait::async_trait;
use lp_analyzer_domain::entities::{PositionId, PositionRecord};
use lp_analyzer_domain::{Error, Result};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

const POSITION_QUERY: &str = r#"
query Position($id: ID!) {
  position(id: $id) {
    id
    owner
    liquidity
    depositedToken0
    depositedToken1
    withdrawnToken0
    withdrawnToken1
    collectedFeesToken0
    collectedFeesToken1
    token0 { symbol }
    token1 { symbol }
    pool { feeTier tick sqrtPrice }
    tickLower { tickIdx }
    tickUpper { tickIdx }
  }
}
"#;

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct PositionData {
    position: Option<RawPosition>,
}

#[derive(Debug, Deserialize)]
struct RawToken {
    symbol: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPool {
    fee_tier: String,
    tick: Option<String>,
    sqrt_price: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTick {
    tick_idx: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPosition {
    id: String,
    owner: String,
    liquidity: String,
    deposited_token0: String,
    deposited_token1: String,
    withdrawn_token0: String,
    withdrawn_token1: String,
    collected_fees_token0: String,
    collected_fees_token1: String,
    token0: RawToken,
    token1: RawToken,
    pool: RawPool,
    tick_lower: RawTick,
    tick_upper: RawTick,
}

impl RawPosition {
    // BigInt fields arrive as decimal strings.
    fn into_record(self) -> Result<PositionRecord> {
        Ok(PositionRecord {
            fee_tier: parse_int("pool.feeTier", &self.pool.fee_tier)?,
            current_tick: self
                .pool
                .tick
                .as_deref()
                .map(|tick| parse_int("pool.tick", tick))
                .transpose()?,
            tick_lower: parse_int("tickLower.tickIdx", &self.tick_lower.tick_idx)?,
            tick_upper: parse_int("tickUpper.tickIdx", &self.tick_upper.tick_idx)?,
            id: PositionId(self.id),
            owner: self.owner,
            token0_symbol: self.token0.symbol,
            token1_symbol: self.token1.symbol,
            liquidity: self.liquidity,
            deposited_token0: self.deposited_token0,
            deposited_token1: self.deposited_token1,
            withdrawn_token0: self.withdrawn_token0,
            withdrawn_token1: self.withdrawn_token1,
            collected_fees_token0: self.collected_fees_token0,
            collected_fees_token1: self.collected_fees_token1,
            sqrt_price: self.pool.sqrt_price,
        })
    }
}

fn parse_int<T: std::str::FromStr>(field: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::upstream(format!("indexer field {field} is not an integer: '{value}'")))
}

/// Turns a GraphQL response body into an optional position.
fn decode_position_response(body: GraphQlResponse<PositionData>) -> Result<Option<PositionRecord>> {
    if let Some(errors) = body.errors.filter(|errors| !errors.is_empty()) {
        let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
        return Err(Error::upstream(format!(
            "indexer query failed: {}",
            messages.join("; ")
        )));
    }

    let data = body
        .data
        .ok_or_else(|| Error::upstream("indexer response has neither data nor errors"))?;

    data.position.map(RawPosition::into_record).transpose()
}

/// Position indexer backed by a subgraph GraphQL endpoint.
#[derive(Debug, Clone)]
pub struct SubgraphIndexer {
    client: Client,
    url: String,
}

impl SubgraphIndexer {
    /// # Errors
    /// Returns `Error::Upstream` if the HTTP client cannot be built.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::upstream(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl PositionIndexer for SubgraphIndexer {
    async fn position(&self, id: &PositionId) -> Result<Option<PositionRecord>> {
        debug!(position = %id, url = %self.url, "Querying indexer");

        let response = self
            .client
            .post(&self.url)
            .json(&json!({
                "query": POSITION_QUERY,
                "variables": { "id": id.0 },
            }))
            .send()
            .await
            .map_err(|e| Error::upstream(format!("indexer request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::upstream(format!(
                "indexer returned HTTP {}",
                status.as_u16()
            )));
        }

        let body: GraphQlResponse<PositionData> = response
            .json()
            .await
            .map_err(|e| Error::upstream(format!("invalid indexer response: {e}")))?;

        decode_position_response(body)
    }
}
