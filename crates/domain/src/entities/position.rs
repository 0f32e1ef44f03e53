use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a liquidity position NFT.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PositionId(pub String);

impl fmt::Display for PositionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PositionId {
    fn from(id: &str) -> Self {
        Self(id.trim().to_string())
    }
}

/// Liquidity position as reported by the indexer.
///
/// Amount fields keep the indexer's own string encoding; they are shown, not
/// computed on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionRecord {
    pub id: PositionId,
    pub owner: String,
    pub token0_symbol: String,
    pub token1_symbol: String,

    pub liquidity: String,

    pub deposited_token0: String,
    pub deposited_token1: String,

    pub withdrawn_token0: String,
    pub withdrawn_token1: String,

    pub collected_fees_token0: String,
    pub collected_fees_token1: String,

    /// Hundredths of a basis point, e.g. 3000 for 0.3%.
    pub fee_tier: u32,
    pub current_tick: Option<i32>,
    pub sqrt_price: String,
    pub tick_lower: i32,
    pub tick_upper: i32,
}
