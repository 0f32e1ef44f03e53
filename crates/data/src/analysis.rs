//! End-to-end pipelines: pool valuation and position inspection.

use crate::providers::{ChainDataProvider, PositionIndexer, PriceOracle};
use lp_analyzer_domain::entities::{PositionId, TokenMetadata};
use lp_analyzer_domain::metrics::{ImpermanentLoss, price_change_ratio, valuate_pool};
use lp_analyzer_domain::report::{AnalysisReport, assemble, assemble_position};
use lp_analyzer_domain::value_objects::Amount;
use lp_analyzer_domain::{Error, Result};
use rust_decimal::Decimal;
use tracing::{debug, info};

/// WETH/USDbC pool on Base.
pub const EXAMPLE_POOL: &str = "0xF46f64f157c2cD6136D4a052Ea938bD6fEb3e26C";
/// Wrapped Ether on Base.
pub const EXAMPLE_TOKEN_A: &str = "0x4200000000000000000000000000000000000006";
/// Bridged USDC (USDbC) on Base.
pub const EXAMPLE_TOKEN_B: &str = "0xd9aAEc86B65D86f6A7B5B1b0c42FFA531710b6CA";

/// A pool token and its identifier at the price oracle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRequest {
    pub address: String,
    pub price_id: String,
}

impl TokenRequest {
    pub fn new(address: impl Into<String>, price_id: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            price_id: price_id.into(),
        }
    }
}

/// Price move used for the impermanent loss figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IlScenario {
    /// Hypothetical ratio of new price to entry price.
    Ratio(Decimal),
    /// Entry price of token A in USD; the ratio is taken against the live quote.
    EntryPrice(Decimal),
}

impl Default for IlScenario {
    fn default() -> Self {
        Self::Ratio(Decimal::TWO)
    }
}

/// Inputs of one pool valuation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolAnalysisRequest {
    /// Address holding the pool reserves.
    pub pool_address: String,
    pub token_a: TokenRequest,
    pub token_b: TokenRequest,
    pub scenario: IlScenario,
}

impl PoolAnalysisRequest {
    /// The WETH/USDbC pool on Base, priced as ethereum/usd-coin, at a 2x move.
    pub fn example() -> Self {
        Self {
            pool_address: EXAMPLE_POOL.to_string(),
            token_a: TokenRequest::new(EXAMPLE_TOKEN_A, "ethereum"),
            token_b: TokenRequest::new(EXAMPLE_TOKEN_B, "usd-coin"),
            scenario: IlScenario::default(),
        }
    }
}

/// Runs the pool valuation flow against a chain provider and a price oracle.
pub struct PoolAnalyzer<C, P> {
    chain: C,
    oracle: P,
}

impl<C: ChainDataProvider, P: PriceOracle> PoolAnalyzer<C, P> {
    pub fn new(chain: C, oracle: P) -> Self {
        Self { chain, oracle }
    }

    /// Fetches metadata, balances and prices, then values the pool.
    ///
    /// Any failing step aborts the run; no partial report is produced.
    ///
    /// # Errors
    /// * `Error::InvalidInput` for malformed addresses, decimals or scenario.
    /// * `Error::MissingPrice` if the oracle does not quote either token.
    /// * `Error::Upstream` if a collaborator fails.
    pub async fn analyze(&self, request: &PoolAnalysisRequest) -> Result<AnalysisReport> {
        info!(pool = %request.pool_address, "Analyzing pool");

        let token_a = self.load_token(&request.token_a).await?;
        let token_b = self.load_token(&request.token_b).await?;

        let balance_a = self.balance(&request.pool_address, &token_a).await?;
        let balance_b = self.balance(&request.pool_address, &token_b).await?;

        let ids = [request.token_a.price_id.clone(), request.token_b.price_id.clone()];
        let quotes = self.oracle.prices(&ids).await?;
        let valuation = valuate_pool(balance_a, &ids[0], balance_b, &ids[1], &quotes)?;

        let ratio = match request.scenario {
            IlScenario::Ratio(ratio) => ratio,
            IlScenario::EntryPrice(entry) => price_change_ratio(entry, valuation.price_a.value)?,
        };
        let impermanent_loss = ImpermanentLoss::for_ratio(ratio, valuation.tvl)?;

        info!(
            pool = %request.pool_address,
            tvl = %valuation.tvl,
            il_pct = %impermanent_loss.percentage_loss,
            "Pool analyzed"
        );
        Ok(assemble(&token_a, &token_b, &valuation, &impermanent_loss))
    }

    async fn load_token(&self, token: &TokenRequest) -> Result<TokenMetadata> {
        let metadata = self.chain.token_metadata(&token.address).await?;
        Ok(metadata.with_price_id(token.price_id.clone()))
    }

    async fn balance(&self, holder: &str, token: &TokenMetadata) -> Result<Decimal> {
        let raw = self.chain.balance_of(holder, &token.address).await?;
        let balance = Amount::new(raw, token.decimals).to_decimal()?;
        debug!(token = %token.symbol, raw = %raw, balance = %balance, "Normalized balance");
        Ok(balance)
    }
}

/// Runs the position inspection flow.
pub struct PositionInspector<I> {
    indexer: I,
}

impl<I: PositionIndexer> PositionInspector<I> {
    pub fn new(indexer: I) -> Self {
        Self { indexer }
    }

    /// # Errors
    /// * `Error::NotFound` if the indexer has no such position.
    /// * `Error::Upstream` if the indexer fails.
    pub async fn inspect(&self, id: &PositionId) -> Result<AnalysisReport> {
        if id.0.is_empty() {
            return Err(Error::invalid_input("position id must not be empty"));
        }
        let position = self
            .indexer
            .position(id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("position {id}")))?;
        Ok(assemble_position(&position))
    }
}
