//! Collaborators that fetch chain data, prices and indexed positions.
//!
//! The valuation core never calls these directly; the pipelines in
//! [`crate::analysis`] fetch through them and hand plain values to the core.

/// TTL-cached wrappers around any collaborator.
pub mod cached;
/// CoinGecko price oracle.
pub mod coingecko;
/// ERC-20 reads over JSON-RPC.
pub mod erc20;
/// Subgraph position indexer.
pub mod subgraph;

pub use cached::{CachedChainProvider, CachedPriceOracle};
pub use coingecko::CoinGeckoOracle;
pub use erc20::{Erc20ChainProvider, parse_address, to_checksum};
pub use subgraph::SubgraphIndexer;

use async_trait::async_trait;
use lp_analyzer_domain::Result;
use lp_analyzer_domain::entities::{PositionId, PositionRecord, TokenMetadata};
use lp_analyzer_domain::value_objects::PriceQuotes;
use primitive_types::U256;
use std::sync::Arc;

/// Reads token metadata and balances from the chain.
#[async_trait]
pub trait ChainDataProvider: Send + Sync {
    /// Symbol and decimals of the token at `token`.
    async fn token_metadata(&self, token: &str) -> Result<TokenMetadata>;

    /// Balance of `holder` in `token`, in the token's smallest unit.
    async fn balance_of(&self, holder: &str, token: &str) -> Result<U256>;
}

/// Quotes USD prices for asset identifiers.
#[async_trait]
pub trait PriceOracle: Send + Sync {
    /// Prices for `ids`. Identifiers the source cannot price are omitted.
    async fn prices(&self, ids: &[String]) -> Result<PriceQuotes>;
}

/// Looks up liquidity positions by identifier.
#[async_trait]
pub trait PositionIndexer: Send + Sync {
    /// The position, or `None` if the indexer has no record of it.
    async fn position(&self, id: &PositionId) -> Result<Option<PositionRecord>>;
}

#[async_trait]
impl<T: ChainDataProvider + ?Sized> ChainDataProvider for Arc<T> {
    async fn token_metadata(&self, token: &str) -> Result<TokenMetadata> {
        (**self).token_metadata(token).await
    }

    async fn balance_of(&self, holder: &str, token: &str) -> Result<U256> {
        (**self).balance_of(holder, token).await
    }
}

#[async_trait]
impl<T: PriceOracle + ?Sized> PriceOracle for Arc<T> {
    async fn prices(&self, ids: &[String]) -> Result<PriceQuotes> {
        (**self).prices(ids).await
    }
}

#[async_trait]
impl<T: PositionIndexer + ?Sized> PositionIndexer for Arc<T> {
    async fn position(&self, id: &PositionId) -> Result<Option<PositionRecord>> {
        (**self).position(id).await
    }
}
