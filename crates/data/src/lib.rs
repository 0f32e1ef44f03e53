//! I/O side of the LP analyzer.
//!
//! This crate connects the valuation core to the outside world:
//! - ERC-20 reads over JSON-RPC
//! - USD quotes from the CoinGecko API
//! - Position lookups against a subgraph
//! - TTL caching of collaborator results
//! - The pool valuation and position inspection pipelines

/// Valuation and inspection pipelines.
pub mod analysis;
/// Time-bounded cache.
pub mod cache;
/// Endpoint configuration.
pub mod config;
/// Collaborator traits and implementations.
pub mod providers;

pub use analysis::{IlScenario, PoolAnalysisRequest, PoolAnalyzer, PositionInspector, TokenRequest};
pub use cache::TtlCache;
pub use config::DataConfig;
pub use providers::{ChainDataProvider, PositionIndexer, PriceOracle};
