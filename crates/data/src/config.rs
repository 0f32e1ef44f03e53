//! Endpoint and cache configuration for the I/O collaborators.

use lp_analyzer_domain::{Error, Result};
use std::time::Duration;

/// Base mainnet public RPC.
pub const DEFAULT_RPC_URL: &str = "https://mainnet.base.org";
/// CoinGecko public API.
pub const DEFAULT_PRICE_API_URL: &str = "https://api.coingecko.com/api/v3";
/// Uniswap v3 subgraph.
pub const DEFAULT_POSITION_INDEXER_URL: &str =
    "https://api.thegraph.com/subgraphs/name/uniswap/uniswap-v3";
/// Freshness window of cached chain and price reads.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 60;
/// Timeout applied to every HTTP request.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Static configuration of the three collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataConfig {
    /// JSON-RPC endpoint of the EVM chain.
    pub rpc_url: String,
    /// Base URL of the price API.
    pub price_api_url: String,
    /// GraphQL endpoint of the position indexer.
    pub position_indexer_url: String,
    /// Time-to-live of cached collaborator results.
    pub cache_ttl: Duration,
    /// Per-request HTTP timeout.
    pub http_timeout: Duration,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            price_api_url: DEFAULT_PRICE_API_URL.to_string(),
            position_indexer_url: DEFAULT_POSITION_INDEXER_URL.to_string(),
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

impl DataConfig {
    /// Reads the configuration from the process environment.
    ///
    /// Recognized variables: `RPC_URL`, `PRICE_API_URL`,
    /// `POSITION_INDEXER_URL`, `CACHE_TTL_SECS`, `HTTP_TIMEOUT_SECS`.
    /// Unset variables keep their defaults.
    ///
    /// # Errors
    /// Returns `Error::InvalidInput` if a numeric variable does not parse.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`DataConfig::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("RPC_URL") {
            config.rpc_url = url;
        }
        if let Some(url) = lookup("PRICE_API_URL") {
            config.price_api_url = url.trim_end_matches('/').to_string();
        }
        if let Some(url) = lookup("POSITION_INDEXER_URL") {
            config.position_indexer_url = url;
        }
        if let Some(secs) = lookup("CACHE_TTL_SECS") {
            config.cache_ttl = Duration::from_secs(parse_secs("CACHE_TTL_SECS", &secs)?);
        }
        if let Some(secs) = lookup("HTTP_TIMEOUT_SECS") {
            config.http_timeout = Duration::from_secs(parse_secs("HTTP_TIMEOUT_SECS", &secs)?);
        }

        Ok(config)
    }
}

fn parse_secs(key: &str, value: &str) -> Result<u64> {
    value.trim().parse().map_err(|_| {
        Error::invalid_input(format!(
            "{key} must be a number of seconds, got '{value}'"
        ))
    })
}
