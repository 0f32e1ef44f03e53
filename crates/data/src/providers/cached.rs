//! Caching decorators for the chain provider and the price oracle.

use super::{ChainDataProvider, PriceOracle};
use crate::cache::TtlCache;
use async_trait::async_trait;
use lp_analyzer_domain::Result;
use lp_analyzer_domain::entities::TokenMetadata;
use lp_analyzer_domain::value_objects::PriceQuotes;
use primitive_types::U256;
use std::time::Duration;

/// Wraps a [`ChainDataProvider`] and remembers its answers for a while.
///
/// Token metadata is keyed by lowercase address; balances by
/// `(holder, token)`, both lowercased.
pub struct CachedChainProvider<C> {
    inner: C,
    metadata: TtlCache<String, TokenMetadata>,
    balances: TtlCache<(String, String), U256>,
}

impl<C: ChainDataProvider> CachedChainProvider<C> {
    pub fn new(inner: C, ttl: Duration) -> Self {
        Self {
            inner,
            metadata: TtlCache::new(ttl),
            balances: TtlCache::new(ttl),
        }
    }
}

fn cache_key(address: &str) -> String {
    address.trim().to_ascii_lowercase()
}

#[async_trait]
impl<C: ChainDataProvider> ChainDataProvider for CachedChainProvider<C> {
    async fn token_metadata(&self, token: &str) -> Result<TokenMetadata> {
        self.metadata
            .get_or_try_insert_with(cache_key(token), || self.inner.token_metadata(token))
            .await
    }

    async fn balance_of(&self, holder: &str, token: &str) -> Result<U256> {
        self.balances
            .get_or_try_insert_with((cache_key(holder), cache_key(token)), || {
                self.inner.balance_of(holder, token)
            })
            .await
    }
}

/// Wraps a [`PriceOracle`]; a request is keyed by its sorted identifier set.
pub struct CachedPriceOracle<P> {
    inner: P,
    quotes: TtlCache<Vec<String>, PriceQuotes>,
}

impl<P: PriceOracle> CachedPriceOracle<P> {
    pub fn new(inner: P, ttl: Duration) -> Self {
        Self {
            inner,
            quotes: TtlCache::new(ttl),
        }
    }
}

#[async_trait]
impl<P: PriceOracle> PriceOracle for CachedPriceOracle<P> {
    async fn prices(&self, ids: &[String]) -> Result<PriceQuotes> {
        let mut key = ids.to_vec();
        key.sort();
        key.dedup();
        self.quotes
            .get_or_try_insert_with(key, || self.inner.prices(ids))
            .await
    }
}
