//! Time-bounded cache for collaborator results.

use lp_analyzer_domain::Result;
use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::trace;

/// Key/value cache whose entries expire after a fixed time-to-live.
pub struct TtlCache<K, V> {
    ttl: Duration,
    entries: RwLock<HashMap<K, (Instant, V)>>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
    V: Clone,
{
    /// Creates an empty cache.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the freshness window.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the cached value if it is still fresh.
    pub async fn get(&self, key: &K) -> Option<V> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|(stored_at, _)| stored_at.elapsed() < self.ttl)
            .map(|(_, value)| value.clone())
    }

    /// Stores a value, replacing any previous entry for `key`.
    pub async fn insert(&self, key: K, value: V) {
        self.entries
            .write()
            .await
            .insert(key, (Instant::now(), value));
    }

    /// Returns the fresh cached value or computes, stores and returns a new one.
    ///
    /// Errors from `fetch` are returned as-is and nothing is stored.
    pub async fn get_or_try_insert_with<F, Fut>(&self, key: K, fetch: F) -> Result<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V>>,
    {
        if let Some(value) = self.get(&key).await {
            trace!(key = ?key, "Cache hit");
            return Ok(value);
        }

        trace!(key = ?key, "Cache miss");
        let value = fetch().await?;
        self.insert(key, value.clone()).await;
        Ok(value)
    }

    /// Drops expired entries and returns how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, (stored_at, _)| stored_at.elapsed() < self.ttl);
        before - entries.len()
    }

    /// Number of stored entries, fresh or not.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lp_analyzer_domain::Error;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_get_after_insert() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.insert("weth".to_string(), 18u8).await;
        assert_eq!(cache.get(&"weth".to_string()).await, Some(18));
        assert_eq!(cache.get(&"usdc".to_string()).await, None);
    }

    #[tokio::test]
    async fn test_entries_expire() {
        let cache = TtlCache::new(Duration::from_millis(30));
        cache.insert(1u32, "a").await;
        tokio::time::sleep(Duration::from_millis(60)).await;

        assert_eq!(cache.get(&1).await, None);
        assert_eq!(cache.len().await, 1);
        assert_eq!(cache.purge_expired().await, 1);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_get_or_try_insert_with_fetches_once() {
        let cache = TtlCache::new(Duration::from_secs(60));
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let value = cache
                .get_or_try_insert_with("key", || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(42u64)
                })
                .await
                .unwrap();
            assert_eq!(value, 42);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_errors_are_not_cached() {
        let cache: TtlCache<&str, u64> = TtlCache::new(Duration::from_secs(60));

        let err = cache
            .get_or_try_insert_with("key", || async { Err(Error::upstream("rpc down")) })
            .await
            .unwrap_err();
        assert!(err.is_retryable());
        assert!(cache.is_empty().await);

        let value = cache
            .get_or_try_insert_with("key", || async { Ok(7) })
            .await
            .unwrap();
        assert_eq!(value, 7);
    }
}
