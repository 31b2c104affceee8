use moka::future::Cache;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::models::Coordinate;

/// Geocoding result cache
///
/// Keyed by the literal address string as submitted. Bounded by entry count
/// with a time-to-live, safe to share across worker threads.
#[derive(Clone)]
pub struct GeocodeCache {
    entries: Cache<String, Coordinate>,
}

impl GeocodeCache {
    pub fn new(capacity: u64, ttl_secs: u64) -> Self {
        let entries = moka::future::CacheBuilder::new(capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { entries }
    }

    pub async fn get(&self, address: &str) -> Option<Coordinate> {
        let hit = self.entries.get(address).await;
        if hit.is_some() {
            tracing::trace!("Geocode cache hit: {}", address);
        }
        hit
    }

    pub async fn insert(&self, address: &str, coordinate: Coordinate) {
        self.entries.insert(address.to_string(), coordinate).await;
        tracing::trace!("Geocode cache set: {}", address);
    }

    pub async fn invalidate(&self, address: &str) {
        self.entries.invalidate(address).await;
    }

    /// Get cache statistics
    pub async fn stats(&self) -> CacheStats {
        self.entries.run_pending_tasks().await;
        CacheStats {
            entries: self.entries.entry_count(),
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub entries: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cache_set_get() {
        let cache = GeocodeCache::new(100, 60);
        let address = "1 Peachtree St, Atlanta";

        assert!(cache.get(address).await.is_none());

        cache.insert(address, Coordinate::new(33.75, -84.39)).await;
        assert_eq!(cache.get(address).await, Some(Coordinate::new(33.75, -84.39)));

        cache.invalidate(address).await;
        assert!(cache.get(address).await.is_none());
    }

    #[test]
    fn test_cache_keys_are_literal() {
        tokio_test::block_on(async {
            let cache = GeocodeCache::new(100, 60);
            cache.insert("Atlanta, GA", Coordinate::new(33.75, -84.39)).await;

            assert!(cache.get("atlanta, ga").await.is_none());
            assert!(cache.get("Atlanta, GA ").await.is_none());
            assert_eq!(cache.stats().await.entries, 1);
        });
    }
}
