use crate::cache::{CacheStats, PlaceCache};
use crate::models::Poi;
use async_trait::async_trait;
use moka::future::Cache;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Process-local place cache with TTL and bounded capacity.
pub struct MemoryPlaceCache {
    places: Cache<String, Arc<Vec<Poi>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl MemoryPlaceCache {
    pub fn new(ttl_seconds: u64, max_capacity: u64) -> Self {
        let places = Cache::builder()
            .time_to_live(Duration::from_secs(ttl_seconds))
            .max_capacity(max_capacity)
            .build();

        MemoryPlaceCache {
            places,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }
}

#[async_trait]
impl PlaceCache for MemoryPlaceCache {
    async fn get_cached_places(&self, key: &str) -> Option<Vec<Poi>> {
        match self.places.get(key).await {
            Some(pois) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                tracing::debug!("Memory cache hit for places: {}", key);
                Some((*pois).clone())
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                tracing::debug!("Memory cache miss for places: {}", key);
                None
            }
        }
    }

    async fn cache_places(&self, key: &str, pois: &[Poi]) {
        self.places
            .insert(key.to_string(), Arc::new(pois.to_vec()))
            .await;
        tracing::debug!("Memory cached {} places: {}", pois.len(), key);
    }

    async fn get_stats(&self) -> CacheStats {
        CacheStats::new(
            self.hits.load(Ordering::Relaxed),
            self.misses.load(Ordering::Relaxed),
            true,
        )
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
