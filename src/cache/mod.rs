mod memory;
mod redis;

pub use self::memory::MemoryPlaceCache;
pub use self::redis::RedisPlaceCache;

use crate::models::Poi;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Cache of place search results keyed by normalized query.
/// Backend faults are logged and behave like misses.
#[async_trait]
pub trait PlaceCache: Send + Sync {
    async fn get_cached_places(&self, key: &str) -> Option<Vec<Poi>>;
    async fn cache_places(&self, key: &str, pois: &[Poi]);
    async fn get_stats(&self) -> CacheStats;
    async fn health_check(&self) -> bool;
    fn backend_name(&self) -> &'static str;
}

/// Cache key for a place search. Case and whitespace runs are ignored.
pub fn place_search_cache_key(query: &str) -> String {
    let normalized = query
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ");

    let mut hasher = DefaultHasher::new();
    normalized.hash(&mut hasher);
    format!("places:search:{:x}", hasher.finish())
}

/// Cache statistics for monitoring
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
    pub connected: bool,
}

impl CacheStats {
    pub fn new(hits: u64, misses: u64, connected: bool) -> Self {
        let hit_rate = if hits + misses > 0 {
            (hits as f64 / (hits + misses) as f64) * 100.0
        } else {
            0.0
        };

        CacheStats {
            hits,
            misses,
            hit_rate,
            connected,
        }
    }
}
