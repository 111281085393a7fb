use crate::cache::{CacheStats, PlaceCache};
use crate::error::{AppError, Result};
use crate::models::Poi;
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;

/// Place search results stored as JSON strings with a per-key expiry.
pub struct RedisPlaceCache {
    connection: ConnectionManager,
    ttl_seconds: u64,
}

impl RedisPlaceCache {
    pub async fn new(redis_url: &str, ttl_seconds: u64) -> Result<Self> {
        let client = redis::Client::open(redis_url)
            .map_err(|e| AppError::Cache(format!("Invalid Redis URL: {}", e)))?;

        let connection = ConnectionManager::new(client)
            .await
            .map_err(|e| AppError::Cache(format!("Redis connection failed: {}", e)))?;

        Ok(RedisPlaceCache {
            connection,
            ttl_seconds,
        })
    }
}

fn decode_places(key: &str, payload: &str) -> Option<Vec<Poi>> {
    match serde_json::from_str(payload) {
        Ok(pois) => Some(pois),
        Err(e) => {
            tracing::warn!(key, "Discarding unreadable cached places: {}", e);
            None
        }
    }
}

#[async_trait]
impl PlaceCache for RedisPlaceCache {
    async fn get_cached_places(&self, key: &str) -> Option<Vec<Poi>> {
        let mut conn = self.connection.clone();

        let fetched: redis::RedisResult<Option<String>> = conn.get(key).await;
        let payload = fetched.unwrap_or_else(|e| {
            tracing::warn!(key, "Redis GET failed: {}", e);
            None
        });

        let pois = payload.and_then(|p| decode_places(key, &p));
        tracing::debug!(key, hit = pois.is_some(), "Redis place lookup");
        pois
    }

    async fn cache_places(&self, key: &str, pois: &[Poi]) {
        let payload = match serde_json::to_string(pois) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(key, "Could not encode places for Redis: {}", e);
                return;
            }
        };

        let mut conn = self.connection.clone();
        let stored: redis::RedisResult<()> = conn.set_ex(key, payload, self.ttl_seconds).await;

        if let Err(e) = stored {
            tracing::warn!(key, "Redis SETEX failed: {}", e);
        } else {
            tracing::debug!(
                key,
                count = pois.len(),
                ttl = self.ttl_seconds,
                "Stored places in Redis"
            );
        }
    }

    async fn get_stats(&self) -> CacheStats {
        let mut conn = self.connection.clone();
        let info: redis::RedisResult<String> =
            redis::cmd("INFO").arg("stats").query_async(&mut conn).await;

        info.map(|text| {
            CacheStats::new(
                info_counter(&text, "keyspace_hits"),
                info_counter(&text, "keyspace_misses"),
                true,
            )
        })
        .unwrap_or_else(|_| CacheStats::new(0, 0, false))
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.connection.clone();
        let pong: redis::RedisResult<String> = redis::cmd("PING").query_async(&mut conn).await;
        pong.is_ok()
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}

/// Read a `name:value` counter out of an `INFO` reply; 0 when absent.
fn info_counter(info: &str, name: &str) -> u64 {
    info.lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(field, _)| *field == name)
        .and_then(|(_, value)| value.trim().parse().ok())
        .unwrap_or(0)
}
