use crate::constants::*;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub google_api_key: String,
    /// Override for the Google Maps API base URL (proxies, local mocks)
    pub google_maps_base_url: Option<String>,
    pub redis_url: Option<String>,
    pub places_cache_ttl: u64,
    /// JSON file mapping preference label -> category tags.
    /// The built-in table is used when unset.
    pub preference_table_path: Option<String>,
    pub planner: PlannerConfig,
}

#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Element ceiling per distance request (origins x destinations)
    pub distance_max_elements: usize,

    /// Distance requests in flight at once for a single itinerary
    pub distance_concurrency: usize,

    /// Per-call timeout for upstream HTTP requests
    pub upstream_timeout_secs: u64,

    /// Retries after the first attempt on retryable upstream failures
    pub upstream_max_retries: usize,

    /// Budget for the whole itinerary pipeline
    pub itinerary_timeout_secs: u64,

    /// Max width passed to the photo endpoint
    pub photo_max_width: u32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            distance_max_elements: DEFAULT_DISTANCE_MAX_ELEMENTS,
            distance_concurrency: DEFAULT_DISTANCE_CONCURRENCY,
            upstream_timeout_secs: DEFAULT_UPSTREAM_TIMEOUT_SECONDS,
            upstream_max_retries: DEFAULT_UPSTREAM_MAX_RETRIES,
            itinerary_timeout_secs: DEFAULT_ITINERARY_TIMEOUT_SECONDS,
            photo_max_width: DEFAULT_PHOTO_MAX_WIDTH,
        }
    }
}

impl PlannerConfig {
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();

        let config = Self {
            distance_max_elements: env::var("DISTANCE_MAX_ELEMENTS")
                .unwrap_or_else(|_| defaults.distance_max_elements.to_string())
                .parse()
                .map_err(|_| "Invalid DISTANCE_MAX_ELEMENTS")?,

            distance_concurrency: env::var("DISTANCE_CONCURRENCY")
                .unwrap_or_else(|_| defaults.distance_concurrency.to_string())
                .parse()
                .map_err(|_| "Invalid DISTANCE_CONCURRENCY")?,

            upstream_timeout_secs: env::var("UPSTREAM_TIMEOUT_SECS")
                .unwrap_or_else(|_| defaults.upstream_timeout_secs.to_string())
                .parse()
                .map_err(|_| "Invalid UPSTREAM_TIMEOUT_SECS")?,

            upstream_max_retries: env::var("UPSTREAM_MAX_RETRIES")
                .unwrap_or_else(|_| defaults.upstream_max_retries.to_string())
                .parse()
                .map_err(|_| "Invalid UPSTREAM_MAX_RETRIES")?,

            itinerary_timeout_secs: env::var("ITINERARY_TIMEOUT_SECS")
                .unwrap_or_else(|_| defaults.itinerary_timeout_secs.to_string())
                .parse()
                .map_err(|_| "Invalid ITINERARY_TIMEOUT_SECS")?,

            photo_max_width: env::var("PHOTO_MAX_WIDTH")
                .unwrap_or_else(|_| defaults.photo_max_width.to_string())
                .parse()
                .map_err(|_| "Invalid PHOTO_MAX_WIDTH")?,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.distance_max_elements == 0 {
            return Err("DISTANCE_MAX_ELEMENTS must be at least 1".to_string());
        }
        if self.distance_concurrency == 0 {
            return Err("DISTANCE_CONCURRENCY must be at least 1".to_string());
        }
        if self.upstream_max_retries > MAX_UPSTREAM_RETRIES {
            return Err(format!(
                "UPSTREAM_MAX_RETRIES must be at most {}",
                MAX_UPSTREAM_RETRIES
            ));
        }
        if self.upstream_timeout_secs == 0 || self.itinerary_timeout_secs == 0 {
            return Err("Timeouts must be at least 1 second".to_string());
        }
        Ok(())
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }

    pub fn itinerary_timeout(&self) -> Duration {
        Duration::from_secs(self.itinerary_timeout_secs)
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenv::dotenv().ok();

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| "Invalid PORT")?,
            google_api_key: env::var("GOOGLE_API_KEY")
                .map_err(|_| "GOOGLE_API_KEY must be set")?,
            google_maps_base_url: env::var("GOOGLE_MAPS_BASE_URL").ok(),
            redis_url: env::var("REDIS_URL").ok(),
            places_cache_ttl: env::var("PLACES_CACHE_TTL")
                .unwrap_or_else(|_| DEFAULT_PLACES_CACHE_TTL_SECONDS.to_string())
                .parse()
                .map_err(|_| "Invalid PLACES_CACHE_TTL")?,
            preference_table_path: env::var("PREFERENCE_TABLE_PATH").ok(),
            planner: PlannerConfig::from_env()?,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
