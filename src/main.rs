use axum::Router;
use daytrip::cache::{MemoryPlaceCache, PlaceCache, RedisPlaceCache};
use daytrip::config::Config;
use daytrip::constants::{DEFAULT_MEMORY_CACHE_MAX_ENTRIES, GOOGLE_MAPS_BASE_URL};
use daytrip::models::PreferenceTable;
use daytrip::services::google_maps::GoogleMapsClient;
use daytrip::services::itinerary::ItineraryPlanner;
use daytrip::services::photo::PhotoResolver;
use daytrip::AppState;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Redis when configured and reachable, otherwise process memory.
async fn init_place_cache(config: &Config) -> Arc<dyn PlaceCache> {
    let memory = || {
        Arc::new(MemoryPlaceCache::new(
            config.places_cache_ttl,
            DEFAULT_MEMORY_CACHE_MAX_ENTRIES,
        )) as Arc<dyn PlaceCache>
    };

    let Some(ref redis_url) = config.redis_url else {
        tracing::info!("REDIS_URL not set, caching place searches in memory");
        return memory();
    };

    match RedisPlaceCache::new(redis_url, config.places_cache_ttl).await {
        Ok(redis_cache) => {
            tracing::info!("Caching place searches in Redis");
            Arc::new(redis_cache)
        }
        Err(e) => {
            tracing::warn!("{}; caching place searches in memory instead", e);
            memory()
        }
    }
}

fn load_preferences(config: &Config) -> Result<PreferenceTable, String> {
    match config.preference_table_path {
        Some(ref path) => {
            let table = PreferenceTable::from_json_file(path)?;
            tracing::info!("Loaded {} preference labels from {}", table.len(), path);
            Ok(table)
        }
        None => Ok(PreferenceTable::default()),
    }
}

fn build_planner(config: &Config, preferences: PreferenceTable) -> ItineraryPlanner {
    let base_url = config
        .google_maps_base_url
        .clone()
        .unwrap_or_else(|| GOOGLE_MAPS_BASE_URL.to_string());

    // One client answers both place search and distance queries
    let google = Arc::new(GoogleMapsClient::with_config(
        config.google_api_key.clone(),
        base_url.clone(),
        &config.planner,
    ));
    let photos = PhotoResolver::with_config(
        config.google_api_key.clone(),
        base_url,
        config.planner.photo_max_width,
    );

    ItineraryPlanner::new(
        google.clone(),
        google,
        photos,
        Arc::new(preferences),
        config.planner.clone(),
    )
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "daytrip=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| format!("Failed to load configuration: {}", e))?;
    tracing::info!(
        max_retries = config.planner.upstream_max_retries,
        distance_max_elements = config.planner.distance_max_elements,
        "Starting daytrip itinerary server"
    );

    let preferences = load_preferences(&config)?;
    let cache = init_place_cache(&config).await;
    let planner = build_planner(&config, preferences).with_cache(cache.clone());

    let state = Arc::new(AppState {
        planner,
        cache: Some(cache),
    });

    let app = Router::new()
        .nest("/api", daytrip::routes::create_router(state))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    let addr = config.server_address();
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
