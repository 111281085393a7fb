//! Stable application-wide constants.
//!
//! Values here are upstream API facts and default fallbacks for env-var-based
//! configuration. For per-deployment tuning see
//! [`PlannerConfig`](crate::config::PlannerConfig).

// --- Server defaults (used when HOST / PORT env vars are absent) ---

/// Default bind address for the HTTP server.
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default port for the HTTP server.
pub const DEFAULT_PORT: &str = "5000";

// --- Google Maps Platform ---

/// Base URL shared by the Places, Distance Matrix and Place Photo endpoints.
pub const GOOGLE_MAPS_BASE_URL: &str = "https://maps.googleapis.com/maps/api";
/// Free-text query sent to Places Text Search; `{}` is replaced by the city.
pub const PLACES_QUERY_TEMPLATE: &str = "top tourist spots in {}";
/// Prefix the Distance Matrix API expects in front of a place id.
pub const PLACE_ID_PREFIX: &str = "place_id:";
/// Element ceiling per Distance Matrix request (origins x destinations).
/// Overridden by `DISTANCE_MAX_ELEMENTS`.
pub const DEFAULT_DISTANCE_MAX_ELEMENTS: usize = 100;
/// Max width (pixels) requested from the Place Photo endpoint.
pub const DEFAULT_PHOTO_MAX_WIDTH: u32 = 400;

// --- Upstream call hardening ---

/// Concurrent Distance Matrix requests per itinerary.
pub const DEFAULT_DISTANCE_CONCURRENCY: usize = 4;
/// Per-call HTTP timeout for Google requests.
pub const DEFAULT_UPSTREAM_TIMEOUT_SECONDS: u64 = 10;
/// Retries after the first attempt (2 = 3 total attempts).
pub const DEFAULT_UPSTREAM_MAX_RETRIES: usize = 2;
/// Largest accepted `UPSTREAM_MAX_RETRIES`.
pub const MAX_UPSTREAM_RETRIES: usize = 10;
/// Base backoff before the first retry; doubles on every attempt.
pub const UPSTREAM_BACKOFF_BASE_MS: u64 = 1000;
/// Wall-clock budget for a whole itinerary request.
pub const DEFAULT_ITINERARY_TIMEOUT_SECONDS: u64 = 60;

// --- Place search cache ---

/// Default city search cache TTL: 6 hours. Overridden by `PLACES_CACHE_TTL`.
pub const DEFAULT_PLACES_CACHE_TTL_SECONDS: u64 = 21_600;
/// Maximum entries for the in-memory place search cache.
pub const DEFAULT_MEMORY_CACHE_MAX_ENTRIES: u64 = 1_000;
