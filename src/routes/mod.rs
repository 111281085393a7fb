pub mod debug;
pub mod itinerary;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/itinerary", post(itinerary::create_itinerary))
        .route("/preferences", get(itinerary::list_preferences))
        .route("/debug/health", get(debug::health_check))
        .with_state(state)
}
