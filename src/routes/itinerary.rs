use crate::error::{AppError, Result};
use crate::models::{ItineraryRequest, ItineraryStop};
use crate::AppState;
use axum::{extract::State, Json};
use std::sync::Arc;

/// POST /itinerary
/// Generate a multi-day sightseeing itinerary for a city
pub async fn create_itinerary(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ItineraryRequest>,
) -> Result<Json<Vec<ItineraryStop>>> {
    tracing::info!(
        city = %request.city,
        days = request.days,
        start = %request.start_time,
        end = %request.end_time,
        preferences = request.preferences.len(),
        "Itinerary request: {}, {} days, {}-{}, preferences [{}]",
        request.city,
        request.days,
        request.start_time,
        request.end_time,
        request.preferences.join(", ")
    );

    let budget = state.planner.config().itinerary_timeout();
    let stops = tokio::time::timeout(budget, state.planner.generate(&request))
        .await
        .map_err(|_| {
            AppError::Timeout(format!(
                "Itinerary generation exceeded {}s",
                budget.as_secs()
            ))
        })??;

    Ok(Json(stops))
}

/// GET /preferences
/// Known preference labels, sorted
pub async fn list_preferences(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(
        state
            .planner
            .preferences()
            .labels()
            .into_iter()
            .map(str::to_string)
            .collect(),
    )
}
