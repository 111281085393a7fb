pub mod distance_builder;
pub mod preference_filter;
pub mod time_slots;
pub mod tour_planner;

use crate::cache::{self, PlaceCache};
use crate::config::PlannerConfig;
use crate::constants::PLACES_QUERY_TEMPLATE;
use crate::error::{AppError, Result};
use crate::models::poi::exclude_city_and_duplicates;
use crate::models::{ItineraryRequest, ItineraryStop, Poi, PreferenceTable};
use crate::services::photo::PhotoResolver;
use crate::services::providers::{DistanceProvider, PlaceSearch};
use std::sync::Arc;

use distance_builder::DistanceMatrixBuilder;
use preference_filter::filter_and_rank;
use tour_planner::plan_tours;

/// Runs the itinerary pipeline for one request at a time; holds only
/// read-only collaborators, so a single instance serves all requests.
pub struct ItineraryPlanner {
    places: Arc<dyn PlaceSearch>,
    distances: Arc<dyn DistanceProvider>,
    photos: PhotoResolver,
    preferences: Arc<PreferenceTable>,
    cache: Option<Arc<dyn PlaceCache>>,
    config: PlannerConfig,
}

impl ItineraryPlanner {
    pub fn new(
        places: Arc<dyn PlaceSearch>,
        distances: Arc<dyn DistanceProvider>,
        photos: PhotoResolver,
        preferences: Arc<PreferenceTable>,
        config: PlannerConfig,
    ) -> Self {
        ItineraryPlanner {
            places,
            distances,
            photos,
            preferences,
            cache: None,
            config,
        }
    }

    pub fn with_cache(mut self, cache: Arc<dyn PlaceCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn preferences(&self) -> &PreferenceTable {
        &self.preferences
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Build a day-by-day itinerary. Stops are ordered by day, then by visit order.
    pub async fn generate(&self, request: &ItineraryRequest) -> Result<Vec<ItineraryStop>> {
        let window = request.validate()?;
        let city = request.city.trim();

        let spots = exclude_city_and_duplicates(self.search_places(city).await?, city);
        if spots.is_empty() {
            return Err(AppError::NoSpotsFound(format!(
                "No spots found for {}",
                city
            )));
        }
        tracing::debug!(
            count = spots.len(),
            "Fetched tourist spots: {}",
            spots.iter().map(|s| s.name.as_str()).collect::<Vec<_>>().join(", ")
        );

        let ranked = filter_and_rank(spots, &request.preferences, &self.preferences);
        if ranked.len() < request.days as usize {
            return Err(AppError::InsufficientSpots(format!(
                "Not enough spots to generate itinerary: {} spots for {} days",
                ranked.len(),
                request.days
            )));
        }

        let ids: Vec<String> = ranked.iter().map(|poi| poi.id.clone()).collect();
        let builder =
            DistanceMatrixBuilder::new(self.distances.as_ref(), self.config.distance_concurrency);
        let table = builder.build(&ids).await?;

        let tours = plan_tours(&ranked, &table, request.days)?;

        let mut itinerary = Vec::with_capacity(ranked.len());
        for tour in &tours {
            let slots = time_slots::allocate(&window, tour.stops.len())?;
            for (poi, slot) in tour.stops.iter().zip(slots) {
                let photo_url = self.photos.resolve(poi.photo_reference.as_deref());
                itinerary.push(ItineraryStop::new(poi, tour.day, slot, photo_url));
            }
        }

        tracing::info!(
            city,
            days = tours.len(),
            stops = itinerary.len(),
            unscheduled = ranked.len() - itinerary.len(),
            "Generated itinerary for {}: {} stops over {} days",
            city,
            itinerary.len(),
            tours.len()
        );

        Ok(itinerary)
    }

    async fn search_places(&self, city: &str) -> Result<Vec<Poi>> {
        let query = PLACES_QUERY_TEMPLATE.replace("{}", city);
        let cache_key = cache::place_search_cache_key(&query);

        if let Some(ref cache) = self.cache {
            if let Some(pois) = cache.get_cached_places(&cache_key).await {
                tracing::debug!("Cache hit for place search: {} results", pois.len());
                return Ok(pois);
            }
        }

        let pois = self.places.search(&query).await?;

        if let Some(ref cache) = self.cache {
            if !pois.is_empty() {
                cache.cache_places(&cache_key, &pois).await;
            }
        }

        Ok(pois)
    }
}
