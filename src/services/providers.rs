//! Collaborator seams consumed by the itinerary pipeline.
//!
//! [`GoogleMapsClient`](crate::services::google_maps::GoogleMapsClient)
//! implements both traits; tests substitute in-memory fakes.

use crate::error::Result;
use crate::models::{DistanceRow, Poi};
use async_trait::async_trait;

#[async_trait]
pub trait PlaceSearch: Send + Sync {
    /// Free-text place search. An empty result is `Ok(vec![])`, not an error.
    async fn search(&self, query: &str) -> Result<Vec<Poi>>;
}

#[async_trait]
pub trait DistanceProvider: Send + Sync {
    /// Largest `origins.len() * destinations.len()` a single request may carry.
    fn max_elements(&self) -> usize;

    /// One row per origin, each with one element per destination, in request order.
    async fn distance_rows(
        &self,
        origins: &[String],
        destinations: &[String],
    ) -> Result<Vec<DistanceRow>>;
}
