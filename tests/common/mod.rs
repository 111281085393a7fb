use async_trait::async_trait;
use daytrip::cache::MemoryPlaceCache;
use daytrip::config::PlannerConfig;
use daytrip::models::{DistanceElement, DistanceRow, ItineraryRequest, Poi, PreferenceTable};
use daytrip::services::itinerary::ItineraryPlanner;
use daytrip::services::photo::PhotoResolver;
use daytrip::services::providers::{DistanceProvider, PlaceSearch};
use daytrip::{AppError, AppState, Result};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Place search returning a fixed list.
#[allow(dead_code)]
pub struct FakePlaces {
    pub pois: Vec<Poi>,
    pub fail: bool,
    pub delay: Option<Duration>,
    pub calls: AtomicUsize,
}

#[allow(dead_code)]
impl FakePlaces {
    pub fn new(pois: Vec<Poi>) -> Self {
        FakePlaces {
            pois,
            fail: false,
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        FakePlaces {
            fail: true,
            ..Self::new(vec![])
        }
    }

    pub fn slow(pois: Vec<Poi>, delay: Duration) -> Self {
        FakePlaces {
            delay: Some(delay),
            ..Self::new(pois)
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PlaceSearch for FakePlaces {
    async fn search(&self, _query: &str) -> Result<Vec<Poi>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(AppError::Upstream("Error fetching places".to_string()));
        }
        Ok(self.pois.clone())
    }
}

/// Distances along a line: d(a, b) = |pos(a) - pos(b)| * 100m.
/// Ids missing from `line` are unavailable from and to everything.
#[allow(dead_code)]
pub struct LineDistances {
    pub line: Vec<String>,
    pub max_elements: usize,
    pub fail_all: bool,
    pub calls: AtomicUsize,
    pub largest_request: AtomicUsize,
}

#[allow(dead_code)]
impl LineDistances {
    pub fn new(line: &[&str]) -> Self {
        LineDistances {
            line: line.iter().map(|s| s.to_string()).collect(),
            max_elements: 100,
            fail_all: false,
            calls: AtomicUsize::new(0),
            largest_request: AtomicUsize::new(0),
        }
    }

    pub fn with_max_elements(mut self, max_elements: usize) -> Self {
        self.max_elements = max_elements;
        self
    }

    pub fn failing() -> Self {
        LineDistances {
            fail_all: true,
            ..Self::new(&[])
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.line.iter().position(|l| l == id)
    }
}

#[async_trait]
impl DistanceProvider for LineDistances {
    fn max_elements(&self) -> usize {
        self.max_elements
    }

    async fn distance_rows(
        &self,
        origins: &[String],
        destinations: &[String],
    ) -> Result<Vec<DistanceRow>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.largest_request
            .fetch_max(origins.len() * destinations.len(), Ordering::SeqCst);

        if self.fail_all {
            return Err(AppError::Upstream("Distance matrix status REQUEST_DENIED".to_string()));
        }

        Ok(origins
            .iter()
            .map(|o| {
                DistanceRow::new(
                    destinations
                        .iter()
                        .map(|d| match (self.position(o), self.position(d)) {
                            (Some(a), Some(b)) => DistanceElement::ok(a.abs_diff(b) as f64 * 100.0),
                            _ => DistanceElement::unavailable(),
                        })
                        .collect(),
                )
            })
            .collect())
    }
}

/// `n` spots rated 9.0, 8.0, ... with ids p0..p{n-1}, each tagged museum.
#[allow(dead_code)]
pub fn rated_spots(n: usize) -> Vec<Poi> {
    (0..n)
        .map(|i| {
            Poi::new(format!("p{}", i), format!("Spot {}", i), 9.0 - i as f64)
                .with_address(format!("{} Main St", i))
                .with_categories(["museum", "point_of_interest"])
        })
        .collect()
}

#[allow(dead_code)]
pub fn request(days: u32, start: &str, end: &str) -> ItineraryRequest {
    ItineraryRequest {
        city: "Lisbon".to_string(),
        days,
        start_time: start.to_string(),
        end_time: end.to_string(),
        preferences: vec![],
    }
}

#[allow(dead_code)]
pub fn test_planner_config() -> PlannerConfig {
    PlannerConfig {
        itinerary_timeout_secs: 5,
        ..PlannerConfig::default()
    }
}

#[allow(dead_code)]
pub fn build_planner(
    places: Arc<FakePlaces>,
    distances: Arc<LineDistances>,
    config: PlannerConfig,
) -> ItineraryPlanner {
    ItineraryPlanner::new(
        places,
        distances,
        PhotoResolver::new("test_key".to_string()),
        Arc::new(PreferenceTable::default()),
        config,
    )
}

#[allow(dead_code)]
pub fn build_state(
    places: Arc<FakePlaces>,
    distances: Arc<LineDistances>,
    config: PlannerConfig,
) -> Arc<AppState> {
    let cache = Arc::new(MemoryPlaceCache::new(3600, 100));
    let planner = build_planner(places, distances, config).with_cache(cache.clone());

    Arc::new(AppState {
        planner,
        cache: Some(cache),
    })
}
