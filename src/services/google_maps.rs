use crate::config::PlannerConfig;
use crate::constants::*;
use crate::error::{AppError, Result};
use crate::models::{DistanceElement, DistanceRow, Poi};
use crate::services::providers::{DistanceProvider, PlaceSearch};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

/// Google statuses worth another attempt; everything else non-OK is final.
const RETRYABLE_API_STATUSES: &[&str] = &["OVER_QUERY_LIMIT", "UNKNOWN_ERROR"];

/// Client for the Places Text Search and Distance Matrix web services.
#[derive(Clone)]
pub struct GoogleMapsClient {
    client: Client,
    api_key: String,
    base_url: String,
    max_elements: usize,
    timeout: Duration,
    max_retries: usize,
    backoff_base: Duration,
}

impl GoogleMapsClient {
    pub fn new(api_key: String) -> Self {
        Self::with_config(
            api_key,
            GOOGLE_MAPS_BASE_URL.to_string(),
            &PlannerConfig::default(),
        )
    }

    pub fn with_config(api_key: String, base_url: String, config: &PlannerConfig) -> Self {
        GoogleMapsClient {
            client: Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            max_elements: config.distance_max_elements,
            timeout: config.upstream_timeout(),
            max_retries: config.upstream_max_retries,
            backoff_base: Duration::from_millis(UPSTREAM_BACKOFF_BASE_MS),
        }
    }

    /// Override the first retry delay (doubles on each further retry).
    pub fn with_backoff_base(mut self, backoff_base: Duration) -> Self {
        self.backoff_base = backoff_base;
        self
    }

    fn backoff(&self, retry_count: usize) -> Duration {
        let exponent = u32::try_from(retry_count).unwrap_or(u32::MAX);
        self.backoff_base.saturating_mul(2_u32.saturating_pow(exponent))
    }

    /// GET `{base_url}/{path}` with exponential backoff on transport errors,
    /// timeouts, HTTP 429/5xx and transient Google statuses.
    async fn get_with_retry<T>(&self, path: &str, params: &[(&str, &str)], call: &str) -> Result<T>
    where
        T: DeserializeOwned + ApiStatus,
    {
        let url = format!("{}/{}", self.base_url, path);
        let mut retry_count = 0;

        loop {
            let response_result = self
                .client
                .get(&url)
                .query(params)
                .query(&[("key", self.api_key.as_str())])
                .timeout(self.timeout)
                .send()
                .await;

            let failure = match response_result {
                Err(e) => {
                    // Strip the URL: it carries the API key
                    let e = e.without_url();
                    if e.is_timeout() {
                        "Request timed out".to_string()
                    } else {
                        format!("Request failed: {}", e)
                    }
                }
                Ok(response) if response.status().is_success() => {
                    let body: T = response.json().await.map_err(|e| {
                        AppError::Upstream(format!(
                            "{} returned an unreadable response: {}",
                            call,
                            e.without_url()
                        ))
                    })?;

                    if !RETRYABLE_API_STATUSES.iter().any(|s| *s == body.status()) {
                        return Ok(body);
                    }
                    format!("API status {}", body.status())
                }
                Ok(response) => {
                    let status = response.status();
                    let error_text = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Unknown error".to_string());

                    let is_retryable =
                        status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error();
                    if !is_retryable {
                        tracing::warn!(
                            status = %status,
                            "{} HTTP error {}: {}",
                            call,
                            status,
                            error_text
                        );
                        return Err(AppError::Upstream(format!(
                            "{} failed with HTTP {}",
                            call, status
                        )));
                    }
                    format!("HTTP {}", status)
                }
            };

            if retry_count >= self.max_retries {
                return Err(AppError::Upstream(format!(
                    "{}: {} after {} attempts",
                    call,
                    failure,
                    self.max_retries + 1
                )));
            }

            retry_count += 1;
            let backoff = self.backoff(retry_count);
            tracing::warn!(
                "{} {}, retrying in {}ms (attempt {}/{})",
                call,
                failure,
                backoff.as_millis(),
                retry_count + 1,
                self.max_retries + 1
            );
            tokio::time::sleep(backoff).await;
        }
    }
}

#[async_trait]
impl PlaceSearch for GoogleMapsClient {
    async fn search(&self, query: &str) -> Result<Vec<Poi>> {
        tracing::debug!(query, "Places text search request");

        let response: TextSearchResponse = self
            .get_with_retry("place/textsearch/json", &[("query", query)], "Places text search")
            .await?;

        match response.status.as_str() {
            "OK" => {}
            "ZERO_RESULTS" => return Ok(Vec::new()),
            other => {
                tracing::warn!(
                    status = other,
                    "Places text search error: {}",
                    response.error_message.as_deref().unwrap_or("no message")
                );
                return Err(AppError::Upstream(format!(
                    "Error fetching places: {}",
                    other
                )));
            }
        }

        let pois: Vec<Poi> = response.results.into_iter().map(Poi::from).collect();
        tracing::debug!(count = pois.len(), "Places text search returned {} results", pois.len());
        Ok(pois)
    }
}

#[async_trait]
impl DistanceProvider for GoogleMapsClient {
    fn max_elements(&self) -> usize {
        self.max_elements
    }

    async fn distance_rows(
        &self,
        origins: &[String],
        destinations: &[String],
    ) -> Result<Vec<DistanceRow>> {
        let elements = origins.len() * destinations.len();
        if elements == 0 || elements > self.max_elements {
            return Err(AppError::InvalidRequest(format!(
                "Distance request of {} elements outside 1..={}",
                elements, self.max_elements
            )));
        }

        let origins_param = join_place_ids(origins);
        let destinations_param = join_place_ids(destinations);

        let response: DistanceMatrixResponse = self
            .get_with_retry(
                "distancematrix/json",
                &[
                    ("origins", origins_param.as_str()),
                    ("destinations", destinations_param.as_str()),
                ],
                "Distance matrix",
            )
            .await?;

        if response.status != "OK" {
            return Err(AppError::Upstream(format!(
                "Distance matrix status {}: {}",
                response.status,
                response.error_message.as_deref().unwrap_or("no message")
            )));
        }

        Ok(response
            .rows
            .into_iter()
            .map(|row| {
                DistanceRow::new(
                    row.elements
                        .into_iter()
                        .map(DistanceElement::from)
                        .collect(),
                )
            })
            .collect())
    }
}

fn join_place_ids(ids: &[String]) -> String {
    ids.iter()
        .map(|id| format!("{}{}", PLACE_ID_PREFIX, id))
        .collect::<Vec<_>>()
        .join("|")
}

// Google API response types

trait ApiStatus {
    fn status(&self) -> &str;
}

#[derive(Debug, Deserialize)]
struct TextSearchResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<PlaceResult>,
}

impl ApiStatus for TextSearchResponse {
    fn status(&self) -> &str {
        &self.status
    }
}

#[derive(Debug, Deserialize)]
struct PlaceResult {
    place_id: String,
    name: String,
    #[serde(default)]
    formatted_address: String,
    #[serde(default)]
    rating: Option<f64>,
    #[serde(default)]
    types: Vec<String>,
    #[serde(default)]
    photos: Vec<PlacePhoto>,
}

#[derive(Debug, Deserialize)]
struct PlacePhoto {
    photo_reference: String,
}

impl From<PlaceResult> for Poi {
    fn from(place: PlaceResult) -> Self {
        Poi {
            id: place.place_id,
            name: place.name,
            address: place.formatted_address,
            rating: place.rating.unwrap_or(0.0),
            categories: place.types,
            photo_reference: place.photos.into_iter().next().map(|p| p.photo_reference),
        }
    }
}

#[derive(Debug, Deserialize)]
struct DistanceMatrixResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    rows: Vec<MatrixRow>,
}

impl ApiStatus for DistanceMatrixResponse {
    fn status(&self) -> &str {
        &self.status
    }
}

#[derive(Debug, Deserialize)]
struct MatrixRow {
    #[serde(default)]
    elements: Vec<MatrixElement>,
}

#[derive(Debug, Deserialize)]
struct MatrixElement {
    status: String,
    #[serde(default)]
    distance: Option<MatrixValue>,
}

#[derive(Debug, Deserialize)]
struct MatrixValue {
    value: f64,
}

impl From<MatrixElement> for DistanceElement {
    fn from(element: MatrixElement) -> Self {
        match (element.status.as_str(), element.distance) {
            ("OK", Some(distance)) => DistanceElement::ok(distance.value),
            _ => DistanceElement::unavailable(),
        }
    }
}
