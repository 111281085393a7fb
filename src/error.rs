use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Upstream service error: {0}")]
    Upstream(String),

    #[error("No spots found: {0}")]
    NoSpotsFound(String),

    #[error("Insufficient spots: {0}")]
    InsufficientSpots(String),

    #[error("No distance data: {0}")]
    NoDistanceData(String),

    #[error("Invalid time window: {0}")]
    InvalidWindow(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("Cache error: {0}")]
    Cache(String),
}

impl AppError {
    /// Stable, client-visible name of the failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Upstream(_) => "UpstreamError",
            AppError::NoSpotsFound(_) => "NoSpotsFoundError",
            AppError::InsufficientSpots(_) => "InsufficientSpotsError",
            AppError::NoDistanceData(_) => "NoDistanceDataError",
            AppError::InvalidWindow(_) => "InvalidWindowError",
            AppError::InvalidRequest(_) => "InvalidRequest",
            AppError::Timeout(_) => "TimeoutError",
            AppError::Cache(_) => "InternalError",
        }
    }
}

// Convert AppError into HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        let (status, message) = match self {
            AppError::Upstream(ref e) => {
                tracing::warn!("Upstream error: {}", e);
                (StatusCode::BAD_REQUEST, e.as_str())
            }
            AppError::NoSpotsFound(ref e) => {
                tracing::info!("No spots found: {}", e);
                (StatusCode::BAD_REQUEST, e.as_str())
            }
            AppError::InsufficientSpots(ref e) => {
                tracing::info!("Insufficient spots: {}", e);
                (StatusCode::BAD_REQUEST, e.as_str())
            }
            AppError::NoDistanceData(ref e) => {
                tracing::warn!("No distance data: {}", e);
                (StatusCode::BAD_REQUEST, e.as_str())
            }
            AppError::InvalidWindow(ref e) | AppError::InvalidRequest(ref e) => {
                (StatusCode::BAD_REQUEST, e.as_str())
            }
            AppError::Timeout(ref e) => {
                tracing::warn!("Itinerary request timed out: {}", e);
                (StatusCode::GATEWAY_TIMEOUT, e.as_str())
            }
            AppError::Cache(ref e) => {
                tracing::error!("Cache error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let body = Json(json!({
            "error": kind,
            "message": message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
