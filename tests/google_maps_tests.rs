use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use daytrip::config::PlannerConfig;
use daytrip::models::ElementStatus;
use daytrip::services::google_maps::GoogleMapsClient;
use daytrip::services::providers::{DistanceProvider, PlaceSearch};
use daytrip::AppError;
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// How the mock misbehaves before answering normally.
#[derive(Clone, Copy)]
enum Failure {
    None,
    ServerErrorOnce,
    QueryLimitOnce,
    AlwaysDenied,
    AlwaysServerError,
}

struct MockState {
    failure: Failure,
    requests: AtomicUsize,
    last_query: std::sync::Mutex<HashMap<String, String>>,
}

async fn text_search(
    State(state): State<Arc<MockState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let attempt = state.requests.fetch_add(1, Ordering::SeqCst);
    *state.last_query.lock().unwrap() = params.clone();

    match (state.failure, attempt) {
        (Failure::ServerErrorOnce, 0) | (Failure::AlwaysServerError, _) => {
            return (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response();
        }
        (Failure::QueryLimitOnce, 0) => {
            return Json(json!({"status": "OVER_QUERY_LIMIT", "results": []})).into_response();
        }
        (Failure::AlwaysDenied, _) => {
            return Json(json!({
                "status": "REQUEST_DENIED",
                "error_message": "The provided API key is invalid.",
                "results": []
            }))
            .into_response();
        }
        _ => {}
    }

    if params.get("query").map(String::as_str) == Some("top tourist spots in Nowhere") {
        return Json(json!({"status": "ZERO_RESULTS", "results": []})).into_response();
    }

    Json(json!({
        "status": "OK",
        "results": [
            {
                "place_id": "ChIJ_castle",
                "name": "Castelo de S. Jorge",
                "formatted_address": "R. de Santa Cruz do Castelo, Lisboa",
                "rating": 4.5,
                "types": ["tourist_attraction", "point_of_interest"],
                "photos": [{"photo_reference": "ph-castle", "width": 4000}]
            },
            {
                "place_id": "ChIJ_garden",
                "name": "Jardim da Estrela",
                "types": ["park"]
            }
        ]
    }))
    .into_response()
}

async fn distance_matrix(
    State(state): State<Arc<MockState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let attempt = state.requests.fetch_add(1, Ordering::SeqCst);
    *state.last_query.lock().unwrap() = params.clone();

    match (state.failure, attempt) {
        (Failure::ServerErrorOnce, 0) | (Failure::AlwaysServerError, _) => {
            return (StatusCode::SERVICE_UNAVAILABLE, "busy").into_response();
        }
        (Failure::AlwaysDenied, _) => {
            return Json(json!({"status": "REQUEST_DENIED", "rows": []})).into_response();
        }
        _ => {}
    }

    let origins = params.get("origins").cloned().unwrap_or_default();
    let destinations = params.get("destinations").cloned().unwrap_or_default();
    let rows: Vec<_> = origins
        .split('|')
        .enumerate()
        .map(|(i, _)| {
            let elements: Vec<_> = destinations
                .split('|')
                .enumerate()
                .map(|(j, destination)| {
                    if destination.ends_with("unreachable") {
                        json!({"status": "ZERO_RESULTS"})
                    } else {
                        let meters = (i as i64 - j as i64).abs() * 1000;
                        json!({
                            "status": "OK",
                            "distance": {"text": "x km", "value": meters},
                            "duration": {"text": "x mins", "value": meters / 2}
                        })
                    }
                })
                .collect();
            json!({"elements": elements})
        })
        .collect();

    Json(json!({"status": "OK", "rows": rows})).into_response()
}

async fn start_mock(failure: Failure) -> (String, Arc<MockState>) {
    let state = Arc::new(MockState {
        failure,
        requests: AtomicUsize::new(0),
        last_query: std::sync::Mutex::new(HashMap::new()),
    });

    let app = Router::new()
        .route("/place/textsearch/json", get(text_search))
        .route("/distancematrix/json", get(distance_matrix))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), state)
}

fn client(base_url: String) -> GoogleMapsClient {
    let config = PlannerConfig {
        upstream_max_retries: 2,
        upstream_timeout_secs: 5,
        ..PlannerConfig::default()
    };
    GoogleMapsClient::with_config("test_key".to_string(), base_url, &config)
        .with_backoff_base(Duration::from_millis(10))
}

fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_text_search_parses_places() {
    let (base_url, state) = start_mock(Failure::None).await;

    let pois = client(base_url)
        .search("top tourist spots in Lisbon")
        .await
        .unwrap();

    assert_eq!(pois.len(), 2);
    assert_eq!(pois[0].id, "ChIJ_castle");
    assert_eq!(pois[0].rating, 4.5);
    assert_eq!(pois[0].photo_reference.as_deref(), Some("ph-castle"));
    assert_eq!(pois[1].rating, 0.0);

    let query = state.last_query.lock().unwrap().clone();
    assert_eq!(query["query"], "top tourist spots in Lisbon");
    assert_eq!(query["key"], "test_key");
}

#[tokio::test]
async fn test_text_search_zero_results_is_empty() {
    let (base_url, _) = start_mock(Failure::None).await;

    let pois = client(base_url)
        .search("top tourist spots in Nowhere")
        .await
        .unwrap();
    assert!(pois.is_empty());
}

#[tokio::test]
async fn test_text_search_denied_is_upstream_error_without_retry() {
    let (base_url, state) = start_mock(Failure::AlwaysDenied).await;

    let result = client(base_url).search("top tourist spots in Lisbon").await;

    assert!(matches!(result, Err(AppError::Upstream(_))));
    assert_eq!(state.requests.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_server_error_is_retried() {
    let (base_url, state) = start_mock(Failure::ServerErrorOnce).await;

    let pois = client(base_url)
        .search("top tourist spots in Lisbon")
        .await
        .unwrap();

    assert_eq!(pois.len(), 2);
    assert_eq!(state.requests.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_query_limit_status_is_retried() {
    let (base_url, state) = start_mock(Failure::QueryLimitOnce).await;

    let pois = client(base_url)
        .search("top tourist spots in Lisbon")
        .await
        .unwrap();

    assert_eq!(pois.len(), 2);
    assert_eq!(state.requests.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_retries_are_bounded() {
    let (base_url, state) = start_mock(Failure::AlwaysServerError).await;

    let result = client(base_url).search("top tourist spots in Lisbon").await;

    assert!(matches!(result, Err(AppError::Upstream(_))));
    assert_eq!(state.requests.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_distance_matrix_rows() {
    let (base_url, state) = start_mock(Failure::None).await;

    let origins = ids(&["a", "b"]);
    let destinations = ids(&["a", "b", "unreachable"]);
    let rows = client(base_url)
        .distance_rows(&origins, &destinations)
        .await
        .unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].elements.len(), 3);
    assert_eq!(rows[0].elements[1].distance_meters, 1000.0);
    assert_eq!(rows[1].elements[0].distance_meters, 1000.0);
    assert_eq!(rows[1].elements[2].status, ElementStatus::Unavailable);

    let query = state.last_query.lock().unwrap().clone();
    assert_eq!(query["origins"], "place_id:a|place_id:b");
    assert_eq!(query["destinations"], "place_id:a|place_id:b|place_id:unreachable");
}

#[tokio::test]
async fn test_distance_matrix_denied_is_error() {
    let (base_url, _) = start_mock(Failure::AlwaysDenied).await;

    let result = client(base_url)
        .distance_rows(&ids(&["a"]), &ids(&["b"]))
        .await;
    assert!(matches!(result, Err(AppError::Upstream(_))));
}

#[tokio::test]
async fn test_distance_matrix_retries_unavailable_service() {
    let (base_url, state) = start_mock(Failure::ServerErrorOnce).await;

    let rows = client(base_url)
        .distance_rows(&ids(&["a"]), &ids(&["b"]))
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(state.requests.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_real_google_text_search() {
    let Ok(api_key) = std::env::var("GOOGLE_API_KEY") else {
        println!("Skipping real API test");
        return;
    };

    let pois = GoogleMapsClient::new(api_key)
        .search("top tourist spots in Lisbon")
        .await
        .unwrap();
    assert!(!pois.is_empty());
}
