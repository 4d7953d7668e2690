//! REST endpoints driven through the router without a socket.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use parcel_quote::api::rest::{create_router, AppState, ErrorResponse, HealthResponse};
use parcel_quote::application::services::{EstimatorOptions, FeeEstimator};
use parcel_quote::domain::value_objects::{GeoPoint, ServiceMultiplierTable};
use parcel_quote::infrastructure::collaborators::{
    CollaboratorError, CollaboratorResult, Geocoder, RoutingService,
};
use parcel_quote::infrastructure::pricing::{
    TieredDistanceFeeClassifier, WeightBandCargoFeeEvaluator,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

#[derive(Debug)]
struct FixedGeocoder {
    delay_ms: u64,
}

#[async_trait]
impl Geocoder for FixedGeocoder {
    async fn geocode(&self, _query: &str) -> CollaboratorResult<GeoPoint> {
        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }
        Ok(GeoPoint::new(10.80, 106.65).unwrap())
    }
}

#[derive(Debug)]
struct DownRouter;

#[async_trait]
impl RoutingService for DownRouter {
    async fn route(
        &self,
        _origin: GeoPoint,
        _destination: GeoPoint,
    ) -> CollaboratorResult<Vec<GeoPoint>> {
        Err(CollaboratorError::connection("routing service unreachable"))
    }
}

fn app_with(geocode_delay_ms: u64, options: EstimatorOptions) -> Router {
    let estimator = FeeEstimator::new(
        Arc::new(FixedGeocoder {
            delay_ms: geocode_delay_ms,
        }),
        Arc::new(DownRouter),
        Arc::new(TieredDistanceFeeClassifier::default()),
        Arc::new(WeightBandCargoFeeEvaluator::default()),
        ServiceMultiplierTable::default(),
        options,
    );
    create_router(AppState::new(estimator))
}

fn app() -> Router {
    app_with(0, EstimatorOptions::default())
}

fn shipment_body() -> Value {
    json!({
        "pickup": { "latitude": 10.77, "longitude": 106.70 },
        "delivery": { "address": "227 Nguyen Van Cu, District 5" },
        "cargo": [{ "weight_kg": 5.0, "fragile": false, "quantity": 1 }]
    })
}

async fn post_json(app: Router, uri: &str, body: &Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn health_reports_version() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/api/v1/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let health: HealthResponse = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(health.status, "ok");
    assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn comparison_lists_every_service_class() {
    let (status, body) = post_json(app(), "/api/v1/estimates", &shipment_body()).await;

    assert_eq!(status, StatusCode::OK);
    let quotes = body.as_array().unwrap();
    assert_eq!(quotes.len(), 5);
    assert_eq!(quotes[0]["service_class"], "SECOND_CLASS");
    assert_eq!(quotes[1]["service_class"], "STANDARD");
    assert_eq!(quotes[1]["total_fee"], "25000");
    assert_eq!(quotes[3]["service_class"], "EXPRESS");
    assert_eq!(quotes[3]["total_fee"], "35000");
    for quote in quotes {
        assert_eq!(quote["region"], "Intracity");
        assert_eq!(quote["distance_source"], "GREAT_CIRCLE");
    }
}

#[tokio::test]
async fn single_class_by_path() {
    let (status, body) =
        post_json(app(), "/api/v1/estimates/express", &shipment_body()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service_class"], "EXPRESS");
    assert_eq!(body["total_fee"], "35000");
    assert!(body.get("requested_service_class").is_none());
}

#[tokio::test]
async fn unknown_class_is_priced_at_baseline() {
    let (status, body) =
        post_json(app(), "/api/v1/estimates/overnight", &shipment_body()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service_class"], "STANDARD");
    assert_eq!(body["total_fee"], "25000");
    assert_eq!(body["requested_service_class"], "overnight");
}

#[tokio::test]
async fn missing_delivery_prices_base_only() {
    let body = json!({
        "pickup": { "latitude": 10.77, "longitude": 106.70 },
        "delivery": {},
        "cargo": [{ "weight_kg": 5.0 }]
    });

    let (status, body) = post_json(app(), "/api/v1/estimates/standard", &body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["region"], "Unknown");
    assert_eq!(body["distance_km"], 0.0);
    assert_eq!(body["total_fee"], "20000");
}

#[tokio::test]
async fn empty_cargo_is_unprocessable() {
    let body = json!({
        "pickup": { "latitude": 10.77, "longitude": 106.70 },
        "delivery": { "latitude": 10.80, "longitude": 106.65 },
        "cargo": []
    });

    let (status, body) = post_json(app(), "/api/v1/estimates", &body).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let error: ErrorResponse = serde_json::from_value(body).unwrap();
    assert_eq!(error.error, "INVALID_CARGO");
}

#[tokio::test]
async fn wrongly_typed_field_is_invalid_request() {
    let body = json!({ "cargo": [{ "weight_kg": "heavy" }] });

    let (status, body) = post_json(app(), "/api/v1/estimates/standard", &body).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let error: ErrorResponse = serde_json::from_value(body).unwrap();
    assert_eq!(error.error, "INVALID_REQUEST");
    assert!(!error.message.is_empty());
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/estimates")
        .header("content-type", "application/json")
        .body(Body::from("{\"cargo\": [}"))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let error: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(error.error, "INVALID_REQUEST");
}

#[tokio::test]
async fn oversized_weight_is_unprocessable() {
    let body = json!({
        "pickup": { "latitude": 10.77, "longitude": 106.70 },
        "delivery": { "latitude": 10.80, "longitude": 106.65 },
        "cargo": [{ "weight_kg": 1e30 }]
    });

    let (status, body) = post_json(app(), "/api/v1/estimates", &body).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let error: ErrorResponse = serde_json::from_value(body).unwrap();
    assert_eq!(error.error, "INVALID_CARGO");
    assert!(error.message.contains("weight_kg"));
}

#[tokio::test]
async fn out_of_range_coordinate_is_unprocessable() {
    let body = json!({
        "pickup": { "latitude": 123.0, "longitude": 106.70 },
        "delivery": { "latitude": 10.80, "longitude": 106.65 },
        "cargo": [{ "weight_kg": 1.0 }]
    });

    let (status, body) = post_json(app(), "/api/v1/estimates", &body).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "INVALID_COORDINATE");
}

#[tokio::test]
async fn deadline_is_gateway_timeout() {
    let app = app_with(
        500,
        EstimatorOptions::default()
            .with_geocode_timeout(5000)
            .with_estimate_timeout(20),
    );

    let (status, body) = post_json(app, "/api/v1/estimates", &shipment_body()).await;

    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(body["error"], "TIMEOUT");
}
