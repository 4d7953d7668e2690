//! # REST Handlers
//!
//! Request/response types and axum handlers for the estimate endpoints.

use crate::application::error::EstimationError;
use crate::application::services::FeeEstimator;
use crate::domain::entities::{FeeQuote, QuoteComparison, Shipment};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{CargoLineItem, GeoPoint, Location};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// Shared state for the REST handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The estimator.
    pub estimator: Arc<FeeEstimator>,
}

impl AppState {
    /// Creates state around an estimator.
    #[must_use]
    pub fn new(estimator: FeeEstimator) -> Self {
        Self {
            estimator: Arc::new(estimator),
        }
    }
}

/// One leg of a shipment as sent by clients.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LegDto {
    /// Latitude in degrees.
    #[serde(default)]
    pub latitude: Option<f64>,
    /// Longitude in degrees.
    #[serde(default)]
    pub longitude: Option<f64>,
    /// Free-text address.
    #[serde(default)]
    pub address: Option<String>,
}

impl LegDto {
    /// Converts to a [`Location`].
    ///
    /// Both coordinates win over the address; a lone coordinate is ignored.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCoordinate` if both coordinates are given
    /// but out of range.
    pub fn into_location(self) -> DomainResult<Location> {
        if let (Some(lat), Some(lon)) = (self.latitude, self.longitude) {
            return GeoPoint::new(lat, lon).map(Location::Point);
        }
        Ok(Location::from_inputs(None, None, self.address))
    }
}

/// One cargo line as sent by clients. Dimensions default to 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CargoItemDto {
    /// Weight in kg.
    pub weight_kg: f64,
    /// Length in cm.
    #[serde(default)]
    pub length_cm: f64,
    /// Width in cm.
    #[serde(default)]
    pub width_cm: f64,
    /// Height in cm.
    #[serde(default)]
    pub height_cm: f64,
    /// Fragile handling.
    #[serde(default)]
    pub fragile: bool,
    /// Number of parcels.
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

/// Estimate request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentDto {
    /// Pickup leg.
    #[serde(default)]
    pub pickup: LegDto,
    /// Delivery leg.
    #[serde(default)]
    pub delivery: LegDto,
    /// Cargo lines.
    #[serde(default)]
    pub cargo: Vec<CargoItemDto>,
}

impl ShipmentDto {
    /// Converts to a [`Shipment`].
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCargoSpec` or `InvalidCoordinate` for bad
    /// input.
    pub fn into_shipment(self) -> DomainResult<Shipment> {
        let cargo = self
            .cargo
            .into_iter()
            .map(|item| {
                CargoLineItem::new(
                    item.weight_kg,
                    item.length_cm,
                    item.width_cm,
                    item.height_cm,
                    item.fragile,
                    item.quantity,
                )
            })
            .collect::<DomainResult<Vec<_>>>()?;
        Ok(Shipment::new(
            self.pickup.into_location()?,
            self.delivery.into_location()?,
            cargo,
        ))
    }
}

/// Health check response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `ok`.
    pub status: String,
    /// Crate version.
    pub version: String,
}

/// Error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// Handler error mapped to an HTTP status.
#[derive(Debug)]
pub enum ApiError {
    /// The body could not be read as a [`ShipmentDto`].
    InvalidRequest {
        /// Status chosen by the extractor (400, 415 or 422).
        status: StatusCode,
        /// Extractor message.
        message: String,
    },
    /// The estimate itself failed.
    Estimation(EstimationError),
}

impl From<EstimationError> for ApiError {
    fn from(e: EstimationError) -> Self {
        Self::Estimation(e)
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        Self::Estimation(EstimationError::Domain(e))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidRequest {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest { status, .. } => *status,
            Self::Estimation(e) if e.is_client_error() => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Estimation(e) if e.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            Self::Estimation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::InvalidRequest { .. } => "INVALID_REQUEST",
            Self::Estimation(e) => e.code(),
        }
    }

    fn message(&self) -> String {
        match self {
            Self::InvalidRequest { message, .. } => message.clone(),
            Self::Estimation(e) => e.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: self.code().to_string(),
            message: self.message(),
        };
        if status.is_server_error() {
            warn!(error = %body.message, status = status.as_u16(), "Estimate failed");
        }
        (status, Json(body)).into_response()
    }
}

/// `GET /api/v1/health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `POST /api/v1/estimates`
///
/// # Errors
///
/// Returns an [`ApiError`] for invalid input or a failed estimate.
pub async fn estimate_all(
    State(state): State<AppState>,
    body: Result<Json<ShipmentDto>, JsonRejection>,
) -> Result<Json<QuoteComparison>, ApiError> {
    let Json(body) = body?;
    let shipment = body.into_shipment()?;
    info!(shipment = %shipment, "Estimating all service classes");
    let comparison = state
        .estimator
        .estimate_all_service_classes(&shipment)
        .await?;
    Ok(Json(comparison))
}

/// `POST /api/v1/estimates/{service_class}`
///
/// # Errors
///
/// Returns an [`ApiError`] for invalid input or a failed estimate.
pub async fn estimate_one(
    State(state): State<AppState>,
    Path(service_class): Path<String>,
    body: Result<Json<ShipmentDto>, JsonRejection>,
) -> Result<Json<FeeQuote>, ApiError> {
    let Json(body) = body?;
    let shipment = body.into_shipment()?;
    info!(shipment = %shipment, service_class = %service_class, "Estimating");
    let quote = state
        .estimator
        .estimate_by_key(&shipment, &service_class)
        .await?;
    Ok(Json(quote))
}
