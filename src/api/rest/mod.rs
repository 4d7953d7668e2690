//! # REST API
//!
//! HTTP surface for the estimator, using axum.
//!
//! # Endpoints
//!
//! - `GET /api/v1/health` - Health check
//! - `POST /api/v1/estimates` - Quotes for every service class
//! - `POST /api/v1/estimates/{service_class}` - Quote for one service class;
//!   unknown classes are priced at the baseline and the quote carries
//!   `requested_service_class`
//!
//! # Request body
//!
//! ```json
//! {
//!   "pickup":   { "latitude": 10.77, "longitude": 106.70 },
//!   "delivery": { "address": "227 Nguyen Van Cu, District 5" },
//!   "cargo":    [{ "weight_kg": 5.0, "fragile": false, "quantity": 1 }]
//! }
//! ```
//!
//! Errors are returned as `{ "error": CODE, "message": TEXT }`. A body that
//! is not a valid request is `INVALID_REQUEST` with the extractor's status
//! (400 for malformed JSON, 415 without a JSON content type, 422 for wrong
//! field types). Invalid cargo or coordinates are 422, an elapsed deadline
//! 504, anything else 500.
//!
//! # Usage
//!
//! ```ignore
//! use parcel_quote::api::rest::{create_router, AppState};
//!
//! let router = create_router(AppState::new(estimator));
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, router).await?;
//! ```

pub mod handlers;
pub mod routes;

pub use handlers::{
    ApiError, AppState, CargoItemDto, ErrorResponse, HealthResponse, LegDto, ShipmentDto,
};
pub use routes::create_router;
