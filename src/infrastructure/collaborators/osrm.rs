//! # OSRM Router
//!
//! [`RoutingService`] adapter for OSRM-compatible route APIs.
//!
//! Issues
//! `GET {base_url}/route/v1/{profile}/{lon},{lat};{lon},{lat}?overview=full&geometries=geojson`
//! and returns the GeoJSON line of the first route. GeoJSON orders positions
//! as `[longitude, latitude]`.

use crate::domain::value_objects::GeoPoint;
use crate::infrastructure::collaborators::error::{CollaboratorError, CollaboratorResult};
use crate::infrastructure::collaborators::http_client::HttpClient;
use crate::infrastructure::collaborators::traits::RoutingService;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

/// Configuration for [`OsrmRouter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OsrmConfig {
    base_url: String,
    profile: String,
    timeout_ms: u64,
    user_agent: String,
}

impl OsrmConfig {
    /// Creates a config for the given base URL with the `driving` profile.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            profile: "driving".to_string(),
            timeout_ms: 5000,
            user_agent: concat!("parcel-quote/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Sets the routing profile (`driving`, `bike`, `foot`, ...).
    #[must_use]
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Sets the `User-Agent` header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Routing profile.
    #[inline]
    #[must_use]
    pub fn profile(&self) -> &str {
        &self.profile
    }

    /// Request timeout in milliseconds.
    #[inline]
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }
}

#[derive(Debug, Deserialize)]
struct OsrmResponse {
    code: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    geometry: OsrmGeometry,
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    coordinates: Vec<[f64; 2]>,
}

impl OsrmResponse {
    fn into_waypoints(self) -> CollaboratorResult<Vec<GeoPoint>> {
        if self.code != "Ok" {
            return Err(CollaboratorError::route_unavailable(format!(
                "{}: {}",
                self.code,
                self.message.unwrap_or_default()
            )));
        }
        let route = self
            .routes
            .into_iter()
            .next()
            .ok_or_else(|| CollaboratorError::route_unavailable("response has no routes"))?;

        route
            .geometry
            .coordinates
            .into_iter()
            .map(|[lon, lat]| {
                GeoPoint::new(lat, lon)
                    .map_err(|e| CollaboratorError::protocol_error(e.to_string()))
            })
            .collect()
    }
}

/// Router backed by an OSRM route endpoint.
#[derive(Debug, Clone)]
pub struct OsrmRouter {
    route_url: String,
    http_client: HttpClient,
}

impl OsrmRouter {
    /// Creates a router.
    ///
    /// # Errors
    ///
    /// Returns `CollaboratorError::InternalError` if the HTTP client cannot
    /// be created.
    pub fn new(config: &OsrmConfig) -> CollaboratorResult<Self> {
        let http_client = HttpClient::new(config.timeout_ms, &config.user_agent)?;
        Ok(Self {
            route_url: format!(
                "{}/route/v1/{}",
                config.base_url.trim_end_matches('/'),
                config.profile
            ),
            http_client,
        })
    }

    fn url_for(&self, origin: GeoPoint, destination: GeoPoint) -> String {
        format!(
            "{}/{},{};{},{}",
            self.route_url,
            origin.longitude(),
            origin.latitude(),
            destination.longitude(),
            destination.latitude()
        )
    }
}

#[async_trait]
impl RoutingService for OsrmRouter {
    async fn route(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
    ) -> CollaboratorResult<Vec<GeoPoint>> {
        let url = self.url_for(origin, destination);
        let params = [("overview", "full"), ("geometries", "geojson")];

        // OSRM answers 400 with a JSON body for NoRoute/InvalidQuery
        let response: OsrmResponse = self
            .http_client
            .get_with_params(&url, &params)
            .await
            .map_err(|e| match e {
                CollaboratorError::InvalidRequest { message } => {
                    CollaboratorError::route_unavailable(message)
                }
                other => other,
            })?;

        let waypoints = response.into_waypoints()?;
        debug!(
            origin = %origin,
            destination = %destination,
            waypoints = waypoints.len(),
            "Route received"
        );
        Ok(waypoints)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn router() -> OsrmRouter {
        OsrmRouter::new(&OsrmConfig::new("http://localhost:5000/").with_profile("bike")).unwrap()
    }

    #[test]
    fn url_is_lon_lat_ordered() {
        let a = GeoPoint::new(10.77, 106.7).unwrap();
        let b = GeoPoint::new(10.8, 106.65).unwrap();
        assert_eq!(
            router().url_for(a, b),
            "http://localhost:5000/route/v1/bike/106.7,10.77;106.65,10.8"
        );
    }

    #[test]
    fn ok_response_yields_waypoints() {
        let response: OsrmResponse = serde_json::from_str(
            r#"{"code":"Ok","routes":[{"geometry":{"coordinates":[[106.7,10.77],[106.68,10.79],[106.65,10.8]]}}]}"#,
        )
        .unwrap();
        let waypoints = response.into_waypoints().unwrap();
        assert_eq!(waypoints.len(), 3);
        assert_eq!(waypoints[0].latitude(), 10.77);
        assert_eq!(waypoints[0].longitude(), 106.7);
    }

    #[test]
    fn no_route_code() {
        let response: OsrmResponse =
            serde_json::from_str(r#"{"code":"NoRoute","message":"Impossible route"}"#).unwrap();
        let err = response.into_waypoints().unwrap_err();
        assert!(matches!(err, CollaboratorError::RouteUnavailable { .. }));
        assert!(err.to_string().contains("NoRoute"));
    }

    #[test]
    fn empty_routes() {
        let response: OsrmResponse = serde_json::from_str(r#"{"code":"Ok","routes":[]}"#).unwrap();
        assert!(response.into_waypoints().unwrap_err().is_no_result());
    }

    #[test]
    fn bad_coordinate_is_protocol_error() {
        let response: OsrmResponse = serde_json::from_str(
            r#"{"code":"Ok","routes":[{"geometry":{"coordinates":[[500.0,10.0]]}}]}"#,
        )
        .unwrap();
        assert!(response.into_waypoints().unwrap_err().is_protocol_error());
    }
}
