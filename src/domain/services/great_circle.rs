//! # Great-Circle Distance
//!
//! Haversine distance on a spherical Earth.
//!
//! # Examples
//!
//! ```
//! use parcel_quote::domain::services::great_circle::great_circle_km;
//! use parcel_quote::domain::value_objects::GeoPoint;
//!
//! let a = GeoPoint::new(10.77, 106.70).unwrap();
//! assert_eq!(great_circle_km(a, a), 0.0);
//! ```

use crate::domain::value_objects::GeoPoint;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Straight-line distance between two points along the Earth's surface.
///
/// Always finite and non-negative for valid points.
#[must_use]
pub fn great_circle_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.latitude().to_radians();
    let lat2 = b.latitude().to_radians();
    let dlat = (b.latitude() - a.latitude()).to_radians();
    let dlon = (b.longitude() - a.longitude()).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    // clamp guards asin against rounding just above 1.0 for antipodal points
    let c = 2.0 * h.sqrt().min(1.0).asin();
    EARTH_RADIUS_KM * c
}

/// Length of a polyline: the sum of great-circle legs between consecutive
/// waypoints. Fewer than two waypoints have zero length.
#[must_use]
pub fn path_length_km(waypoints: &[GeoPoint]) -> f64 {
    waypoints
        .windows(2)
        .map(|pair| match pair {
            [a, b] => great_circle_km(*a, *b),
            _ => 0.0,
        })
        .sum()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).unwrap()
    }

    #[test]
    fn same_point_is_zero() {
        assert_eq!(great_circle_km(p(10.77, 106.70), p(10.77, 106.70)), 0.0);
    }

    #[test]
    fn symmetric() {
        let a = p(10.77, 106.70);
        let b = p(21.03, 105.85);
        assert_eq!(great_circle_km(a, b), great_circle_km(b, a));
    }

    #[test]
    fn one_degree_of_latitude() {
        let d = great_circle_km(p(0.0, 0.0), p(1.0, 0.0));
        assert!((d - 111.195).abs() < 0.01, "got {}", d);
    }

    #[test]
    fn short_city_hop() {
        let d = great_circle_km(p(10.77, 106.70), p(10.80, 106.65));
        assert!(d > 6.0 && d < 7.0, "got {}", d);
    }

    #[test]
    fn antipodal_is_half_circumference() {
        let d = great_circle_km(p(0.0, 0.0), p(0.0, 180.0));
        assert!((d - EARTH_RADIUS_KM * std::f64::consts::PI).abs() < 1e-6);
    }

    #[test]
    fn path_of_fewer_than_two_is_zero() {
        assert_eq!(path_length_km(&[]), 0.0);
        assert_eq!(path_length_km(&[p(1.0, 1.0)]), 0.0);
    }

    #[test]
    fn path_sums_legs() {
        let a = p(0.0, 0.0);
        let b = p(1.0, 0.0);
        let c = p(1.0, 1.0);
        let expected = great_circle_km(a, b) + great_circle_km(b, c);
        assert!((path_length_km(&[a, b, c]) - expected).abs() < 1e-9);
    }

    #[test]
    fn detour_is_longer_than_direct() {
        let a = p(10.0, 106.0);
        let b = p(10.5, 106.5);
        let c = p(10.0, 107.0);
        assert!(path_length_km(&[a, b, c]) >= great_circle_km(a, c));
    }
}
