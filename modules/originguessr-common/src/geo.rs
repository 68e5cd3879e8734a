use std::f64::consts::PI;

use crate::error::ScoringError;
use crate::types::GeoPoint;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine great-circle distance between two lat/lng points in kilometers.
/// Does not validate its inputs; see [`distance_between`].
pub fn haversine_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let to_rad = |deg: f64| deg * PI / 180.0;

    let dlat = to_rad(lat2 - lat1);
    let dlng = to_rad(lng2 - lng1);

    let a = (dlat / 2.0).sin().powi(2)
        + to_rad(lat1).cos() * to_rad(lat2).cos() * (dlng / 2.0).sin().powi(2);

    let c = 2.0 * a.sqrt().asin();
    EARTH_RADIUS_KM * c
}

/// Validated great-circle distance in kilometers.
pub fn distance_between(a: GeoPoint, b: GeoPoint) -> Result<f64, ScoringError> {
    a.validate()?;
    b.validate()?;
    Ok(haversine_km(a.lat, a.lng, b.lat, b.lng))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_london_to_paris() {
        let d = haversine_km(51.5074, -0.1278, 48.8566, 2.3522);
        assert!((d - 343.56).abs() < 0.01, "Expected ~343.56 km, got {d}");
    }

    #[test]
    fn test_identical_points_are_zero() {
        for (lat, lng) in [(0.0, 0.0), (44.9778, -93.2650), (-89.9, 179.9), (90.0, -180.0)] {
            assert_eq!(haversine_km(lat, lng, lat, lng), 0.0);
        }
    }

    #[test]
    fn test_antipodes_are_half_circumference() {
        let d = haversine_km(0.0, 0.0, 0.0, 180.0);
        assert!((d - PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }

    #[test]
    fn test_triangle_inequality() {
        let minneapolis = (44.9778, -93.2650);
        let cairo = (30.0444, 31.2357);
        let tokyo = (35.6762, 139.6503);
        let ab = haversine_km(minneapolis.0, minneapolis.1, cairo.0, cairo.1);
        let bc = haversine_km(cairo.0, cairo.1, tokyo.0, tokyo.1);
        let ac = haversine_km(minneapolis.0, minneapolis.1, tokyo.0, tokyo.1);
        assert!(ac <= ab + bc + 1e-6);
    }

    #[test]
    fn test_distance_between_rejects_invalid_point() {
        let ok = GeoPoint { lat: 10.0, lng: 10.0 };
        let bad = GeoPoint { lat: 120.0, lng: 10.0 };
        assert!(matches!(
            distance_between(ok, bad),
            Err(ScoringError::InvalidCoordinate { .. })
        ));
    }
}
