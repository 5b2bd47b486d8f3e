// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Great-circle distance between two points

use crate::types::GeoPoint;

const EARTH_DIAMETER_KM: f64 = 12742.0;
const DEG_TO_RAD: f64 = 0.017_453_292_519_943_295;

/// Haversine distance between two lat/lon points, in kilometers.
pub fn distance_km(start: &GeoPoint, end: &GeoPoint) -> f64 {
    let lat1 = start.latitude;
    let lon1 = start.longitude;
    let lat2 = end.latitude;
    let lon2 = end.longitude;

    let h = 0.5 - ((lat2 - lat1) * DEG_TO_RAD).cos() / 2.0
        + (lat1 * DEG_TO_RAD).cos()
            * (lat2 * DEG_TO_RAD).cos()
            * (1.0 - ((lon2 - lon1) * DEG_TO_RAD).cos())
            / 2.0;

    EARTH_DIAMETER_KM * h.sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(latitude: f64, longitude: f64) -> GeoPoint {
        GeoPoint {
            latitude,
            longitude,
        }
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        let p = point(52.52, 13.405);
        assert_eq!(distance_km(&p, &p), 0.0);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = point(51.5074, -0.1278);
        let b = point(48.8566, 2.3522);
        assert_eq!(distance_km(&a, &b), distance_km(&b, &a));
    }

    #[test]
    fn test_london_paris_distance() {
        let london = point(51.5074, -0.1278);
        let paris = point(48.8566, 2.3522);
        let d = distance_km(&london, &paris);
        // Great-circle distance is roughly 344 km
        assert!(d > 330.0 && d < 360.0, "unexpected distance {}", d);
    }

    #[test]
    fn test_antimeridian_crossing() {
        let a = point(0.0, 179.5);
        let b = point(0.0, -179.5);
        let d = distance_km(&a, &b);
        // One degree of longitude at the equator is ~111 km
        assert!(d < 120.0, "unexpected distance {}", d);
    }
}
