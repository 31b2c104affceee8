use crate::models::Coordinate;

/// Earth's radius in statute miles
pub const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Calculate the Haversine distance between two points in statute miles
///
/// Spherical earth, no ellipsoidal correction. Non-finite inputs yield NaN.
#[inline]
pub fn haversine_miles(from: Coordinate, to: Coordinate) -> f64 {
    let lat1_rad = from.latitude.to_radians();
    let lat2_rad = to.latitude.to_radians();
    let delta_lat = (to.latitude - from.latitude).to_radians();
    let delta_lon = (to.longitude - from.longitude).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_MILES * c
}

/// Round to one decimal place, halves rounding up
#[inline]
pub fn round_to_tenth(miles: f64) -> f64 {
    (miles * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const ATLANTA: Coordinate = Coordinate { latitude: 33.7490, longitude: -84.3880 };
    const LOS_ANGELES: Coordinate = Coordinate { latitude: 34.0522, longitude: -118.2437 };

    #[test]
    fn test_haversine_same_point_is_zero() {
        assert_eq!(haversine_miles(ATLANTA, ATLANTA), 0.0);
    }

    #[test]
    fn test_haversine_atlanta_to_los_angeles() {
        let distance = haversine_miles(ATLANTA, LOS_ANGELES);
        assert!((distance - 1946.0).abs() < 20.0, "Distance should be ~1946mi, got {}", distance);
    }

    #[test]
    fn test_haversine_is_symmetric() {
        let there = haversine_miles(ATLANTA, LOS_ANGELES);
        let back = haversine_miles(LOS_ANGELES, ATLANTA);
        assert!((there - back).abs() < 1e-9);
    }

    #[test]
    fn test_haversine_nan_on_non_finite_input() {
        let broken = Coordinate::new(f64::NAN, -84.0);
        assert!(haversine_miles(ATLANTA, broken).is_nan());
    }

    #[test]
    fn test_round_to_tenth_half_up() {
        assert_eq!(round_to_tenth(2.34999), 2.3);
        assert_eq!(round_to_tenth(2.35), 2.4);
        assert_eq!(round_to_tenth(0.04), 0.0);
        assert_eq!(round_to_tenth(1946.04), 1946.0);
    }
}
