// Unit tests for Bloodlink

use bloodlink::core::{
    distance::{haversine_miles, round_to_tenth, EARTH_RADIUS_MILES},
    filters::BloodTypeFilter,
    matcher::match_donors,
};
use bloodlink::models::{BloodType, Coordinate, DonorCandidate, EligibilityStatus};
use uuid::Uuid;

const CITIES: &[(&str, f64, f64)] = &[
    ("Atlanta", 33.7490, -84.3880),
    ("Los Angeles", 34.0522, -118.2437),
    ("New York", 40.7128, -74.0060),
    ("Reykjavik", 64.1466, -21.9426),
    ("Sydney", -33.8688, 151.2093),
    ("Quito", -0.1807, -78.4678),
];

fn city(name: &str) -> Coordinate {
    let (_, lat, lon) = CITIES
        .iter()
        .find(|(n, _, _)| *n == name)
        .expect("unknown city");
    Coordinate::new(*lat, *lon)
}

fn miles_north(from: Coordinate, miles: f64) -> Coordinate {
    let degrees = miles / (EARTH_RADIUS_MILES * std::f64::consts::PI / 180.0);
    Coordinate::new(from.latitude + degrees, from.longitude)
}

fn create_donor(blood_type: BloodType, at: Coordinate) -> DonorCandidate {
    DonorCandidate {
        id: Uuid::new_v4(),
        name: format!("{} donor", blood_type),
        blood_type,
        latitude: at.latitude,
        longitude: at.longitude,
        eligibility_status: EligibilityStatus::Eligible,
    }
}

#[test]
fn test_haversine_symmetric_for_all_city_pairs() {
    for (_, lat1, lon1) in CITIES {
        for (_, lat2, lon2) in CITIES {
            let a = Coordinate::new(*lat1, *lon1);
            let b = Coordinate::new(*lat2, *lon2);
            let there = haversine_miles(a, b);
            let back = haversine_miles(b, a);
            assert!((there - back).abs() < 1e-6, "{} != {}", there, back);
        }
    }
}

#[test]
fn test_haversine_zero_for_same_point() {
    for (_, lat, lon) in CITIES {
        let p = Coordinate::new(*lat, *lon);
        assert_eq!(haversine_miles(p, p), 0.0);
    }
}

#[test]
fn test_haversine_atlanta_to_los_angeles() {
    let distance = haversine_miles(city("Atlanta"), city("Los Angeles"));
    assert!((distance - 1946.0).abs() < 20.0, "Expected ~1946mi, got {}", distance);
}

#[test]
fn test_haversine_new_york_to_los_angeles() {
    // roughly 2450 statute miles
    let distance = haversine_miles(city("New York"), city("Los Angeles"));
    assert!((distance - 2450.0).abs() < 30.0, "Expected ~2450mi, got {}", distance);
}

#[test]
fn test_rounding_half_up() {
    assert_eq!(round_to_tenth(2.34999), 2.3);
    assert_eq!(round_to_tenth(2.35), 2.4);
}

#[test]
fn test_far_city_excluded_at_default_radius() {
    let origin = city("Atlanta");
    let candidates = vec![
        create_donor(BloodType::OPositive, origin),
        create_donor(BloodType::OPositive, city("Los Angeles")),
    ];

    let result = match_donors(origin, candidates, None, BloodTypeFilter::All);

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].distance, 0.0);
}

#[test]
fn test_boundary_and_order() {
    let origin = city("Atlanta");
    let candidates = vec![
        create_donor(BloodType::APositive, miles_north(origin, 5.1)),
        create_donor(BloodType::APositive, miles_north(origin, 1.2)),
        create_donor(BloodType::APositive, miles_north(origin, 4.9999)),
        create_donor(BloodType::APositive, miles_north(origin, 3.7)),
        create_donor(BloodType::APositive, miles_north(origin, 0.5)),
    ];

    let result = match_donors(origin, candidates, Some(5.0), BloodTypeFilter::All);

    let distances: Vec<f64> = result.iter().map(|m| m.distance).collect();
    assert_eq!(distances, vec![0.5, 1.2, 3.7, 5.0]);
}

#[test]
fn test_concrete_filter_only_returns_that_type() {
    let origin = city("Quito");
    let candidates: Vec<DonorCandidate> = BloodType::ALL
        .iter()
        .enumerate()
        .map(|(i, bt)| create_donor(*bt, miles_north(origin, i as f64 * 0.4)))
        .collect();

    for bt in BloodType::ALL {
        let result = match_donors(origin, candidates.clone(), Some(5.0), BloodTypeFilter::Only(bt));
        assert_eq!(result.len(), 1);
        assert!(result.iter().all(|m| m.donor.blood_type == bt));
    }

    let all = match_donors(origin, candidates, Some(5.0), BloodTypeFilter::All);
    assert_eq!(all.len(), 8);
}

#[test]
fn test_all_sentinel_parses_to_no_filter() {
    let filter: BloodTypeFilter = "all".parse().unwrap();
    assert_eq!(filter, BloodTypeFilter::All);
    assert_eq!(filter.blood_type(), None);
}
