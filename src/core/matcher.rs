use std::cmp::Ordering;

use crate::core::{
    distance::{haversine_miles, round_to_tenth},
    filters::{within_radius, BloodTypeFilter},
};
use crate::models::{Coordinate, DonorCandidate, MatchResult, NearbyRequest, OpenRequest};

/// Radius used when the caller does not supply one
pub const DEFAULT_MAX_DISTANCE_MILES: f64 = 5.0;

/// Match donors around a hospital
///
/// # Pipeline Stages
/// 1. Blood type filter (exact equality, skipped for `All`)
/// 2. Haversine distance from `origin`
/// 3. Radius filter, boundary inclusive
/// 4. Round to one decimal, stable sort ascending
///
/// Eligibility and coordinate presence are the caller's concern; every
/// candidate passed in is assumed matchable.
pub fn match_donors(
    origin: Coordinate,
    candidates: Vec<DonorCandidate>,
    max_distance_miles: Option<f64>,
    blood_type: BloodTypeFilter,
) -> Vec<MatchResult> {
    let max_distance = max_distance_miles.unwrap_or(DEFAULT_MAX_DISTANCE_MILES);

    let admitted = candidates
        .into_iter()
        .filter(|donor| blood_type.admits(donor.blood_type));

    rank_by_distance(origin, admitted, max_distance, DonorCandidate::coordinate)
        .into_iter()
        .map(|(donor, distance)| MatchResult { donor, distance })
        .collect()
}

/// Hospital requests around a donor, nearest first
pub fn nearby_requests(
    origin: Coordinate,
    requests: Vec<OpenRequest>,
    max_distance_miles: f64,
) -> Vec<NearbyRequest> {
    rank_by_distance(origin, requests, max_distance_miles, OpenRequest::coordinate)
        .into_iter()
        .map(|(request, distance)| NearbyRequest { request, distance })
        .collect()
}

fn rank_by_distance<T, I, F>(
    origin: Coordinate,
    items: I,
    max_distance_miles: f64,
    coordinate_of: F,
) -> Vec<(T, f64)>
where
    I: IntoIterator<Item = T>,
    F: Fn(&T) -> Coordinate,
{
    let mut ranked: Vec<(T, f64)> = items
        .into_iter()
        .filter_map(|item| {
            let distance = haversine_miles(origin, coordinate_of(&item));
            within_radius(distance, max_distance_miles).then(|| (item, round_to_tenth(distance)))
        })
        .collect();

    // sort_by is stable; equal distances keep input order
    ranked.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));

    ranked
}
