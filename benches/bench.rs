// Criterion benchmarks for Bloodlink

use bloodlink::core::{distance::haversine_miles, filters::BloodTypeFilter, matcher::match_donors};
use bloodlink::models::{BloodType, Coordinate, DonorCandidate, EligibilityStatus};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use uuid::Uuid;

const ATLANTA: Coordinate = Coordinate { latitude: 33.7490, longitude: -84.3880 };

fn create_candidate(i: usize) -> DonorCandidate {
    let lat_offset = (i as f64 * 0.001) % 0.2;
    let lon_offset = (i as f64 * 0.0013) % 0.2;
    DonorCandidate {
        id: Uuid::new_v4(),
        name: format!("Donor {}", i),
        blood_type: BloodType::ALL[i % 8],
        latitude: ATLANTA.latitude + lat_offset - 0.1,
        longitude: ATLANTA.longitude + lon_offset - 0.1,
        eligibility_status: EligibilityStatus::Eligible,
    }
}

fn bench_haversine(c: &mut Criterion) {
    let target = Coordinate::new(34.0522, -118.2437);
    c.bench_function("haversine_miles", |b| {
        b.iter(|| haversine_miles(black_box(ATLANTA), black_box(target)));
    });
}

fn bench_matching(c: &mut Criterion) {
    let mut group = c.benchmark_group("match_donors");

    for candidate_count in [10, 100, 1000, 10_000].iter() {
        let candidates: Vec<DonorCandidate> = (0..*candidate_count).map(create_candidate).collect();

        group.bench_with_input(
            BenchmarkId::new("all_types", candidate_count),
            candidate_count,
            |b, _| {
                b.iter(|| {
                    match_donors(
                        black_box(ATLANTA),
                        black_box(candidates.clone()),
                        black_box(Some(5.0)),
                        BloodTypeFilter::All,
                    )
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("single_type", candidate_count),
            candidate_count,
            |b, _| {
                b.iter(|| {
                    match_donors(
                        black_box(ATLANTA),
                        black_box(candidates.clone()),
                        black_box(Some(5.0)),
                        BloodTypeFilter::Only(BloodType::ONegative),
                    )
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_haversine, bench_matching);

criterion_main!(benches);
