use alerting::{distance_km, AlertState, ProximityEvaluator};
use criterion::{criterion_group, criterion_main, Criterion};
use hazard_feed::{GeoPoint, HazardId, HazardRecord, HazardSnapshot, HazardStatus};
use std::hint::black_box;

fn bench_distance(c: &mut Criterion) {
    c.bench_function("haversine", |b| {
        b.iter(|| {
            distance_km(
                black_box(48.573174),
                black_box(2.319671),
                black_box(48.566757),
                black_box(2.303015),
            )
        })
    });
}

/// 1000 hazards spread around Johannesburg, none within range
fn city_snapshot() -> HazardSnapshot {
    HazardSnapshot::from_records((0..1000).map(|i| {
        let offset = 0.01 + i as f64 * 0.001;
        HazardRecord {
            id: HazardId::new(format!("h{i}")),
            location: GeoPoint {
                latitude: -26.2041 + offset,
                longitude: 28.0473 - offset,
            },
            address: format!("{i} Main Rd"),
            status: HazardStatus::Unresolved,
        }
    }))
}

fn bench_evaluate(c: &mut Criterion) {
    let evaluator = ProximityEvaluator::default();
    let snapshot = city_snapshot();
    let position = GeoPoint {
        latitude: -26.2041,
        longitude: 28.0473,
    };

    c.bench_function("evaluate_1000", |b| {
        b.iter(|| {
            let mut state = AlertState::new();
            evaluator.evaluate(black_box(Some(position)), black_box(&snapshot), &mut state)
        })
    });
}

criterion_group!(benches, bench_distance, bench_evaluate);
criterion_main!(benches);
