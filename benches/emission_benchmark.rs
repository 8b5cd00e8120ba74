use chrono::{DateTime, Duration, FixedOffset, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ecotrack::models::{EmissionRecord, MealType, TransportMode};
use ecotrack::services::aggregate::{self, Period};
use ecotrack::services::emission::{activity_at, estimate, evaluate};

const MODES: [&str; 5] = ["Walk", "Bike", "Car", "Metro", "Scooter"];
const MEALS: [&str; 3] = ["Vegan", "Vegetarian", "Non-Vegetarian"];

fn now() -> DateTime<Utc> {
    "2025-06-15T12:00:00Z".parse().expect("valid timestamp")
}

/// One record every six hours, going back about a year.
fn year_of_records() -> Vec<EmissionRecord> {
    (0..1460)
        .map(|i| {
            let log = activity_at(
                now() - Duration::hours(6 * i as i64),
                TransportMode::from(MODES[i % MODES.len()]),
                (i % 40) as f64 * 0.75,
                MealType::from(MEALS[i % MEALS.len()]),
                (i % 12) as f64 * 0.5,
                (i % 5) as f64 * 0.1,
            );
            evaluate(log).expect("valid activity")
        })
        .collect()
}

fn benchmark_estimate(c: &mut Criterion) {
    let log = activity_at(
        now(),
        TransportMode::Car,
        10.0,
        MealType::Vegetarian,
        2.5,
        1.0,
    );

    c.bench_function("estimate_single_activity", |b| {
        b.iter(|| estimate(black_box(&log)))
    });
}

fn benchmark_aggregation(c: &mut Criterion) {
    let records = year_of_records();
    let offset = FixedOffset::east_opt(5 * 3600 + 1800).expect("valid offset");

    let mut group = c.benchmark_group("aggregate_year");

    group.bench_function("total_week", |b| {
        b.iter(|| {
            aggregate::total_for_period(black_box(&records), Period::Week.predicate(now(), offset))
        })
    });

    group.bench_function("daily_totals_90", |b| {
        b.iter(|| aggregate::daily_totals(black_box(&records), 90, now(), offset))
    });

    group.finish();
}

criterion_group!(benches, benchmark_estimate, benchmark_aggregation);
criterion_main!(benches);
