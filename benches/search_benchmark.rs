use chrono::{Duration, NaiveDate, Utc};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use trailbook::models::{Coordinates, Difficulty, Hike, HikeId, Parking, RouteType};
use trailbook::services::map::build_map_view;
use trailbook::services::search::filter_hikes;

/// A few years of weekend hiking, with notes long enough to make matching work.
fn sample_log(count: i64) -> Vec<Hike> {
    let start = NaiveDate::from_ymd_opt(2020, 1, 4).expect("valid date");
    (0..count)
        .map(|i| Hike {
            id: HikeId(i),
            name: format!("Trail {i}"),
            location: if i % 3 == 0 {
                "Blue Mountains".to_string()
            } else {
                "Royal National Park".to_string()
            },
            date: start + Duration::days(7 * i),
            parking: Parking::Yes,
            length: 3.0 + (i % 20) as f64,
            route_type: RouteType::Loop,
            difficulty: match i % 3 {
                0 => Difficulty::Easy,
                1 => Difficulty::Moderate,
                _ => Difficulty::Hard,
            },
            description: "Fire trail to the lookout, then down through the rainforest".to_string(),
            notes: if i % 50 == 0 {
                "Saw a lyrebird near the creek crossing".to_string()
            } else {
                "Quiet day, muddy in places".to_string()
            },
            weather: "Mild, light breeze".to_string(),
            photos: vec![],
            location_coords: (i % 4 != 0).then(|| Coordinates {
                latitude: -33.7 - (i % 40) as f64 * 0.01,
                longitude: 150.3 + (i % 25) as f64 * 0.01,
            }),
            is_completed: true,
            completed_date: Some(start + Duration::days(7 * i)),
            created_at: Utc::now(),
        })
        .collect()
}

fn benchmark_search(c: &mut Criterion) {
    let hikes = sample_log(1_000);

    let mut group = c.benchmark_group("search");

    group.bench_function("rare_match", |b| {
        b.iter(|| filter_hikes(black_box(hikes.clone()), black_box("lyrebird")))
    });

    group.bench_function("no_match", |b| {
        b.iter(|| filter_hikes(black_box(hikes.clone()), black_box("glacier")))
    });

    group.finish();
}

fn benchmark_map_view(c: &mut Criterion) {
    let hikes = sample_log(1_000);

    c.bench_function("map_view_fit_all", |b| {
        b.iter(|| build_map_view(black_box(hikes.clone()), None))
    });
}

criterion_group!(benches, benchmark_search, benchmark_map_view);
criterion_main!(benches);
