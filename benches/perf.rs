use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use footdata_terminal::api::{Fixture, parse_fixtures_json};
use footdata_terminal::leagues::TrackedLeagues;
use footdata_terminal::reconcile::merge_live_batch;
use footdata_terminal::state::{AppState, Delta, apply_delta};
use footdata_terminal::status::classify;

fn sample_fixture(id: u32, league_id: u32, status: &str) -> Fixture {
    let base = parse_fixtures_json(FIXTURES_JSON).expect("valid fixture json");
    Fixture {
        id,
        league_id,
        status: status.to_string(),
        ..base[0].clone()
    }
}

fn day_of_fixtures(count: u32) -> Vec<Fixture> {
    (0..count)
        .map(|i| {
            let status = match i % 4 {
                0 => "NS",
                1 => "1H",
                2 => "2H",
                _ => "FT",
            };
            sample_fixture(i, [39, 140, 78, 135, 61][i as usize % 5], status)
        })
        .collect()
}

fn bench_fixtures_parse(c: &mut Criterion) {
    c.bench_function("fixtures_parse", |b| {
        b.iter(|| {
            let fixtures = parse_fixtures_json(black_box(FIXTURES_JSON)).unwrap();
            black_box(fixtures.len());
        })
    });
}

fn bench_merge_live_batch(c: &mut Criterion) {
    let existing = day_of_fixtures(300);
    let batch: Vec<Fixture> = (250..350)
        .map(|i| sample_fixture(i, 39, if i % 2 == 0 { "1H" } else { "FT" }))
        .collect();

    c.bench_function("merge_live_batch", |b| {
        b.iter(|| {
            let merged = merge_live_batch(black_box(existing.clone()), black_box(batch.clone()));
            black_box(merged.len());
        })
    });
}

fn bench_classify(c: &mut Criterion) {
    let codes = ["NS", "1H", "HT", "2H", "FT", "AET", "PEN", "SUSP", "WEIRD"];
    c.bench_function("classify", |b| {
        b.iter(|| {
            for code in codes {
                black_box(classify(black_box(code)));
            }
        })
    });
}

fn bench_filter_and_partition(c: &mut Criterion) {
    let mut state = AppState::new();
    state.tracked = TrackedLeagues::from_ids([39, 140, 78]);
    apply_delta(&mut state, Delta::SetFixtures(day_of_fixtures(300)));

    c.bench_function("filter_and_partition", |b| {
        b.iter(|| {
            let counts = state.bucket_counts();
            black_box(counts.live + counts.upcoming + counts.finished);
        })
    });
}

criterion_group!(
    perf,
    bench_fixtures_parse,
    bench_merge_live_batch,
    bench_classify,
    bench_filter_and_partition
);
criterion_main!(perf);

static FIXTURES_JSON: &str = include_str!("../tests/fixtures/fixtures.json");
