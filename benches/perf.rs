use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use profile_terminal::active_tracks::compute_active_tracks;
use profile_terminal::stats_load::parse_member_stats_json;

fn bench_member_stats_parse(c: &mut Criterion) {
    c.bench_function("member_stats_parse", |b| {
        b.iter(|| {
            let stats = parse_member_stats_json(black_box(MEMBER_STATS_JSON)).unwrap();
            black_box(stats.develop.is_some());
        })
    });
}

fn bench_active_tracks_compute(c: &mut Criterion) {
    let stats = parse_member_stats_json(MEMBER_STATS_JSON).unwrap();
    c.bench_function("active_tracks_compute", |b| {
        b.iter(|| {
            let tracks = compute_active_tracks(black_box(&stats), black_box(false));
            black_box(tracks.len());
        })
    });
}

criterion_group!(perf, bench_member_stats_parse, bench_active_tracks_compute);
criterion_main!(perf);

static MEMBER_STATS_JSON: &str = include_str!("../tests/fixtures/member_stats.json");
