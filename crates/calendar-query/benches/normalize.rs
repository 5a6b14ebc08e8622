//! Throughput of a full normalization pass over a mixed query set.

use std::hint::black_box;

use calendar_query::{NormalizerConfig, QueryNormalizer, RawQuery};
use chrono::{TimeZone, Utc};
use criterion::{criterion_group, criterion_main, Criterion};
use serde_json::json;

fn queries() -> Vec<RawQuery> {
    vec![
        RawQuery::from_text("today"),
        RawQuery::from_text("friday morning"),
        RawQuery::from_text("from today through next friday"),
        RawQuery::from_text("anything on march 3, 2025?"),
        RawQuery::from_text("what's on next week"),
        RawQuery::from_text("show trash"),
        RawQuery::new(json!({"query": {"text": "tuesday-thursday evening"}})),
        RawQuery::new(json!({
            "start": "2024-01-10T00:00:00-08:00",
            "end": "2024-01-10T23:59:00-08:00"
        })),
        RawQuery::from_text("just tell me what's happening"),
    ]
}

fn bench_normalize(c: &mut Criterion) {
    let normalizer = QueryNormalizer::new(&NormalizerConfig::default()).unwrap();
    let now = Utc.with_ymd_and_hms(2024, 6, 12, 18, 0, 0).unwrap();
    let queries = queries();

    c.bench_function("normalize_mixed", |b| {
        b.iter(|| {
            for query in &queries {
                black_box(normalizer.normalize_at(black_box(query), now));
            }
        })
    });
}

criterion_group!(benches, bench_normalize);
criterion_main!(benches);
