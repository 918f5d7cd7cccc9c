//! Query rendering benchmarks
//!
//! Measures end-to-end render cost for a representative query and the
//! dynamic decode path.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fluxcraft::{
    AggregateWindowPipe, Duration, FluxFilter, FluxQuery, Reducer, TopPipe, Transform,
    TransformInput,
};

fn representative_query() -> FluxQuery {
    FluxQuery::new("telemetry")
        .timezone("Europe/Berlin")
        .start("-24h")
        .stop("now()")
        .filter(
            FluxFilter::new()
                .measurement("cpu")
                .field("usage_idle")
                .tag_key("host")
                .tag_match("web-.*"),
        )
        .transform(Transform::AggregateWindow(AggregateWindowPipe {
            func: Reducer::Mean,
            every: Duration::from("5m"),
            period: None,
            column: None,
            time_src: None,
            time_dst: None,
            create_empty: Some(false),
        }))
        .transform(Transform::Top(TopPipe {
            n: 10,
            columns: vec!["_value".to_string()],
        }))
}

fn bench_render(c: &mut Criterion) {
    let query = representative_query();
    c.bench_function("render_representative_query", |b| {
        b.iter(|| black_box(&query).render().unwrap())
    });
}

fn bench_decode(c: &mut Criterion) {
    let payload = r#"{"name": "aggregateWindow", "params": {"fn": "mean", "every": "5m", "createEmpty": false}}"#;
    c.bench_function("decode_and_render_stage", |b| {
        b.iter(|| {
            let input: TransformInput = serde_json::from_str(black_box(payload)).unwrap();
            input.decode().unwrap().render().unwrap()
        })
    });
}

criterion_group!(benches, bench_render, bench_decode);
criterion_main!(benches);
