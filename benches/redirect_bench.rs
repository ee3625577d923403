// benches/redirect_bench.rs
//! Benchmarks for the per-request decision and rewrite path.

use bytes::Bytes;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use http::Request;
use request_forwarder::{RedirectConfig, Redirector};

fn request(url: &str) -> Request<Bytes> {
    Request::builder().uri(url).body(Bytes::new()).unwrap()
}

fn bench_apply(c: &mut Criterion) {
    let active = Redirector::new();
    active
        .activate(
            RedirectConfig::new("bench-token")
                .with_base_url("https://fw.bench.example")
                .with_hosts(["api.bench.example"]),
        )
        .unwrap();

    c.bench_function("apply_rewrite", |b| {
        b.iter(|| black_box(active.apply(request("https://api.bench.example/v1/data?page=2"))))
    });

    c.bench_function("apply_passthrough", |b| {
        b.iter(|| black_box(active.apply(request("https://other.example.com/v1/data"))))
    });

    let inactive = Redirector::new();
    c.bench_function("apply_inactive", |b| {
        b.iter(|| black_box(inactive.apply(request("https://api.bench.example/v1/data"))))
    });
}

criterion_group!(benches, bench_apply);
criterion_main!(benches);
