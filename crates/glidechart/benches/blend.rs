//! Benchmarks for snapshot blending: advance + resolve per frame.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use glidechart::{BlendConfig, SeriesKind, SeriesValue, Snapshot, SnapshotQueue};

fn dynamic_snapshot(len: usize, phase: f64) -> Snapshot {
    let values = (0..len).map(|i| (i as f64 * 0.1 + phase).sin()).collect();
    Snapshot::new(vec![SeriesValue::Dynamic(values)])
}

fn moving_snapshot(len: usize, offset: f64) -> Snapshot {
    let values = (0..len).map(|i| (i as f64 + offset).cos()).collect();
    Snapshot::new(vec![SeriesValue::moving(values, offset)])
}

fn bench_resolve_dynamic(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_dynamic");

    for len in [16, 256, 4096] {
        group.throughput(Throughput::Elements(len as u64));

        let mut queue = SnapshotQueue::new(vec![SeriesKind::Dynamic], BlendConfig::default());
        for phase in 0..3 {
            queue.push(dynamic_snapshot(len, phase as f64)).unwrap();
            queue.advance(120.0);
        }

        group.bench_with_input(BenchmarkId::new("three_blending", len), &len, |b, _| {
            b.iter(|| {
                let frame = queue.resolve().unwrap();
                black_box(frame.series.len())
            });
        });
    }

    group.finish();
}

fn bench_resolve_settled(c: &mut Criterion) {
    let mut queue = SnapshotQueue::new(vec![SeriesKind::Dynamic], BlendConfig::default());
    queue.push(dynamic_snapshot(4096, 0.0)).unwrap();
    queue.advance(1000.0);
    queue.advance(16.0);

    c.bench_function("resolve_settled_4096", |b| {
        b.iter(|| {
            let frame = queue.resolve().unwrap();
            black_box(frame[0].values().len())
        });
    });
}

fn bench_resolve_moving(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_moving");

    for len in [64, 1024] {
        group.throughput(Throughput::Elements(len as u64));

        let mut queue = SnapshotQueue::new(vec![SeriesKind::Moving], BlendConfig::default());
        for offset in 0..3 {
            queue.push(moving_snapshot(len, offset as f64)).unwrap();
            queue.advance(120.0);
        }

        group.bench_with_input(BenchmarkId::new("three_blending", len), &len, |b, _| {
            b.iter(|| {
                let frame = queue.resolve().unwrap();
                black_box(frame.series.len())
            });
        });
    }

    group.finish();
}

fn bench_push_advance_cycle(c: &mut Criterion) {
    c.bench_function("push_advance_resolve_256", |b| {
        let mut queue = SnapshotQueue::new(vec![SeriesKind::Dynamic], BlendConfig::default());
        let mut phase = 0.0;
        b.iter(|| {
            phase += 1.0;
            queue.push(dynamic_snapshot(256, phase)).unwrap();
            queue.advance(black_box(500.0));
            let frame = queue.resolve().unwrap();
            black_box(frame[0].values()[0])
        });
    });
}

criterion_group!(
    benches,
    bench_resolve_dynamic,
    bench_resolve_settled,
    bench_resolve_moving,
    bench_push_advance_cycle
);
criterion_main!(benches);
