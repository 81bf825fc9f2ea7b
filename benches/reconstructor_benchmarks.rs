//! Benchmarks for per-sample filter cost

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tablet_reconstructor::filters::{
    exponential::ExponentialSmoother, reverse_ema, Passthrough, PositionFilter, Reconstructor,
};
use tablet_reconstructor::pipeline::{DeviceReport, PipelineElement, ReconstructorElement};
use tablet_reconstructor::Sample;

type FilterFactory = fn() -> Box<dyn PositionFilter>;

fn passthrough() -> Box<dyn PositionFilter> {
    Box::new(Passthrough)
}

fn reconstructor() -> Box<dyn PositionFilter> {
    Box::new(Reconstructor::with_params(0.5, -1.0))
}

fn reconstructor_with_cutoff() -> Box<dyn PositionFilter> {
    Box::new(Reconstructor::with_params(0.2, 50.0))
}

fn exponential() -> Box<dyn PositionFilter> {
    Box::new(ExponentialSmoother::new(0.5))
}

fn test_stream() -> Vec<Sample> {
    // Pen strokes with a little sensor jitter
    (0..100)
        .map(|i| {
            let t = f64::from(i) * 0.1;
            Sample::new(
                2000.0 + 400.0 * t.sin() + 0.5 * rand::random::<f64>(),
                1500.0 + 300.0 * t.cos() + 0.5 * rand::random::<f64>(),
            )
        })
        .collect()
}

fn benchmark_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("filters");
    let data = test_stream();

    let filter_configs: [(&str, FilterFactory); 4] = [
        ("passthrough", passthrough),
        ("reconstructor_0.5", reconstructor),
        ("reconstructor_0.2_cutoff", reconstructor_with_cutoff),
        ("exponential_0.5", exponential),
    ];

    for (name, factory) in filter_configs {
        let mut filter = factory();
        filter.apply(data[0]);
        group.bench_with_input(BenchmarkId::new("single_sample", name), &data[1], |b, &sample| {
            b.iter(|| black_box(filter.apply(black_box(sample))));
        });

        group.bench_with_input(BenchmarkId::new("stream_100", name), &data, |b, data| {
            b.iter(|| {
                let mut filter = factory();
                for &sample in data {
                    black_box(filter.apply(black_box(sample)));
                }
            });
        });
    }

    group.finish();
}

fn benchmark_reverse_ema(c: &mut Criterion) {
    let last = Sample::new(100.0, 100.0);
    let current = Sample::new(103.0, 104.0);

    let mut group = c.benchmark_group("reverse_ema");
    group.bench_function("inverted", |b| {
        b.iter(|| black_box(reverse_ema(black_box(current), black_box(last), 0.5, -1.0)));
    });
    group.bench_function("cut_off", |b| {
        b.iter(|| black_box(reverse_ema(black_box(current), black_box(last), 0.5, 1.0)));
    });
    group.finish();
}

fn benchmark_pipeline_element(c: &mut Criterion) {
    let data = test_stream();
    let reports: Vec<DeviceReport> = data.iter().copied().map(DeviceReport::at).collect();

    c.bench_function("pipeline_stream_100", |b| {
        b.iter(|| {
            let mut element = ReconstructorElement::default();
            let mut out: Vec<DeviceReport> = Vec::with_capacity(reports.len());
            for report in &reports {
                element.consume(report.clone(), &mut out);
            }
            black_box(out)
        });
    });
}

criterion_group!(
    benches,
    benchmark_filters,
    benchmark_reverse_ema,
    benchmark_pipeline_element
);
criterion_main!(benches);
