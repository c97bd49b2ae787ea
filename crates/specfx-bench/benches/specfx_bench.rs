//! Benchmarks for the specfx restoration pipeline.
//!
//! Run with: `cargo bench -p specfx-bench`

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

use specfx_core::{ComplexGrid, SampleBuffer};
use specfx_ops::{
    Contraharmonic, Direction, EngineOptions, FftEngine, FilterConfig, LengthPolicy, Notch, PipelineConfig,
    SpectralPipeline,
};

fn test_image(width: usize, height: usize) -> SampleBuffer {
    let pixels: Vec<u8> = (0..width * height).map(|i| ((i * 31 + i / width * 17) % 256) as u8).collect();
    SampleBuffer::from_pixels(width, height, &pixels).unwrap()
}

/// Forward 2D FFT, power-of-two versus odd sizes, sequential versus rayon.
fn bench_fft(c: &mut Criterion) {
    let mut group = c.benchmark_group("fft2d");

    for &(w, h) in &[(256usize, 256usize), (512, 512), (500, 375)] {
        let real: Vec<f64> = (0..w * h).map(|i| (i % 251) as f64).collect();
        let grid = ComplexGrid::from_real(w, h, &real).unwrap();
        group.throughput(Throughput::Elements((w * h) as u64));

        for parallel in [false, true] {
            let mut engine = FftEngine::with_options(EngineOptions {
                length_policy: LengthPolicy::Any,
                parallel,
            });
            let name = if parallel { "forward_par" } else { "forward_seq" };
            group.bench_with_input(BenchmarkId::new(name, format!("{w}x{h}")), &grid, |b, g| {
                b.iter(|| {
                    let mut work = g.clone();
                    engine.transform(black_box(&mut work), Direction::Forward).unwrap();
                    work
                })
            });
        }
    }

    group.finish();
}

/// Full restoration runs.
fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    let image = test_image(512, 512);
    group.throughput(Throughput::Elements(512 * 512));

    let filters = [
        ("ideal_low_pass", FilterConfig::ideal_low_pass(40.0).unwrap()),
        (
            "notch_reject_4",
            FilterConfig::butterworth_notch_reject(
                3.0,
                2,
                vec![
                    Notch::new(0.0, 24.0),
                    Notch::new(24.0, 0.0),
                    Notch::new(16.0, 16.0),
                    Notch::new(-16.0, 16.0),
                ],
            )
            .unwrap(),
        ),
    ];

    for (name, filter) in filters {
        let mut pipeline = SpectralPipeline::new(PipelineConfig::new(filter)).unwrap();
        group.bench_function(name, |b| b.iter(|| pipeline.run(black_box(&image)).unwrap()));
    }

    group.finish();
}

fn bench_contraharmonic(c: &mut Criterion) {
    let image = test_image(512, 512);
    let filter = Contraharmonic::new(1.5).unwrap();
    c.bench_function("contraharmonic_3x3_512", |b| b.iter(|| filter.apply(black_box(&image)).unwrap()));
}

criterion_group!(benches, bench_fft, bench_pipeline, bench_contraharmonic);
criterion_main!(benches);
