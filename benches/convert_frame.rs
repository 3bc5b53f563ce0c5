use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};
use edgecam_rs::capture_pipeline::{
    FrameConverter, GrayscaleConverter, PixelFormat, RawFrameBuffer, ReplayEngine,
    InferencePipeline, SensorId, SessionConfig, SimulatedDriver, TENSOR_LEN, empty_tensor,
};
use edgecam_rs::capture_pipeline::convert::{TENSOR_HEIGHT, TENSOR_WIDTH};

fn generate_mock_rgb565(seed: u8) -> Vec<u8> {
    let mut data = Vec::with_capacity(TENSOR_LEN * 2);
    for y in 0..TENSOR_HEIGHT {
        for x in 0..TENSOR_WIDTH {
            let value = ((x + y) % 256) as u8 ^ seed;
            data.push(value);
            data.push(value.rotate_left(3));
        }
    }
    data
}

fn benchmark_conversion_patterns(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert_by_pattern");

    let patterns = vec![
        (0x00, "gradient"),
        (0x5A, "mixed"),
        (0xFF, "inverted"),
    ];

    for (seed, label) in patterns {
        let frame = RawFrameBuffer::new(
            TENSOR_WIDTH,
            TENSOR_HEIGHT,
            PixelFormat::Rgb565,
            generate_mock_rgb565(seed),
        );

        group.bench_with_input(
            BenchmarkId::from_parameter(label),
            &frame,
            |b, frame| {
                let mut out = empty_tensor();
                b.iter(|| {
                    let _ = GrayscaleConverter.convert(black_box(frame), &mut out);
                });
            },
        );
    }

    group.finish();
}

fn benchmark_full_round(c: &mut Criterion) {
    let driver = SimulatedDriver::new(SensorId::Ov2640).with_fill_pixel([0x84, 0x10]);
    let engine = ReplayEngine::new(vec![0, 1, 2, 3, 4]);
    let mut pipeline = InferencePipeline::new(driver, engine, SessionConfig::default());
    if pipeline.initialize().is_err() {
        return;
    }

    c.bench_function("capture_convert_infer", |b| {
        let mut tensor = empty_tensor();
        b.iter(|| {
            let _ = pipeline.run_once(black_box(&mut tensor));
        });
    });
}

criterion_group!(
    benches,
    benchmark_conversion_patterns,
    benchmark_full_round
);
criterion_main!(benches);
