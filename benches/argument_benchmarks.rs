use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use raspicam::{
    options::convert_time_unit, CameraControls, ExposureMode, LoadOptions, MockRunner, Raspistill,
    StillOptions, TimeUnit,
};
use std::hint::black_box;

/// Benchmark building the argument list from a configured camera
fn bench_argument_building(c: &mut Criterion) {
    let mut camera = Raspistill::new().with_runner(MockRunner::new());
    camera
        .flip(true)
        .exposure(ExposureMode::Night)
        .contrast(20)
        .expect("Should set contrast")
        .iso(400)
        .expect("Should set ISO")
        .quality(90)
        .expect("Should set quality");

    c.bench_function("argument_building", |b| b.iter(|| black_box(camera.arguments())));

    c.bench_function("command_line_rendering", |b| {
        b.iter(|| black_box(camera.command().to_string()))
    });
}

/// Benchmark EXIF accumulation up to the tag limit
fn bench_exif_tags(c: &mut Criterion) {
    for count in [1usize, 8, 32] {
        c.bench_with_input(BenchmarkId::new("exif_tags", count), &count, |b, &count| {
            b.iter(|| {
                let mut camera = Raspistill::new();
                for i in 0..count {
                    camera
                        .add_exif(&format!("IFD0.Tag{i}"), "value")
                        .expect("Should add tag");
                }
                black_box(camera.arguments())
            })
        });
    }
}

/// Benchmark time unit conversion
fn bench_time_conversion(c: &mut Criterion) {
    c.bench_function("time_conversion", |b| {
        b.iter(|| {
            for unit in TimeUnit::ALL {
                black_box(
                    convert_time_unit(black_box(1.54), unit, TimeUnit::Microsecond)
                        .expect("Should convert"),
                );
            }
        })
    });
}

/// Benchmark loading options from JSON and applying them
fn bench_options_loading(c: &mut Criterion) {
    let json = r#"{
        "contrast": 50,
        "iso": 500,
        "exposure": "backlight",
        "shutter_speed": {"value": 4000, "unit": "ms"},
        "quality": 80,
        "exif": [{"name": "IFD0.Artist", "value": "me"}]
    }"#;

    c.bench_function("options_loading", |b| {
        b.iter(|| {
            let options = StillOptions::from_json_str(black_box(json)).expect("Should parse");
            Raspistill::with_options(&options).expect("Should apply")
        })
    });
}

criterion_group!(
    benches,
    bench_argument_building,
    bench_exif_tags,
    bench_time_conversion,
    bench_options_loading
);
criterion_main!(benches);
