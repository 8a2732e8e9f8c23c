use criterion::{black_box, criterion_group, criterion_main, Criterion};
use entropy::color::to_lab;
use entropy::temperature::average_temperature;
use entropy::{Image, ScoringConfig, ScreenGeometry, Scorer};

fn gradient(width: u32, height: u32) -> Image {
    let mut samples = Vec::with_capacity(width as usize * height as usize * 3);
    for y in 0..height {
        for x in 0..width {
            samples.push((x * 255 / width) as u8);
            samples.push((y * 255 / height) as u8);
            samples.push(((x + y) % 256) as u8);
        }
    }
    Image::from_raw(width, height, 3, samples).expect("valid gradient")
}

fn bench_conversion(c: &mut Criterion) {
    let img = gradient(1920, 1080);

    c.bench_function("to_lab_1080p_sequential", |b| {
        b.iter(|| to_lab(black_box(&img), false))
    });

    c.bench_function("to_lab_1080p_parallel", |b| {
        b.iter(|| to_lab(black_box(&img), true))
    });
}

fn bench_temperature(c: &mut Criterion) {
    let lab = to_lab(&gradient(1920, 1080), true);

    c.bench_function("average_temperature_1080p_sequential", |b| {
        b.iter(|| average_temperature(black_box(&lab), false))
    });

    c.bench_function("average_temperature_1080p_parallel", |b| {
        b.iter(|| average_temperature(black_box(&lab), true))
    });
}

fn bench_full_score(c: &mut Criterion) {
    let img = gradient(1280, 720);
    let screen = ScreenGeometry::new(1920, 1080);
    let scorer = Scorer::new(ScoringConfig::default());

    c.bench_function("score_720p_on_1080p", |b| {
        b.iter(|| scorer.score(black_box(&img), screen))
    });
}

criterion_group!(benches, bench_conversion, bench_temperature, bench_full_score);
criterion_main!(benches);
