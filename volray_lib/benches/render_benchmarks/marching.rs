use crate::common::{black_box, point, test_helpers, vector, VOLUME_DIM};
use criterion::Criterion;
use volray_lib::{
    common::Ray,
    render::{marcher::RaySamples, ColorMode, RenderParameters},
    volumetric::{object_to_texture, Volume},
};

/// Single ray through the middle of the volume
pub fn march_ray(c: &mut Criterion) {
    let volume = test_helpers::ball_volume(VOLUME_DIM);
    let ray = match Ray::new(point![0.0, 0.0, -2.0], vector![0.01, 0.02, 1.0]) {
        Some(ray) => ray,
        None => return,
    };
    let step = RenderParameters::default().step_size;

    c.bench_function("March | 1 ray | step 0.01", |b| {
        b.iter(|| {
            let sum: f32 = RaySamples::new(&volume, ray, 1.5, 2.5, step)
                .map(|s| s.value)
                .sum();
            black_box(sum)
        });
    });
}

pub fn trilinear_sample(c: &mut Criterion) {
    let volume = test_helpers::ball_volume(VOLUME_DIM);
    let pos = object_to_texture(point![0.123, -0.2, 0.31]);

    c.bench_function("Sample | trilinear", |b| {
        b.iter(|| black_box(volume.sample_at(black_box(pos))));
    });
}

pub fn palette_transfer(c: &mut Criterion) {
    c.bench_function("Transfer | palette", |b| {
        b.iter(|| {
            volray_lib::render::transfer_function::transfer(
                black_box(0.37),
                ColorMode::Palette,
                0.1,
            )
        });
    });
}
