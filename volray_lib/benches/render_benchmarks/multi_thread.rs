use crate::common::{
    BenchOptions, RenderOptions, RenderParameters, DEFAULT_CAMERA_POSITIONS, HEIGHT, RESOLUTION,
    WIDTH,
};
use criterion::Criterion;

pub fn render_mt(c: &mut Criterion) {
    let render_options = RenderOptions::builder()
        .resolution(RESOLUTION)
        .early_ray_termination(false)
        .multi_thread(true)
        .build_unchecked();

    let bench_options = BenchOptions::new(
        render_options,
        RenderParameters::default(),
        format!("Render MT | {WIDTH}x{HEIGHT} | no optim"),
        &DEFAULT_CAMERA_POSITIONS,
    );

    let benchmark = bench_options.get_benchmark();

    benchmark(c);
}

pub fn render_mt_ert(c: &mut Criterion) {
    let render_options = RenderOptions::builder()
        .resolution(RESOLUTION)
        .early_ray_termination(true)
        .multi_thread(true)
        .build_unchecked();

    // Finer step, more work per ray
    let params = RenderParameters {
        step_size: 0.002,
        ..Default::default()
    };

    let bench_options = BenchOptions::new(
        render_options,
        params,
        format!("Render MT | {WIDTH}x{HEIGHT} | ERT | step 0.002"),
        &DEFAULT_CAMERA_POSITIONS,
    );

    let benchmark = bench_options.get_benchmark();

    benchmark(c);
}
