use crate::common::{
    BenchOptions, ColorMode, RenderOptions, RenderParameters, DEFAULT_CAMERA_POSITIONS, HEIGHT,
    RESOLUTION, WIDTH,
};
use criterion::Criterion;

fn single_thread_options(ray_termination: bool) -> RenderOptions {
    RenderOptions::builder()
        .resolution(RESOLUTION)
        .early_ray_termination(ray_termination)
        .multi_thread(false)
        .build_unchecked()
}

pub fn render_st(c: &mut Criterion) {
    let bench_options = BenchOptions::new(
        single_thread_options(false),
        RenderParameters::default(),
        format!("Render ST | {WIDTH}x{HEIGHT} | no optim"),
        &DEFAULT_CAMERA_POSITIONS,
    );

    let benchmark = bench_options.get_benchmark();

    benchmark(c);
}

pub fn render_st_ert(c: &mut Criterion) {
    let bench_options = BenchOptions::new(
        single_thread_options(true),
        RenderParameters::default(),
        format!("Render ST | {WIDTH}x{HEIGHT} | ERT"),
        &DEFAULT_CAMERA_POSITIONS,
    );

    let benchmark = bench_options.get_benchmark();

    benchmark(c);
}

pub fn render_st_palette(c: &mut Criterion) {
    let params = RenderParameters {
        color_mode: ColorMode::Palette,
        ..Default::default()
    };
    let bench_options = BenchOptions::new(
        single_thread_options(true),
        params,
        format!("Render ST | {WIDTH}x{HEIGHT} | ERT | palette"),
        &DEFAULT_CAMERA_POSITIONS,
    );

    let benchmark = bench_options.get_benchmark();

    benchmark(c);
}
