use std::sync::Arc;

pub use criterion::{black_box, criterion_group, criterion_main, Criterion};

pub use nalgebra::{point, vector, Point3, Vector2};
pub use volray_lib::{
    camera::{CameraState, ModelTransform, PerspectiveCamera},
    render::{ColorMode, RenderOptions, RenderParameters, Renderer},
    test_helpers,
    volumetric::VoxelVolume,
};

pub const WIDTH: u16 = 256;
pub const HEIGHT: u16 = 256;
pub const RESOLUTION: Vector2<u16> = vector![WIDTH, HEIGHT];

/// Side of the generated benchmark volume
pub const VOLUME_DIM: usize = 128;

pub const DEFAULT_CAMERA_POSITIONS: [Point3<f32>; 3] = [
    point![0.0, 0.0, -2.0],
    point![1.5, 1.5, -1.5],
    point![-1.2, 0.4, 1.6],
];

/// Everything needed to build one benchmark
pub struct BenchOptions {
    pub render_options: RenderOptions,
    pub params: RenderParameters,
    pub bench_name: String,
    pub camera_positions: &'static [Point3<f32>],
}

impl BenchOptions {
    pub fn new(
        render_options: RenderOptions,
        params: RenderParameters,
        bench_name: String,
        camera_positions: &'static [Point3<f32>],
    ) -> Self {
        Self {
            render_options,
            params,
            bench_name,
            camera_positions,
        }
    }

    /// Benchmark renders one frame per camera position per iteration
    pub fn get_benchmark(self) -> impl FnOnce(&mut Criterion) {
        move |c: &mut Criterion| {
            let volume = Arc::new(test_helpers::ball_volume(VOLUME_DIM));
            let renderer = Renderer::new(volume, self.render_options);

            let res = self.render_options.resolution;
            let states: Vec<CameraState> = self
                .camera_positions
                .iter()
                .map(|&pos| {
                    let mut camera = PerspectiveCamera::look_at(pos, point![0.0, 0.0, 0.0]);
                    camera.change_aspect_from_resolution(res.x as u32, res.y as u32);
                    CameraState::new(camera, ModelTransform::identity())
                })
                .collect();

            let mut buffer = vec![0; self.render_options.buffer_len()];
            let params = self.params;

            c.bench_function(&self.bench_name, |b| {
                b.iter(|| {
                    for state in &states {
                        renderer.render(state, &params, &mut buffer).unwrap();
                    }
                    black_box(&buffer);
                });
            });
        }
    }
}
