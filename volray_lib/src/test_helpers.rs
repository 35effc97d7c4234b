//! Module with helper functions
//! Saves repetition in unit tests, integration tests and benchmarks

use std::sync::Arc;

use nalgebra::{point, vector, Vector3};

use crate::{
    camera::{CameraState, ModelTransform, PerspectiveCamera},
    render::{RenderOptions, Renderer},
    volumetric::VoxelVolume,
};

/// Every voxel set to `value`
pub fn uniform_volume(size: Vector3<usize>, value: u8) -> VoxelVolume {
    VoxelVolume::filled(size, value).unwrap()
}

/// All voxels zero
pub fn empty_volume(size: Vector3<usize>) -> VoxelVolume {
    uniform_volume(size, 0)
}

/// Solid ball of radius 0.4 (object space) in the middle of a `dim`^3 cube
pub fn ball_volume(dim: usize) -> VoxelVolume {
    let center = (dim as f32 - 1.0) / 2.0;
    let radius = 0.4 * dim as f32;
    VoxelVolume::from_fn(vector![dim, dim, dim], |x, y, z| {
        let d = vector![x as f32, y as f32, z as f32] - vector![center, center, center];
        if d.norm() <= radius {
            255
        } else {
            0
        }
    })
    .unwrap()
}

/// Camera 2 units in front of the volume (-z), looking at its center
pub fn front_camera() -> CameraState {
    let camera = PerspectiveCamera::look_at(point![0.0, 0.0, -2.0], point![0.0, 0.0, 0.0]);
    CameraState::new(camera, ModelTransform::identity())
}

/// Camera on the diagonal, looking at the center
pub fn diagonal_camera() -> CameraState {
    let camera = PerspectiveCamera::look_at(point![1.5, 1.5, -1.5], point![0.0, 0.0, 0.0]);
    CameraState::new(camera, ModelTransform::identity())
}

pub fn renderer(
    volume: VoxelVolume,
    width: u16,
    height: u16,
    multi_thread: bool,
) -> Renderer<VoxelVolume> {
    let opts = RenderOptions::builder()
        .resolution(vector![width, height])
        .multi_thread(multi_thread)
        .build()
        .unwrap();
    Renderer::new(Arc::new(volume), opts)
}

/// RGBA8 pixel at `(x, y)` of a `width` wide buffer
pub fn pixel(buffer: &[u8], width: usize, x: usize, y: usize) -> [u8; 4] {
    let i = (x + y * width) * 4;
    [buffer[i], buffer[i + 1], buffer[i + 2], buffer[i + 3]]
}
