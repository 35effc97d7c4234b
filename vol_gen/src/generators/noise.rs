use nalgebra::Vector3;

use super::SampleGenerator;

/// Smooth value noise.
///
/// Random values sit on a lattice with `cell_size` voxels between points,
/// samples in between are interpolated trilinearly with smoothstep weights.
pub struct NoiseGenerator {
    cell_size: usize,
    lattice_dims: Vector3<usize>,
    lattice: Vec<u8>,
}

impl NoiseGenerator {
    pub fn new(dims: Vector3<usize>, cell_size: usize, seed: Option<u64>) -> NoiseGenerator {
        let rng = fastrand::Rng::new();
        if let Some(seed) = seed {
            rng.seed(seed);
        }

        let cell_size = cell_size.max(1);
        // One extra point past the last voxel on every axis
        let lattice_dims = dims.map(|d| d / cell_size + 2);
        let lattice = (0..lattice_dims.product()).map(|_| rng.u8(..)).collect();

        NoiseGenerator {
            cell_size,
            lattice_dims,
            lattice,
        }
    }

    fn lattice_at(&self, x: usize, y: usize, z: usize) -> f32 {
        let index = x + self.lattice_dims.x * (y + self.lattice_dims.y * z);
        self.lattice[index] as f32
    }
}

fn smoothstep(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

impl SampleGenerator for NoiseGenerator {
    fn sample_at(&self, coords: Vector3<usize>) -> u8 {
        let cell = coords / self.cell_size;
        let w = coords
            .zip_map(&cell, |c, l| (c - l * self.cell_size) as f32 / self.cell_size as f32)
            .map(smoothstep);
        let (x, y, z) = (cell.x, cell.y, cell.z);

        let c00 = lerp(self.lattice_at(x, y, z), self.lattice_at(x + 1, y, z), w.x);
        let c10 = lerp(self.lattice_at(x, y + 1, z), self.lattice_at(x + 1, y + 1, z), w.x);
        let c01 = lerp(self.lattice_at(x, y, z + 1), self.lattice_at(x + 1, y, z + 1), w.x);
        let c11 = lerp(
            self.lattice_at(x, y + 1, z + 1),
            self.lattice_at(x + 1, y + 1, z + 1),
            w.x,
        );

        let c0 = lerp(c00, c10, w.y);
        let c1 = lerp(c01, c11, w.y);
        lerp(c0, c1, w.z).round().clamp(0.0, 255.0) as u8
    }
}
