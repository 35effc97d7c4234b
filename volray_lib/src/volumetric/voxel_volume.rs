use nalgebra::{vector, Point3, Vector3};

use crate::error::{VolumeError, VolumeResult};

use super::Volume;

/// Dense grid of 8-bit intensities.
///
/// Samples are laid out row-major, `x + X*y + X*Y*z`.
/// Stored data always holds exactly `X*Y*Z` bytes.
#[derive(Clone)]
pub struct VoxelVolume {
    size: Vector3<usize>,
    data: Vec<u8>,
}

impl std::fmt::Debug for VoxelVolume {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoxelVolume")
            .field("size", &self.size)
            .field("data len", &self.data.len())
            .finish()
    }
}

impl VoxelVolume {
    /// Build volume from raw samples.
    ///
    /// Buffer shorter than `size` is padded with zeros, longer buffer is truncated.
    pub fn from_raw(size: Vector3<usize>, mut data: Vec<u8>) -> VolumeResult<VoxelVolume> {
        let expected = checked_voxel_count(size)?;
        if data.len() != expected {
            warn_length(size, data.len(), expected);
            data.resize(expected, 0);
        }

        log::debug!("New voxel volume, size {size:?}");

        Ok(VoxelVolume { size, data })
    }

    /// Build volume by copying borrowed samples, e.g. a memory mapped file.
    ///
    /// Only the first `X*Y*Z` bytes are read, missing samples are zero.
    pub fn from_slice(size: Vector3<usize>, samples: &[u8]) -> VolumeResult<VoxelVolume> {
        let expected = checked_voxel_count(size)?;
        if samples.len() != expected {
            warn_length(size, samples.len(), expected);
        }

        let mut data = vec![0; expected];
        let copied = samples.len().min(expected);
        data[..copied].copy_from_slice(&samples[..copied]);

        log::debug!("New voxel volume, size {size:?}");

        Ok(VoxelVolume { size, data })
    }

    /// Cube of `dim`^3 voxels
    pub fn cube(dim: usize, data: Vec<u8>) -> VolumeResult<VoxelVolume> {
        VoxelVolume::from_raw(vector![dim, dim, dim], data)
    }

    /// Volume with every voxel set to `value`
    pub fn filled(size: Vector3<usize>, value: u8) -> VolumeResult<VoxelVolume> {
        let count = checked_voxel_count(size)?;
        VoxelVolume::from_raw(size, vec![value; count])
    }

    /// Build volume by evaluating `f` at every voxel
    pub fn from_fn<F>(size: Vector3<usize>, f: F) -> VolumeResult<VoxelVolume>
    where
        F: Fn(usize, usize, usize) -> u8,
    {
        let count = checked_voxel_count(size)?;
        let mut data = Vec::with_capacity(count);
        for z in 0..size.z {
            for y in 0..size.y {
                for x in 0..size.x {
                    data.push(f(x, y, z));
                }
            }
        }
        VoxelVolume::from_raw(size, data)
    }

    /// Raw samples
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    fn get_3d_index(&self, x: usize, y: usize, z: usize) -> usize {
        x + self.size.x * (y + self.size.y * z)
    }

    // Indices must be inside the volume
    fn voxel(&self, x: usize, y: usize, z: usize) -> f32 {
        let raw = self
            .data
            .get(self.get_3d_index(x, y, z))
            .copied()
            .unwrap_or(0);
        f32::from(raw) / 255.0
    }
}

fn warn_length(size: Vector3<usize>, actual: usize, expected: usize) {
    log::warn!(
        "Volume data holds {} bytes, {} expected for {}x{}x{}, {}",
        actual,
        expected,
        size.x,
        size.y,
        size.z,
        if actual < expected {
            "padding with zeros"
        } else {
            "truncating"
        }
    );
}

fn checked_voxel_count(size: Vector3<usize>) -> VolumeResult<usize> {
    let invalid = || VolumeError::InvalidDimensions {
        x: size.x,
        y: size.y,
        z: size.z,
    };
    if size.iter().any(|&d| d == 0) {
        return Err(invalid());
    }
    size.x
        .checked_mul(size.y)
        .and_then(|xy| xy.checked_mul(size.z))
        .ok_or_else(invalid)
}

/// Map texture coordinate to the two neighbouring voxel indices and the blend factor.
///
/// Voxel centers are at `(i + 0.5) / n`, the continuous index is clamped into `<0;n-1>`.
fn texel_coords(u: f32, n: usize) -> (usize, usize, f32) {
    let max = (n - 1) as f32;
    let c = u * n as f32 - 0.5;
    let c = if c.is_nan() { 0.0 } else { c.clamp(0.0, max) };
    let low = c.floor();
    let i0 = low as usize;
    let i1 = usize::min(i0 + 1, n - 1);
    (i0, i1, c - low)
}

impl Volume for VoxelVolume {
    fn get_size(&self) -> Vector3<usize> {
        self.size
    }

    fn sample_at(&self, pos: Point3<f32>) -> f32 {
        let (x0, x1, x_t) = texel_coords(pos.x, self.size.x);
        let (y0, y1, y_t) = texel_coords(pos.y, self.size.y);
        let (z0, z1, z_t) = texel_coords(pos.z, self.size.z);

        let lerp = |a: f32, b: f32, t: f32| a + (b - a) * t;

        // z planes
        let c00 = lerp(self.voxel(x0, y0, z0), self.voxel(x1, y0, z0), x_t);
        let c10 = lerp(self.voxel(x0, y1, z0), self.voxel(x1, y1, z0), x_t);
        let c01 = lerp(self.voxel(x0, y0, z1), self.voxel(x1, y0, z1), x_t);
        let c11 = lerp(self.voxel(x0, y1, z1), self.voxel(x1, y1, z1), x_t);

        // y lines
        let c0 = lerp(c00, c10, y_t);
        let c1 = lerp(c01, c11, y_t);

        lerp(c0, c1, z_t)
    }

    fn get_data(&self, x: usize, y: usize, z: usize) -> Option<f32> {
        if x >= self.size.x || y >= self.size.y || z >= self.size.z {
            return None;
        }
        Some(self.voxel(x, y, z))
    }

    fn get_name(&self) -> &str {
        "VoxelVolume"
    }
}
