use std::ops::RangeInclusive;

use nalgebra::{vector, Vector3};

use super::SampleGenerator;

/// Generate volume with a number of randomly placed spheres
pub struct SpheresGenerator {
    spheres: Vec<Sphere>,
}

impl SpheresGenerator {
    pub fn new(
        dims: Vector3<usize>,
        n_of_shapes: usize,
        radius: usize,
        sample: u8,
        seed: Option<u64>,
    ) -> SpheresGenerator {
        let random_sphere_gen = SphereGenerator::new(dims, radius, radius / 4, sample, 10, seed);
        let spheres = random_sphere_gen.get_spheres(n_of_shapes);
        SpheresGenerator { spheres }
    }

    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }
}

impl SampleGenerator for SpheresGenerator {
    fn sample_at(&self, coords: Vector3<usize>) -> u8 {
        let pos = coords.cast::<f32>();
        // First sphere wins where they overlap
        self.spheres
            .iter()
            .find(|s| s.contains(&pos))
            .map_or(0, |s| s.sample)
    }
}

/// One sphere in volume, in voxel coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Vector3<f32>,
    pub radius: f32,
    pub sample: u8,
}

impl Sphere {
    fn contains(&self, pos: &Vector3<f32>) -> bool {
        (pos - self.center).magnitude_squared() <= self.radius * self.radius
    }
}

/// Generate spheres
/// Helper type
struct SphereGenerator {
    rng: fastrand::Rng,
    vol_dims: Vector3<usize>,
    radius: usize,
    radius_variance: usize,
    sample: u8,
    sample_variance: u8,
}

impl SphereGenerator {
    fn new(
        vol_dims: Vector3<usize>,
        radius: usize,
        radius_variance: usize,
        sample: u8,
        sample_variance: u8,
        seed: Option<u64>,
    ) -> Self {
        let rng = fastrand::Rng::new();
        if let Some(seed) = seed {
            rng.seed(seed);
        }

        Self {
            rng,
            vol_dims,
            radius,
            radius_variance,
            sample,
            sample_variance,
        }
    }

    fn get_spheres(&self, n: usize) -> Vec<Sphere> {
        (0..n).map(|_| self.get_sphere()).collect()
    }

    /// Range of centers keeping a sphere of `radius` inside a side of length `dim`
    fn center_range(dim: usize, radius: usize) -> RangeInclusive<usize> {
        if dim > 2 * radius {
            radius..=(dim - 1 - radius)
        } else {
            // Does not fit, stay in the middle
            dim / 2..=dim / 2
        }
    }

    fn get_sphere(&self) -> Sphere {
        let low = self.radius.saturating_sub(self.radius_variance);
        let high = self.radius + self.radius_variance;
        let radius = self.rng.usize(low..=high);

        let d = self.vol_dims;
        let center = vector![
            self.rng.usize(Self::center_range(d.x, radius)),
            self.rng.usize(Self::center_range(d.y, radius)),
            self.rng.usize(Self::center_range(d.z, radius))
        ];

        Sphere {
            center: center.cast::<f32>(),
            radius: radius as f32,
            sample: self.random_sample(),
        }
    }

    fn random_sample(&self) -> u8 {
        // Uses saturating intrinsics, so there is no overflow
        let low = self.sample.saturating_sub(self.sample_variance).max(1);
        let high = self.sample.saturating_add(self.sample_variance);
        self.rng.u8(low..=high)
    }
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn spheres_inside_volume() {
        let dims = vector![64, 32, 48];
        let gen = SpheresGenerator::new(dims, 20, 8, 200, Some(7));

        assert_eq!(gen.spheres().len(), 20);
        for s in gen.spheres() {
            assert!(s.radius >= 6.0 && s.radius <= 10.0);
            assert!(s.sample >= 190 && s.sample <= 210);
            for i in 0..3 {
                assert!(s.center[i] >= s.radius);
                assert!(s.center[i] + s.radius <= (dims[i] - 1) as f32);
            }
        }
    }

    #[test]
    fn sphere_center_has_its_sample() {
        let gen = SpheresGenerator::new(vector![32, 32, 32], 1, 4, 100, Some(3));
        let s = gen.spheres()[0];
        let c = s.center.map(|v| v as usize);

        assert_eq!(gen.sample_at(c), s.sample);
        assert_eq!(gen.sample_at(vector![0, 0, 0]), 0);
    }

    #[test]
    fn seed_is_reproducible() {
        let a = SpheresGenerator::new(vector![40, 40, 40], 5, 6, 150, Some(11));
        let b = SpheresGenerator::new(vector![40, 40, 40], 5, 6, 150, Some(11));
        assert_eq!(a.spheres(), b.spheres());
    }

    #[test]
    fn too_small_volume() {
        let gen = SpheresGenerator::new(vector![4, 4, 4], 3, 10, 50, Some(1));
        for s in gen.spheres() {
            assert_eq!(s.center, vector![2.0, 2.0, 2.0]);
        }
    }
}
