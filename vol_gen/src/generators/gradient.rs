use nalgebra::Vector3;

use super::SampleGenerator;

/// Linear ramp from 0 at the first z slice to 255 at the last
pub struct GradientGenerator {
    depth: usize,
}

impl GradientGenerator {
    pub fn new(dims: Vector3<usize>) -> GradientGenerator {
        GradientGenerator { depth: dims.z }
    }
}

impl SampleGenerator for GradientGenerator {
    fn sample_at(&self, coords: Vector3<usize>) -> u8 {
        if self.depth < 2 {
            return 0;
        }
        let t = coords.z.min(self.depth - 1) as f32 / (self.depth - 1) as f32;
        (t * 255.0).round() as u8
    }
}

#[cfg(test)]
mod test {

    use nalgebra::vector;

    use super::*;

    #[test]
    fn ramp() {
        let gen = GradientGenerator::new(vector![4, 4, 6]);
        assert_eq!(gen.sample_at(vector![0, 3, 0]), 0);
        assert_eq!(gen.sample_at(vector![1, 1, 1]), 51);
        assert_eq!(gen.sample_at(vector![3, 0, 5]), 255);
    }

    #[test]
    fn single_slice() {
        let gen = GradientGenerator::new(vector![4, 4, 1]);
        assert_eq!(gen.sample_at(vector![2, 2, 0]), 0);
    }
}
