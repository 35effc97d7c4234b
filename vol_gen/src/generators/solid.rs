use nalgebra::Vector3;

use super::SampleGenerator;

/// Empty margin around the block, in voxels
const PAD: usize = 5;

/// Generate solid volume
/// All samples inside the margin have the same value
pub struct SolidGenerator {
    /// The sample value
    sample: u8,
    pad: usize,
    dims: Vector3<usize>,
}

impl SolidGenerator {
    pub fn new(dims: Vector3<usize>, sample: u8) -> SolidGenerator {
        // Small volumes keep at least half of each side
        let pad = PAD.min(dims.iter().copied().min().unwrap_or(0) / 4);
        SolidGenerator { sample, pad, dims }
    }
}

impl SampleGenerator for SolidGenerator {
    fn sample_at(&self, coords: Vector3<usize>) -> u8 {
        let inside = coords
            .iter()
            .zip(self.dims.iter())
            .all(|(&c, &d)| c >= self.pad && c + self.pad < d);
        if inside {
            self.sample
        } else {
            0
        }
    }
}

#[cfg(test)]
mod test {

    use nalgebra::vector;

    use super::*;

    #[test]
    fn margin() {
        let gen = SolidGenerator::new(vector![20, 20, 20], 7);
        assert_eq!(gen.sample_at(vector![4, 10, 10]), 0);
        assert_eq!(gen.sample_at(vector![5, 10, 10]), 7);
        assert_eq!(gen.sample_at(vector![14, 14, 14]), 7);
        assert_eq!(gen.sample_at(vector![15, 10, 10]), 0);
    }

    #[test]
    fn small_volume() {
        let gen = SolidGenerator::new(vector![2, 2, 2], 9);
        assert_eq!(gen.sample_at(vector![0, 0, 0]), 9);
        assert_eq!(gen.sample_at(vector![1, 1, 1]), 9);
    }
}
