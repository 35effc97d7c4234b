use nalgebra::Point3;

use crate::{
    common::Ray,
    volumetric::{object_to_texture, Volume},
};

use super::render_params::{MAX_STEPS, MIN_STEP_SIZE};

/// One sample along a ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Distance from ray origin
    pub t: f32,
    /// Object space position
    pub position: Point3<f32>,
    /// Normalized intensity
    pub value: f32,
}

/// Number of samples covering `<t0;t1>`, capped at [`MAX_STEPS`]
pub fn step_count(t0: f32, t1: f32, step_size: f32) -> usize {
    let steps = ((t1 - t0) / step_size).ceil();
    if steps.is_nan() || steps <= 0.0 {
        0
    } else if steps >= MAX_STEPS as f32 {
        MAX_STEPS
    } else {
        steps as usize
    }
}

/// Lazy sequence of samples along `ray`, starting at `t0`.
///
/// Sample `i` is taken at `t0 + i * step_size`, positions are computed from
/// the index so there is no accumulated drift.
pub struct RaySamples<'a, V>
where
    V: Volume + ?Sized,
{
    volume: &'a V,
    ray: Ray,
    t0: f32,
    step_size: f32,
    steps: usize,
    current: usize,
}

impl<'a, V> RaySamples<'a, V>
where
    V: Volume + ?Sized,
{
    /// Samples of `ray` on the interval `<t0;t1>`.
    ///
    /// Step size that is not positive and finite is replaced by [`MIN_STEP_SIZE`].
    pub fn new(volume: &'a V, ray: Ray, t0: f32, t1: f32, step_size: f32) -> Self {
        let step_size = if step_size.is_finite() && step_size > 0.0 {
            step_size
        } else {
            MIN_STEP_SIZE
        };
        let steps = step_count(t0, t1, step_size);
        Self {
            volume,
            ray,
            t0,
            step_size,
            steps,
            current: 0,
        }
    }
}

impl<'a, V> Iterator for RaySamples<'a, V>
where
    V: Volume + ?Sized,
{
    type Item = Sample;

    fn next(&mut self) -> Option<Sample> {
        if self.current >= self.steps {
            return None;
        }

        let t = self.t0 + self.current as f32 * self.step_size;
        self.current += 1;

        let position = self.ray.point_from_t(t);
        let value = self.volume.sample_at(object_to_texture(position));
        Some(Sample { t, position, value })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.steps - self.current;
        (remaining, Some(remaining))
    }
}

impl<'a, V> ExactSizeIterator for RaySamples<'a, V> where V: Volume + ?Sized {}
