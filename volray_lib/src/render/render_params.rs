use std::sync::Arc;

use nalgebra::{vector, Vector3};
use parking_lot::RwLock;

/// Smallest step the marcher accepts, substituted for non-positive step sizes
pub const MIN_STEP_SIZE: f32 = 0.001;

/// Hard cap on samples per ray.
/// Covers the longest box diagonal (`sqrt(3)`) at [`MIN_STEP_SIZE`].
pub const MAX_STEPS: usize = 4096;

/// Largest cross section half width, the volume spans <-0.5;0.5> in object space
pub const MAX_CROSS_SECTION: f32 = 0.5;

/// Accumulated opacity at which marching stops early
pub const EARLY_EXIT_ALPHA: f32 = 0.95;

/// Transfer function branch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    /// White, opacity from sample
    Greyscale,
    /// Red, opacity from sample
    SingleHue,
    /// Cosine palette, warm to cool
    Palette,
}

impl ColorMode {
    /// Map viewer color index (`1`, `2`, `3`) to mode
    pub fn from_index(index: u8) -> Option<ColorMode> {
        match index {
            1 => Some(ColorMode::Greyscale),
            2 => Some(ColorMode::SingleHue),
            3 => Some(ColorMode::Palette),
            _ => None,
        }
    }

    pub fn index(&self) -> u8 {
        match self {
            ColorMode::Greyscale => 1,
            ColorMode::SingleHue => 2,
            ColorMode::Palette => 3,
        }
    }
}

impl Default for ColorMode {
    fn default() -> Self {
        ColorMode::Greyscale
    }
}

/// Live rendering parameters.
///
/// Host mutates these between frames, the renderer reads one copy per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderParameters {
    /// Half widths of the sampling box, centered at the volume origin
    pub cross_section: Vector3<f32>,
    /// Marching increment along the ray, in object space units
    pub step_size: f32,
    pub color_mode: ColorMode,
    /// Opacity scale applied to every sample
    pub alpha: f32,
    /// Threshold carried for the host, not used by the transfer function
    pub iso_value: f32,
}

impl Default for RenderParameters {
    fn default() -> Self {
        Self {
            cross_section: vector![0.5, 0.5, 0.5],
            step_size: 0.01,
            color_mode: ColorMode::Greyscale,
            alpha: 0.1,
            iso_value: 0.0,
        }
    }
}

impl RenderParameters {
    /// Copy with every field in a range the marcher can work with.
    ///
    /// * step size that is not positive and finite becomes [`MIN_STEP_SIZE`]
    /// * alpha is clamped to <0;1>, NaN becomes the default
    /// * cross section components are made non-negative and clamped to [`MAX_CROSS_SECTION`],
    ///   non-finite values become 0.5
    pub fn sanitized(&self) -> RenderParameters {
        let defaults = RenderParameters::default();

        let step_size = if self.step_size.is_finite() && self.step_size > 0.0 {
            self.step_size
        } else {
            MIN_STEP_SIZE
        };

        let alpha = if self.alpha.is_nan() {
            defaults.alpha
        } else {
            self.alpha.clamp(0.0, 1.0)
        };

        let cross_section = self.cross_section.map(|half| {
            if half.is_finite() {
                half.abs().min(MAX_CROSS_SECTION)
            } else {
                MAX_CROSS_SECTION
            }
        });

        let iso_value = if self.iso_value.is_finite() {
            self.iso_value
        } else {
            defaults.iso_value
        };

        RenderParameters {
            cross_section,
            step_size,
            color_mode: self.color_mode,
            alpha,
            iso_value,
        }
    }

    /// Same as [`sanitized`](RenderParameters::sanitized), logs what had to be changed
    pub fn sanitized_logged(&self) -> RenderParameters {
        let clean = self.sanitized();
        if clean.step_size != self.step_size {
            log::warn!(
                "Invalid step size {}, using {}",
                self.step_size,
                clean.step_size
            );
        }
        if clean.alpha != self.alpha {
            log::warn!("Alpha {} out of range, using {}", self.alpha, clean.alpha);
        }
        if clean.iso_value != self.iso_value {
            log::warn!("Invalid iso value {}, using {}", self.iso_value, clean.iso_value);
        }
        if clean.cross_section != self.cross_section {
            log::warn!(
                "Invalid cross section {:?}, using {:?}",
                self.cross_section,
                clean.cross_section
            );
        }
        clean
    }
}

/// Parameters shared between host and renderer thread
#[derive(Clone, Default)]
pub struct SharedParameters {
    inner: Arc<RwLock<RenderParameters>>,
}

impl SharedParameters {
    pub fn new(params: RenderParameters) -> SharedParameters {
        SharedParameters {
            inner: Arc::new(RwLock::new(params)),
        }
    }

    /// Copy of current parameters
    pub fn snapshot(&self) -> RenderParameters {
        *self.inner.read()
    }

    pub fn set(&self, params: RenderParameters) {
        *self.inner.write() = params;
    }

    /// Mutate parameters in place
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut RenderParameters),
    {
        f(&mut self.inner.write());
    }
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn color_mode_index() {
        for index in 1..=3 {
            let mode = ColorMode::from_index(index).unwrap();
            assert_eq!(mode.index(), index);
        }
        assert_eq!(ColorMode::from_index(0), None);
        assert_eq!(ColorMode::from_index(4), None);
    }

    #[test]
    fn valid_parameters_untouched() {
        let params = RenderParameters {
            cross_section: vector![0.02, 0.3, 0.5],
            step_size: 0.002,
            color_mode: ColorMode::Palette,
            alpha: 0.4,
            iso_value: 0.3,
        };
        assert_eq!(params.sanitized(), params);
    }

    #[test]
    fn step_size_substituted() {
        for step_size in [0.0, -0.01, f32::NAN, f32::INFINITY] {
            let params = RenderParameters {
                step_size,
                ..Default::default()
            };
            assert_eq!(params.sanitized().step_size, MIN_STEP_SIZE);
        }
    }

    #[test]
    fn alpha_and_box_sanitized() {
        let params = RenderParameters {
            cross_section: vector![-0.2, f32::NAN, 0.1],
            alpha: 3.0,
            ..Default::default()
        };
        let clean = params.sanitized_logged();

        assert_eq!(clean.alpha, 1.0);
        assert_eq!(clean.cross_section, vector![0.2, 0.5, 0.1]);

        let params = RenderParameters {
            alpha: f32::NAN,
            ..Default::default()
        };
        assert_eq!(params.sanitized().alpha, 0.1);
    }

    #[test]
    fn oversized_box_clamped_to_volume() {
        let params = RenderParameters {
            cross_section: vector![2.0, -3.0, 0.4],
            ..Default::default()
        };
        assert_eq!(params.sanitized().cross_section, vector![0.5, 0.5, 0.4]);
    }

    #[test]
    fn sanitized_box_marched_to_the_end() {
        use crate::{
            common::{BoundBox, Ray},
            render::marcher::step_count,
        };
        use nalgebra::point;

        let params = RenderParameters {
            cross_section: vector![2.0, 2.0, 2.0],
            step_size: 0.001,
            ..Default::default()
        }
        .sanitized();

        let ray = Ray::new(point![-3.0, -3.0, -3.0], vector![1.0, 1.0, 1.0]).unwrap();
        let (t0, t1) = BoundBox::centered(params.cross_section)
            .intersect(&ray)
            .unwrap();
        let steps = step_count(t0, t1, params.step_size);

        assert!(steps < MAX_STEPS);
        assert!(steps as f32 * params.step_size >= t1 - t0);
    }

    #[test]
    fn shared_update_visible() {
        let shared = SharedParameters::new(RenderParameters::default());
        let host = shared.clone();

        host.update(|p| p.color_mode = ColorMode::SingleHue);

        assert_eq!(shared.snapshot().color_mode, ColorMode::SingleHue);
    }
}
