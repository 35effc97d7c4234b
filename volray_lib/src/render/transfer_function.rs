use std::f32::consts::TAU;

use nalgebra::{vector, Vector3};

use crate::color::{self, RGBA};

use super::ColorMode;

/// Cosine palette `a + b * cos(2pi * (c * t + d))`, per channel.
///
/// See <https://iquilezles.org/articles/palettes/>
pub fn palette(t: f32) -> Vector3<f32> {
    let a = vector![0.8, 0.5, 0.4];
    let b = vector![0.2, 0.4, 0.2];
    let c = vector![2.0, 1.0, 1.0];
    let d = vector![0.0, 0.25, 0.25];

    let phase = (c * t + d) * TAU;
    a + b.component_mul(&phase.map(f32::cos))
}

/// Map normalized sample to color and opacity.
///
/// Opacity is `value * alpha`, clamped into <0;1>, NaN maps to 0.
pub fn transfer(value: f32, mode: ColorMode, alpha: f32) -> RGBA {
    let opacity = value * alpha;
    let opacity = if opacity.is_nan() {
        0.0
    } else {
        opacity.clamp(0.0, 1.0)
    };

    match mode {
        ColorMode::Greyscale => color::mono(1.0, opacity),
        ColorMode::SingleHue => color::new(1.0, 0.0, 0.0, opacity),
        ColorMode::Palette => {
            let rgb = palette(value);
            vector![rgb.x, rgb.y, rgb.z, opacity]
        }
    }
}
