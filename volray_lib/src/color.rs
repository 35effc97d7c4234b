use nalgebra::{vector, Vector4};

/// Color with channels in <0;1>, alpha last
pub type RGBA = Vector4<f32>;

pub fn new(r: f32, g: f32, b: f32, a: f32) -> RGBA {
    vector![r, g, b, a]
}

pub fn zero() -> RGBA {
    vector![0.0, 0.0, 0.0, 0.0]
}

pub fn mono(v: f32, opacity: f32) -> RGBA {
    vector![v, v, v, opacity]
}

/// Quantize color to 8-bit channels.
/// Channels are clamped into <0;1> first, NaN maps to 0.
pub fn to_rgba8(color: &RGBA) -> [u8; 4] {
    let quantize = |v: f32| {
        if v.is_nan() {
            0
        } else {
            (v.clamp(0.0, 1.0) * 255.0).round() as u8
        }
    };
    [
        quantize(color.x),
        quantize(color.y),
        quantize(color.z),
        quantize(color.w),
    ]
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn quantize_clamps() {
        let c = new(1.7, -0.2, 0.5, f32::NAN);
        assert_eq!(to_rgba8(&c), [255, 0, 128, 0]);
    }

    #[test]
    fn quantize_zero() {
        assert_eq!(to_rgba8(&zero()), [0, 0, 0, 0]);
        assert_eq!(to_rgba8(&mono(1.0, 1.0)), [255, 255, 255, 255]);
    }
}
