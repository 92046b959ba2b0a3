//! Per-pixel RGB ↔ HSV conversion.
//!
//! The 8-bit layout packs hue as degrees / 2 so the full circle fits in a
//! byte: `H ∈ [0, 180)`, `S, V ∈ [0, 255]`. Float math is delegated to
//! `palette`; this module only handles the byte quantization.
//!
//! ```text
//! V = max(R, G, B)
//! S = 255 × (V − min(R, G, B)) / V        (0 when V = 0)
//! H = hue_degrees / 2                      (0 when R = G = B)
//! ```

use palette::{FromColor, Hsv, Srgb};

/// Number of distinct 8-bit hue codes (one per two degrees).
pub const HUE_STEPS: u8 = 180;

/// Map a hue angle in degrees to its 8-bit code, wrapping at 360°.
pub fn hue_from_degrees(degrees: f32) -> u8 {
    let code = (degrees.rem_euclid(360.0) / 2.0).round() as u32;
    (code % HUE_STEPS as u32) as u8
}

/// Map an 8-bit hue code back to degrees.
pub fn hue_to_degrees(code: u8) -> f32 {
    code as f32 * 2.0
}

/// Convert normalized RGB to `[hue_degrees, saturation, value]`.
pub fn rgb_to_hsv_f32(rgb: [f32; 3]) -> [f32; 3] {
    let hsv: Hsv = Hsv::from_color(Srgb::new(rgb[0], rgb[1], rgb[2]));
    [hsv.hue.into_positive_degrees(), hsv.saturation, hsv.value]
}

/// Convert `[hue_degrees, saturation, value]` back to normalized RGB.
pub fn hsv_to_rgb_f32(hsv: [f32; 3]) -> [f32; 3] {
    let rgb: Srgb = Srgb::from_color(Hsv::new(hsv[0], hsv[1], hsv[2]));
    [rgb.red, rgb.green, rgb.blue]
}

/// Convert an 8-bit RGB pixel to 8-bit HSV.
pub fn rgb_to_hsv(rgb: [u8; 3]) -> [u8; 3] {
    let [hue, sat, _] = rgb_to_hsv_f32(rgb.map(normalize));
    let value = rgb[0].max(rgb[1]).max(rgb[2]);
    let hue = if sat > 0.0 { hue_from_degrees(hue) } else { 0 };
    [hue, quantize(sat), value]
}

/// Convert an 8-bit HSV pixel back to 8-bit RGB.
pub fn hsv_to_rgb(hsv: [u8; 3]) -> [u8; 3] {
    hsv_to_rgb_f32([hue_to_degrees(hsv[0]), normalize(hsv[1]), normalize(hsv[2])]).map(quantize)
}

#[inline]
fn normalize(v: u8) -> f32 {
    v as f32 / 255.0
}

#[inline]
fn quantize(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_primaries() {
        assert_eq!(rgb_to_hsv([255, 0, 0]), [0, 255, 255]);
        assert_eq!(rgb_to_hsv([0, 255, 0]), [60, 255, 255]);
        assert_eq!(rgb_to_hsv([0, 0, 255]), [120, 255, 255]);
        assert_eq!(rgb_to_hsv([255, 255, 0]), [30, 255, 255]);
    }

    #[test]
    fn test_gray_has_zero_hue_and_saturation() {
        assert_eq!(rgb_to_hsv([128, 128, 128]), [0, 0, 128]);
        assert_eq!(rgb_to_hsv([0, 0, 0]), [0, 0, 0]);
    }

    #[test]
    fn test_value_is_channel_max() {
        assert_eq!(rgb_to_hsv([12, 200, 99])[2], 200);
    }

    #[test]
    fn test_hue_from_degrees_wraps() {
        assert_eq!(hue_from_degrees(36.0), 18);
        assert_eq!(hue_from_degrees(60.0), 30);
        assert_eq!(hue_from_degrees(359.5), 0);
        assert_eq!(hue_from_degrees(-90.0), 135);
        assert_eq!(hue_from_degrees(720.0), 0);
    }

    #[test]
    fn test_float_roundtrip() {
        let original = [0.8, 0.4, 0.2];
        let back = hsv_to_rgb_f32(rgb_to_hsv_f32(original));
        for i in 0..3 {
            assert!(
                (original[i] - back[i]).abs() < EPSILON,
                "channel {i}: {:.6} vs {:.6}",
                original[i],
                back[i]
            );
        }
    }

    #[test]
    fn test_hsv_to_rgb_primaries() {
        assert_eq!(hsv_to_rgb([0, 255, 255]), [255, 0, 0]);
        assert_eq!(hsv_to_rgb([60, 255, 255]), [0, 255, 0]);
        assert_eq!(hsv_to_rgb([120, 255, 255]), [0, 0, 255]);
        assert_eq!(hsv_to_rgb([77, 0, 90]), [90, 90, 90]);
    }
}
