//! Scalar thresholding of a single channel.
//!
//! Semantics follow the usual 8-bit conventions: the threshold is floored to
//! an integer `t` and `max_value` is rounded and saturated to a byte.
//!
//! ```text
//! Binary     : src > t ? max : 0
//! BinaryInv  : src > t ? 0   : max
//! Trunc      : src > t ? t   : src
//! ToZero     : src > t ? src : 0
//! ToZeroInv  : src > t ? 0   : src
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Result, SegError};
use crate::histogram;
use crate::image::Plane;

/// How samples are mapped relative to the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdKind {
    #[default]
    Binary,
    BinaryInv,
    Trunc,
    ToZero,
    ToZeroInv,
}

impl ThresholdKind {
    /// Whether the output only ever holds `0` or `max_value`.
    pub const fn is_binary(&self) -> bool {
        matches!(self, Self::Binary | Self::BinaryInv)
    }

    fn apply(&self, v: u8, t: i32, max: u8) -> u8 {
        let above = v as i32 > t;
        match self {
            Self::Binary => if above { max } else { 0 },
            Self::BinaryInv => if above { 0 } else { max },
            Self::Trunc => if above { t.clamp(0, 255) as u8 } else { v },
            Self::ToZero => if above { v } else { 0 },
            Self::ToZeroInv => if above { 0 } else { v },
        }
    }
}

/// Threshold a plane, returning the threshold used and the output plane.
///
/// The returned level is `thresh` floored, the value samples were compared
/// against.
pub fn threshold(
    plane: &Plane,
    thresh: f32,
    max_value: f32,
    kind: ThresholdKind,
) -> Result<(f32, Plane)> {
    if !thresh.is_finite() {
        return Err(SegError::InvalidArgument("threshold must be finite"));
    }
    let max = saturate(max_value)?;
    let used = thresh.floor();
    // Anything outside [-1, 255] compares the same as the nearest bound.
    let t = used.clamp(-1.0, 255.0) as i32;
    Ok((used, apply(plane, t, max, kind)))
}

/// Threshold a plane at the level that maximises between-class variance
/// (Otsu's method). Returns the chosen level with the output plane.
///
/// A plane with fewer than two distinct values has no split and gets level
/// `0`, so `Binary` selects every non-zero sample.
pub fn threshold_otsu(plane: &Plane, max_value: f32, kind: ThresholdKind) -> Result<(f32, Plane)> {
    let max = saturate(max_value)?;
    let t = otsu_level(plane);
    tracing::debug!("otsu level {t} over {} samples", plane.data.len());
    Ok((t as f32, apply(plane, t as i32, max, kind)))
}

fn otsu_level(plane: &Plane) -> u8 {
    let hist = histogram::compute(plane);
    let total = hist.total as f64;
    let sum_all: f64 = hist
        .bins
        .iter()
        .enumerate()
        .map(|(v, &n)| v as f64 * n as f64)
        .sum();

    let mut w0 = 0.0_f64;
    let mut sum0 = 0.0_f64;
    let mut best = (0u8, 0.0_f64);

    for (t, &n) in hist.bins.iter().enumerate() {
        w0 += n as f64;
        if w0 == 0.0 {
            continue;
        }
        let w1 = total - w0;
        if w1 == 0.0 {
            break;
        }
        sum0 += t as f64 * n as f64;
        let mu0 = sum0 / w0;
        let mu1 = (sum_all - sum0) / w1;
        let between = w0 * w1 * (mu0 - mu1) * (mu0 - mu1);
        if between > best.1 {
            best = (t as u8, between);
        }
    }

    best.0
}

fn apply(plane: &Plane, t: i32, max: u8, kind: ThresholdKind) -> Plane {
    Plane {
        width: plane.width,
        height: plane.height,
        data: plane.data.iter().map(|&v| kind.apply(v, t, max)).collect(),
    }
}

fn saturate(max_value: f32) -> Result<u8> {
    if !max_value.is_finite() {
        return Err(SegError::InvalidArgument("max_value must be finite"));
    }
    Ok(max_value.round().clamp(0.0, 255.0) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp() -> Plane {
        Plane::from_fn(16, 16, |x, y| (y * 16 + x) as u8)
    }

    #[test]
    fn test_binary_is_strictly_greater() {
        let (ret, out) = threshold(&ramp(), 200.0, 255.0, ThresholdKind::Binary).unwrap();
        assert_eq!(ret, 200.0);
        assert_eq!(out.data[200], 0);
        assert_eq!(out.data[201], 255);
        assert_eq!(out.data.iter().filter(|&&v| v == 255).count(), 55);
    }

    #[test]
    fn test_fractional_threshold_is_floored() {
        let (_, a) = threshold(&ramp(), 110.0, 255.0, ThresholdKind::Binary).unwrap();
        let (_, b) = threshold(&ramp(), 110.9, 255.0, ThresholdKind::Binary).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_returns_floored_threshold() {
        let plane = Plane::new(3, 1, vec![109, 110, 111]).unwrap();
        let (used, out) = threshold(&plane, 110.9, 255.0, ThresholdKind::Binary).unwrap();
        assert_eq!(used, 110.0);
        assert_eq!(out.data, vec![0, 0, 255]);

        // Out-of-range levels are floored but not clamped.
        let (used, _) = threshold(&plane, -3.5, 255.0, ThresholdKind::Binary).unwrap();
        assert_eq!(used, -4.0);
        let (used, _) = threshold(&plane, 300.2, 255.0, ThresholdKind::Binary).unwrap();
        assert_eq!(used, 300.0);
    }

    #[test]
    fn test_binary_inv_complements_binary() {
        let (_, bin) = threshold(&ramp(), 110.0, 255.0, ThresholdKind::Binary).unwrap();
        let (_, inv) = threshold(&ramp(), 110.0, 255.0, ThresholdKind::BinaryInv).unwrap();
        for (a, b) in bin.data.iter().zip(&inv.data) {
            assert_eq!(a ^ b, 255);
        }
    }

    #[test]
    fn test_trunc_and_tozero() {
        let plane = Plane::new(4, 1, vec![0, 100, 150, 255]).unwrap();
        let (_, trunc) = threshold(&plane, 120.0, 255.0, ThresholdKind::Trunc).unwrap();
        assert_eq!(trunc.data, vec![0, 100, 120, 120]);
        let (_, zero) = threshold(&plane, 120.0, 255.0, ThresholdKind::ToZero).unwrap();
        assert_eq!(zero.data, vec![0, 0, 150, 255]);
        let (_, zero_inv) = threshold(&plane, 120.0, 255.0, ThresholdKind::ToZeroInv).unwrap();
        assert_eq!(zero_inv.data, vec![0, 100, 0, 0]);
    }

    #[test]
    fn test_max_value_saturates() {
        let plane = Plane::filled(1, 1, 50);
        let (_, out) = threshold(&plane, 0.0, 1000.0, ThresholdKind::Binary).unwrap();
        assert_eq!(out.data, vec![255]);
        let (_, out) = threshold(&plane, 0.0, 1.0, ThresholdKind::Binary).unwrap();
        assert_eq!(out.data, vec![1]);
    }

    #[test]
    fn test_out_of_range_thresholds() {
        let (_, all) = threshold(&ramp(), -10.0, 255.0, ThresholdKind::Binary).unwrap();
        assert!(all.data.iter().all(|&v| v == 255));
        let (_, none) = threshold(&ramp(), 300.0, 255.0, ThresholdKind::Binary).unwrap();
        assert!(none.data.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_non_finite_is_rejected() {
        assert!(threshold(&ramp(), f32::NAN, 255.0, ThresholdKind::Binary).is_err());
        assert!(threshold(&ramp(), 1.0, f32::INFINITY, ThresholdKind::Binary).is_err());
    }

    #[test]
    fn test_otsu_splits_bimodal_plane() {
        let plane = Plane::from_fn(10, 10, |x, _| if x < 3 { 10 } else { 200 });
        let (level, out) = threshold_otsu(&plane, 255.0, ThresholdKind::Binary).unwrap();
        assert!((10.0..200.0).contains(&level), "level {level}");
        assert_eq!(out.data.iter().filter(|&&v| v == 255).count(), 70);
    }

    #[test]
    fn test_otsu_uniform_plane_uses_level_zero() {
        let plane = Plane::filled(5, 5, 128);
        let (level, out) = threshold_otsu(&plane, 255.0, ThresholdKind::Binary).unwrap();
        assert_eq!(level, 0.0);
        assert!(out.data.iter().all(|&v| v == 255));

        let (level, out) = threshold_otsu(&Plane::filled(5, 5, 0), 255.0, ThresholdKind::Binary).unwrap();
        assert_eq!(level, 0.0);
        assert!(out.data.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_otsu_picks_lowest_of_equal_splits() {
        let plane = Plane::from_fn(10, 10, |x, _| if x < 3 { 10 } else { 200 });
        let (level, _) = threshold_otsu(&plane, 255.0, ThresholdKind::Binary).unwrap();
        assert_eq!(level, 10.0);
    }
}
