//! Per-channel range tests.
//!
//! A pixel is selected iff every channel lies within its inclusive
//! `[lower, upper]` bound. A bound with `lower > upper` selects nothing;
//! hue bands that straddle 0° are built from two ranges and a mask union.

use serde::{Deserialize, Serialize};

use crate::image::{ColorImage, Plane};
use crate::segment::mask::Mask;

/// Inclusive lower/upper bounds for each of the three channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorRange {
    pub lower: [u8; 3],
    pub upper: [u8; 3],
}

impl ColorRange {
    pub const fn new(lower: [u8; 3], upper: [u8; 3]) -> Self {
        Self { lower, upper }
    }

    /// HSV range covering a hue band given in degrees, any saturation and value.
    pub fn hue_band(from_degrees: f32, to_degrees: f32) -> Self {
        Self {
            lower: [hue_code(from_degrees), 0, 0],
            upper: [hue_code(to_degrees), 255, 255],
        }
    }

    /// Restrict the second channel (saturation for HSV).
    pub const fn with_saturation(mut self, lower: u8, upper: u8) -> Self {
        self.lower[1] = lower;
        self.upper[1] = upper;
        self
    }

    /// Restrict the third channel (value for HSV).
    pub const fn with_value(mut self, lower: u8, upper: u8) -> Self {
        self.lower[2] = lower;
        self.upper[2] = upper;
        self
    }

    /// Whether every channel of `px` lies within its bound.
    #[inline]
    pub fn contains(&self, px: [u8; 3]) -> bool {
        (0..3).all(|c| self.lower[c] <= px[c] && px[c] <= self.upper[c])
    }
}

/// Clamp (rather than wrap) a hue angle so 360° stays at the top of the band.
fn hue_code(degrees: f32) -> u8 {
    (degrees / 2.0).round().clamp(0.0, 179.0) as u8
}

/// Select the pixels of a three-channel image that fall inside `range`.
pub fn in_range(image: &ColorImage, range: &ColorRange) -> Mask {
    Mask::from_bools(
        image.width,
        image.height,
        image.pixels.iter().map(|&px| range.contains(px)),
    )
}

/// Select the samples of a plane within the inclusive `[lower, upper]` bound.
pub fn in_range_plane(plane: &Plane, lower: u8, upper: u8) -> Mask {
    Mask::from_bools(
        plane.width,
        plane.height,
        plane.data.iter().map(|&v| lower <= v && v <= upper),
    )
}
