//! Color-space conversion between the fixed representations the walkthrough uses.

pub mod hsv;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SegError};
use crate::image::{ColorImage, ColorSpace};

pub use hsv::{hsv_to_rgb, hue_from_degrees, rgb_to_hsv};

/// A supported conversion between two color spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorConversion {
    BgrToRgb,
    RgbToBgr,
    RgbToHsv,
    BgrToHsv,
    HsvToRgb,
    HsvToBgr,
}

impl ColorConversion {
    /// Space the input image must be in.
    pub const fn source(&self) -> ColorSpace {
        match self {
            Self::BgrToRgb | Self::BgrToHsv => ColorSpace::Bgr,
            Self::RgbToBgr | Self::RgbToHsv => ColorSpace::Rgb,
            Self::HsvToRgb | Self::HsvToBgr => ColorSpace::Hsv,
        }
    }

    /// Space the output image is in.
    pub const fn target(&self) -> ColorSpace {
        match self {
            Self::BgrToRgb | Self::HsvToRgb => ColorSpace::Rgb,
            Self::RgbToBgr | Self::HsvToBgr => ColorSpace::Bgr,
            Self::RgbToHsv | Self::BgrToHsv => ColorSpace::Hsv,
        }
    }

    /// Find the conversion between two spaces, if one exists.
    pub fn between(from: ColorSpace, to: ColorSpace) -> Option<Self> {
        use ColorSpace::*;
        match (from, to) {
            (Bgr, Rgb) => Some(Self::BgrToRgb),
            (Rgb, Bgr) => Some(Self::RgbToBgr),
            (Rgb, Hsv) => Some(Self::RgbToHsv),
            (Bgr, Hsv) => Some(Self::BgrToHsv),
            (Hsv, Rgb) => Some(Self::HsvToRgb),
            (Hsv, Bgr) => Some(Self::HsvToBgr),
            _ => None,
        }
    }

    fn apply(&self, px: [u8; 3]) -> [u8; 3] {
        let swap = |p: [u8; 3]| [p[2], p[1], p[0]];
        match self {
            Self::BgrToRgb | Self::RgbToBgr => swap(px),
            Self::RgbToHsv => rgb_to_hsv(px),
            Self::BgrToHsv => rgb_to_hsv(swap(px)),
            Self::HsvToRgb => hsv_to_rgb(px),
            Self::HsvToBgr => swap(hsv_to_rgb(px)),
        }
    }
}

/// Convert an image to another color space, producing a new image.
///
/// Fails with [`SegError::ColorSpaceMismatch`] when the image is not in the
/// conversion's source space.
pub fn convert_color(image: &ColorImage, conversion: ColorConversion) -> Result<ColorImage> {
    if image.space != conversion.source() {
        return Err(SegError::ColorSpaceMismatch {
            expected: conversion.source(),
            found: image.space,
        });
    }

    Ok(ColorImage {
        width: image.width,
        height: image.height,
        space: conversion.target(),
        pixels: image.pixels.iter().map(|&px| conversion.apply(px)).collect(),
    })
}

/// Convert to `target`, cloning when the image is already there.
pub fn convert_to(image: &ColorImage, target: ColorSpace) -> Result<ColorImage> {
    if image.space == target {
        return Ok(image.clone());
    }
    // Every pair of distinct spaces has a direct conversion.
    let conversion = ColorConversion::between(image.space, target).ok_or(
        SegError::ColorSpaceMismatch {
            expected: target,
            found: image.space,
        },
    )?;
    convert_color(image, conversion)
}
