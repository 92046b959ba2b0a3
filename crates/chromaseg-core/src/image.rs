//! Image representation for the segmentation walkthrough.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::color::hsv::hsv_to_rgb;
use crate::error::{Result, SegError};
use crate::segment::mask::Mask;

/// Color space a three-channel image is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorSpace {
    /// Red, green, blue.
    Rgb,
    /// Blue, green, red (the channel order most camera pipelines emit).
    Bgr,
    /// 8-bit hue/saturation/value. Hue is degrees / 2 in `0..180`.
    Hsv,
}

impl ColorSpace {
    /// Short per-channel names, in storage order.
    pub const fn channel_names(&self) -> [&'static str; 3] {
        match self {
            Self::Rgb => ["Red", "Green", "Blue"],
            Self::Bgr => ["Blue", "Green", "Red"],
            Self::Hsv => ["Hue", "Saturation", "Value"],
        }
    }
}

impl fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rgb => write!(f, "RGB"),
            Self::Bgr => write!(f, "BGR"),
            Self::Hsv => write!(f, "HSV"),
        }
    }
}

/// Three interleaved 8-bit channels, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Color space of `pixels`.
    pub space: ColorSpace,
    /// Pixel data. Length is always `width * height`.
    pub pixels: Vec<[u8; 3]>,
}

impl ColorImage {
    /// Wrap an existing pixel buffer, checking its length.
    pub fn new(width: u32, height: u32, space: ColorSpace, pixels: Vec<[u8; 3]>) -> Result<Self> {
        check_len(width, height, pixels.len())?;
        Ok(Self {
            width,
            height,
            space,
            pixels,
        })
    }

    /// An image where every pixel has the same value.
    pub fn filled(width: u32, height: u32, space: ColorSpace, value: [u8; 3]) -> Self {
        Self {
            width,
            height,
            space,
            pixels: vec![value; area(width, height)],
        }
    }

    /// Build an image by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(
        width: u32,
        height: u32,
        space: ColorSpace,
        mut f: impl FnMut(u32, u32) -> [u8; 3],
    ) -> Self {
        let mut pixels = Vec::with_capacity(area(width, height));
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            space,
            pixels,
        }
    }

    /// Reinterpret a flat `RGBRGB...` style byte buffer.
    pub fn from_bytes(width: u32, height: u32, space: ColorSpace, bytes: &[u8]) -> Result<Self> {
        let pixels: &[[u8; 3]] = bytemuck::try_cast_slice(bytes)
            .map_err(|_| SegError::InvalidArgument("byte buffer length is not a multiple of 3"))?;
        Self::new(width, height, space, pixels.to_vec())
    }

    /// Flat view of the interleaved samples.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Pixel at `(x, y)`, or `None` outside the image.
    pub fn get(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        (x < self.width && y < self.height).then(|| self.pixels[index(self.width, x, y)])
    }
}

/// One 8-bit channel, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plane {
    /// Plane width in pixels.
    pub width: u32,
    /// Plane height in pixels.
    pub height: u32,
    /// Samples. Length is always `width * height`.
    pub data: Vec<u8>,
}

impl Plane {
    /// Wrap an existing sample buffer, checking its length.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        check_len(width, height, data.len())?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn filled(width: u32, height: u32, value: u8) -> Self {
        Self {
            width,
            height,
            data: vec![value; area(width, height)],
        }
    }

    /// Build a plane by evaluating `f(x, y)` for every sample.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> u8) -> Self {
        let mut data = Vec::with_capacity(area(width, height));
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        (x < self.width && y < self.height).then(|| self.data[index(self.width, x, y)])
    }
}

/// Anything the display layer can render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    Color(ColorImage),
    Plane(Plane),
    Mask(Mask),
}

impl Frame {
    /// Stable lowercase name used in reports.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Color(_) => "color",
            Self::Plane(_) => "plane",
            Self::Mask(_) => "mask",
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Self::Color(img) => img.dimensions(),
            Self::Plane(plane) => plane.dimensions(),
            Self::Mask(mask) => mask.dimensions(),
        }
    }

    /// Render as 8-bit RGB for viewing.
    ///
    /// BGR is swapped back, HSV is converted back to RGB, and single-channel
    /// frames are shown as gray.
    pub fn to_rgb8(&self) -> ::image::RgbImage {
        let (width, height) = self.dimensions();
        match self {
            Self::Color(img) => ::image::RgbImage::from_fn(width, height, |x, y| {
                let px = img.pixels[index(width, x, y)];
                ::image::Rgb(match img.space {
                    ColorSpace::Rgb => px,
                    ColorSpace::Bgr => [px[2], px[1], px[0]],
                    ColorSpace::Hsv => hsv_to_rgb(px),
                })
            }),
            Self::Plane(plane) => ::image::RgbImage::from_fn(width, height, |x, y| {
                let v = plane.data[index(width, x, y)];
                ::image::Rgb([v, v, v])
            }),
            Self::Mask(mask) => ::image::RgbImage::from_fn(width, height, |x, y| {
                let v = mask.data[index(width, x, y)];
                ::image::Rgb([v, v, v])
            }),
        }
    }
}

impl From<ColorImage> for Frame {
    fn from(img: ColorImage) -> Self {
        Self::Color(img)
    }
}

impl From<Plane> for Frame {
    fn from(plane: Plane) -> Self {
        Self::Plane(plane)
    }
}

impl From<Mask> for Frame {
    fn from(mask: Mask) -> Self {
        Self::Mask(mask)
    }
}

#[inline]
pub(crate) fn area(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

#[inline]
pub(crate) fn index(width: u32, x: u32, y: u32) -> usize {
    y as usize * width as usize + x as usize
}

pub(crate) fn check_len(width: u32, height: u32, actual: usize) -> Result<()> {
    let expected = area(width, height);
    if actual != expected {
        return Err(SegError::BufferSize {
            width,
            height,
            expected,
            actual,
        });
    }
    Ok(())
}
