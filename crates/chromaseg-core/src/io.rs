//! Image decode and encode.

use std::path::Path;

use crate::error::{Result, SegError};
use crate::image::{ColorImage, ColorSpace, Frame};

/// Load an image from disk as 8-bit RGB.
///
/// Supports the formats enabled in the `image` crate (PNG, JPEG, ...).
/// Alpha is dropped and deeper bit depths are reduced to 8 bits.
pub fn load_image(path: &Path) -> Result<ColorImage> {
    if !path.exists() {
        return Err(SegError::NotFound(path.to_path_buf()));
    }

    let img = ::image::open(path).map_err(|source| SegError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();
    tracing::debug!(
        "decoded {} ({width}x{height}, {:?})",
        path.display(),
        img.color()
    );

    ColorImage::from_bytes(width, height, ColorSpace::Rgb, rgb.as_raw())
}

/// Write a frame to disk. The format follows the file extension.
pub fn save_frame(path: &Path, frame: &Frame) -> Result<()> {
    let encode = |source| SegError::Encode {
        path: path.to_path_buf(),
        source,
    };
    match frame {
        Frame::Color(_) => frame.to_rgb8().save(path).map_err(encode),
        Frame::Plane(plane) => gray(plane.width, plane.height, plane.data.clone())?
            .save(path)
            .map_err(encode),
        Frame::Mask(mask) => gray(mask.width, mask.height, mask.data().to_vec())?
            .save(path)
            .map_err(encode),
    }
}

fn gray(width: u32, height: u32, data: Vec<u8>) -> Result<::image::GrayImage> {
    let actual = data.len();
    ::image::GrayImage::from_raw(width, height, data).ok_or(SegError::BufferSize {
        width,
        height,
        expected: width as usize * height as usize,
        actual,
    })
}
