//! Channel split, extraction and merge.

use crate::error::{Result, SegError};
use crate::image::{ColorImage, ColorSpace, Plane};

/// Split an image into its three channels, in storage order.
pub fn split(image: &ColorImage) -> [Plane; 3] {
    let mut planes = [
        Vec::with_capacity(image.pixels.len()),
        Vec::with_capacity(image.pixels.len()),
        Vec::with_capacity(image.pixels.len()),
    ];
    for px in &image.pixels {
        for (plane, &v) in planes.iter_mut().zip(px) {
            plane.push(v);
        }
    }
    planes.map(|data| Plane {
        width: image.width,
        height: image.height,
        data,
    })
}

/// Extract a single channel by index.
pub fn extract_channel(image: &ColorImage, channel: usize) -> Result<Plane> {
    if channel >= 3 {
        return Err(SegError::InvalidChannel(channel));
    }
    Ok(Plane {
        width: image.width,
        height: image.height,
        data: image.pixels.iter().map(|px| px[channel]).collect(),
    })
}

/// Reassemble three planes into an image tagged with `space`.
pub fn merge(planes: &[Plane; 3], space: ColorSpace) -> Result<ColorImage> {
    let [a, b, c] = planes;
    for other in [b, c] {
        if other.dimensions() != a.dimensions() {
            return Err(SegError::dimensions(a.dimensions(), other.dimensions()));
        }
    }

    let pixels = a
        .data
        .iter()
        .zip(&b.data)
        .zip(&c.data)
        .map(|((&x, &y), &z)| [x, y, z])
        .collect();
    ColorImage::new(a.width, a.height, space, pixels)
}
