//! Binary masks and their statistics.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SegError};
use crate::image::{ColorImage, Plane, area, index};

/// Sample value of a selected pixel.
pub const SET: u8 = 255;

/// Single-channel binary image. Every sample is `0` or [`SET`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    /// Mask width in pixels.
    pub width: u32,
    /// Mask height in pixels.
    pub height: u32,
    pub(crate) data: Vec<u8>,
}

/// Summary of a mask, as reported per stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaskStats {
    /// Number of selected pixels.
    pub selected: usize,
    /// Number of pixels in the mask.
    pub total: usize,
    /// `selected / total`, 0 for an empty mask.
    pub coverage: f32,
    /// Barycentre `[x, y]` of the selected pixels.
    pub centroid: Option<[f32; 2]>,
}

impl Mask {
    /// A mask with nothing selected.
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; area(width, height)],
        }
    }

    /// A mask with every pixel selected.
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![SET; area(width, height)],
        }
    }

    /// Build a mask by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> bool) -> Self {
        let plane = Plane::from_fn(width, height, |x, y| if f(x, y) { SET } else { 0 });
        Self {
            width,
            height,
            data: plane.data,
        }
    }

    pub(crate) fn from_bools(width: u32, height: u32, selected: impl Iterator<Item = bool>) -> Self {
        Self {
            width,
            height,
            data: selected.map(|s| if s { SET } else { 0 }).collect(),
        }
    }

    /// Treat every non-zero sample of `plane` as selected.
    pub fn from_plane(plane: &Plane) -> Self {
        Self::from_bools(plane.width, plane.height, plane.data.iter().map(|&v| v != 0))
    }

    /// Raw samples (`0` or `255`), row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Whether `(x, y)` is selected. Out-of-bounds pixels are not.
    pub fn is_set(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.data[index(self.width, x, y)] == SET
    }

    /// Number of selected pixels.
    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&v| v == SET).count()
    }

    /// Fraction of the mask that is selected.
    pub fn coverage(&self) -> f32 {
        if self.data.is_empty() {
            return 0.0;
        }
        self.count() as f32 / self.data.len() as f32
    }

    /// Barycentre of the selected pixels, or `None` when nothing is selected.
    pub fn centroid(&self) -> Option<(f32, f32)> {
        let mut n = 0u64;
        let mut sx = 0.0_f64;
        let mut sy = 0.0_f64;
        for (i, &v) in self.data.iter().enumerate() {
            if v == SET {
                n += 1;
                sx += (i % self.width as usize) as f64;
                sy += (i / self.width as usize) as f64;
            }
        }
        (n > 0).then(|| ((sx / n as f64) as f32, (sy / n as f64) as f32))
    }

    pub fn stats(&self) -> MaskStats {
        MaskStats {
            selected: self.count(),
            total: self.data.len(),
            coverage: self.coverage(),
            centroid: self.centroid().map(|(x, y)| [x, y]),
        }
    }

    /// Pixels selected in either mask.
    pub fn union(&self, other: &Mask) -> Result<Mask> {
        self.combine(other, |a, b| a | b)
    }

    /// Pixels selected in both masks.
    pub fn intersect(&self, other: &Mask) -> Result<Mask> {
        self.combine(other, |a, b| a & b)
    }

    /// Swap selected and unselected pixels.
    pub fn invert(&self) -> Mask {
        Mask {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|&v| v ^ SET).collect(),
        }
    }

    pub fn into_plane(self) -> Plane {
        Plane {
            width: self.width,
            height: self.height,
            data: self.data,
        }
    }

    fn combine(&self, other: &Mask, op: impl Fn(u8, u8) -> u8) -> Result<Mask> {
        if self.dimensions() != other.dimensions() {
            return Err(SegError::dimensions(self.dimensions(), other.dimensions()));
        }
        Ok(Mask {
            width: self.width,
            height: self.height,
            data: self
                .data
                .iter()
                .zip(&other.data)
                .map(|(&a, &b)| op(a, b))
                .collect(),
        })
    }
}

/// Keep the pixels of `image` selected by `mask`; everything else becomes 0.
pub fn apply_mask(image: &ColorImage, mask: &Mask) -> Result<ColorImage> {
    if image.dimensions() != mask.dimensions() {
        return Err(SegError::dimensions(image.dimensions(), mask.dimensions()));
    }
    Ok(ColorImage {
        width: image.width,
        height: image.height,
        space: image.space,
        pixels: image
            .pixels
            .iter()
            .zip(&mask.data)
            .map(|(&px, &m)| if m == SET { px } else { [0; 3] })
            .collect(),
    })
}
