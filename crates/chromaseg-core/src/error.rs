//! Error type shared by every segmentation operation.

use std::path::PathBuf;

use crate::image::ColorSpace;

/// Errors that can occur while loading, converting or segmenting images.
#[derive(Debug, thiserror::Error)]
pub enum SegError {
    #[error("image file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: ::image::ImageError,
    },

    #[error("failed to encode {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: ::image::ImageError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("expected a {expected} image, got {found}")]
    ColorSpaceMismatch {
        expected: ColorSpace,
        found: ColorSpace,
    },

    #[error("dimension mismatch: {left_w}x{left_h} vs {right_w}x{right_h}")]
    DimensionMismatch {
        left_w: u32,
        left_h: u32,
        right_w: u32,
        right_h: u32,
    },

    #[error("buffer holds {actual} samples, {width}x{height} needs {expected}")]
    BufferSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("channel index {0} out of range (images have 3 channels)")]
    InvalidChannel(usize),

    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("invalid recipe: {0}")]
    InvalidRecipe(String),

    #[error("recipe parse error: {0}")]
    RecipeParse(#[from] serde_json::Error),

    #[error("display error: {0}")]
    Display(String),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, SegError>;

impl SegError {
    pub(crate) fn dimensions(left: (u32, u32), right: (u32, u32)) -> Self {
        Self::DimensionMismatch {
            left_w: left.0,
            left_h: left.1,
            right_w: right.0,
            right_h: right.1,
        }
    }
}
