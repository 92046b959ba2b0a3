//! Pixel selection: scalar thresholds, per-channel range tests, and the
//! binary masks they produce.

pub mod mask;
pub mod range;
pub mod threshold;

pub use mask::{Mask, MaskStats, apply_mask};
pub use range::{ColorRange, in_range, in_range_plane};
pub use threshold::{ThresholdKind, threshold, threshold_otsu};
