//! Chromaseg Core — domain layer for color-based image segmentation.
//!
//! This crate holds the image model, color-space conversion, channel
//! splitting, thresholding, range masks and the walkthrough runner that
//! strings them together. No windowing or CLI dependencies.

pub mod channels;
pub mod color;
pub mod display;
pub mod error;
pub mod histogram;
pub mod image;
pub mod io;
pub mod recipe;
pub mod segment;
pub mod walkthrough;

// Re-exports for convenience.
pub use crate::color::{ColorConversion, convert_color};
pub use crate::display::{DirectorySink, DisplaySink, MultiSink};
pub use crate::error::{Result, SegError};
pub use crate::image::{ColorImage, ColorSpace, Frame, Plane};
pub use crate::histogram::{ChannelHistogram, HistogramSummary};
pub use crate::recipe::{Recipe, Step};
pub use crate::segment::mask::{Mask, MaskStats};
pub use crate::segment::range::ColorRange;
pub use crate::segment::threshold::ThresholdKind;
pub use crate::walkthrough::{Report, StageSummary};
