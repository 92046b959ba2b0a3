//! Runs a [`Recipe`] against one image and feeds every frame to a sink.
//!
//! Each representation the recipe asks for (RGB, BGR, HSV) is derived from
//! the input once and reused. Steps run strictly top to bottom.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::channels::{extract_channel, split};
use crate::color::convert_to;
use crate::display::DisplaySink;
use crate::error::{Result, SegError};
use crate::image::{ColorImage, ColorSpace, Frame};
use crate::histogram::{self, HistogramSummary};
use crate::recipe::{Recipe, Step};
use crate::segment::mask::{Mask, MaskStats, apply_mask};
use crate::segment::range::{ColorRange, in_range, in_range_plane};
use crate::segment::threshold::{threshold, threshold_otsu};

/// One displayed frame, as recorded in the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageSummary {
    /// Position in display order.
    pub index: usize,
    pub label: String,
    /// `color`, `plane` or `mask`.
    pub kind: String,
    /// Threshold actually applied, for threshold stages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f32>,
    /// Histogram of the thresholded channel, for threshold stages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub histogram: Option<HistogramSummary>,
    /// Selection statistics for binary outputs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mask: Option<MaskStats>,
}

/// Extra facts recorded alongside a displayed frame.
#[derive(Default)]
struct StageFacts {
    threshold: Option<f32>,
    histogram: Option<HistogramSummary>,
    mask: Option<MaskStats>,
}

/// Outcome of a walkthrough run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub width: u32,
    pub height: u32,
    pub stages: Vec<StageSummary>,
    /// Number of times the walkthrough waited for the viewer.
    pub pauses: usize,
}

impl Report {
    /// Summary of the first stage with this label.
    pub fn stage(&self, label: &str) -> Option<&StageSummary> {
        self.stages.iter().find(|s| s.label == label)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Lazily derived representations of the input image.
struct Workspace<'a> {
    input: &'a ColorImage,
    derived: HashMap<ColorSpace, ColorImage>,
}

impl<'a> Workspace<'a> {
    fn new(input: &'a ColorImage) -> Self {
        Self {
            input,
            derived: HashMap::new(),
        }
    }

    fn get(&mut self, space: ColorSpace) -> Result<&ColorImage> {
        if space == self.input.space {
            return Ok(self.input);
        }
        if !self.derived.contains_key(&space) {
            tracing::debug!("converting {} -> {}", self.input.space, space);
            let converted = convert_to(self.input, space)?;
            self.derived.insert(space, converted);
        }
        Ok(&self.derived[&space])
    }
}

struct Recorder<'s> {
    sink: &'s mut dyn DisplaySink,
    report: Report,
}

impl Recorder<'_> {
    fn emit(&mut self, label: &str, frame: Frame, facts: StageFacts) -> Result<()> {
        let index = self.report.stages.len();
        match &facts.mask {
            Some(stats) => tracing::info!(
                "[{index}] {label}: {} of {} pixels selected, centroid {:?}",
                stats.selected,
                stats.total,
                stats.centroid
            ),
            None => tracing::info!("[{index}] {label}"),
        }
        self.sink.show(label, &frame)?;
        self.report.stages.push(StageSummary {
            index,
            label: label.to_string(),
            kind: frame.kind().to_string(),
            threshold: facts.threshold,
            histogram: facts.histogram,
            mask: facts.mask,
        });
        Ok(())
    }
}

/// Run every step of `recipe` on `image`, sending frames to `sink`.
///
/// The sink is finished once after the last step, even for an empty recipe.
pub fn run(image: &ColorImage, recipe: &Recipe, sink: &mut dyn DisplaySink) -> Result<Report> {
    recipe.validate()?;

    let mut workspace = Workspace::new(image);
    let mut rec = Recorder {
        sink,
        report: Report {
            width: image.width,
            height: image.height,
            stages: Vec::new(),
            pauses: 0,
        },
    };

    for step in &recipe.steps {
        match step {
            Step::Show { label, source } => {
                let img = workspace.get(*source)?.clone();
                rec.emit(label, Frame::Color(img), StageFacts::default())?;
            }
            Step::Split { source, labels } => {
                let img = workspace.get(*source)?;
                let names = labels
                    .clone()
                    .unwrap_or_else(|| img.space.channel_names().map(String::from));
                for (name, plane) in names.iter().zip(split(img)) {
                    rec.emit(name, Frame::Plane(plane), StageFacts::default())?;
                }
            }
            Step::Threshold {
                label,
                source,
                channel,
                thresh,
                max_value,
                kind,
                otsu,
            } => {
                let plane = extract_channel(workspace.get(*source)?, *channel)?;
                let (used, out) = if *otsu {
                    threshold_otsu(&plane, *max_value, *kind)?
                } else {
                    threshold(&plane, *thresh, *max_value, *kind)?
                };
                let facts = StageFacts {
                    threshold: Some(used),
                    histogram: histogram::compute(&plane).summary(),
                    mask: kind.is_binary().then(|| Mask::from_plane(&out).stats()),
                };
                rec.emit(label, Frame::Plane(out), facts)?;
            }
            Step::Range {
                label,
                source,
                channel,
                lower,
                upper,
                cutout,
            } => {
                let img = workspace.get(*source)?;
                let mask = match channel {
                    Some(c) => in_range_plane(&extract_channel(img, *c)?, lower[0], upper[0]),
                    None => in_range(img, &ColorRange::new(bounds(lower)?, bounds(upper)?)),
                };
                let facts = StageFacts {
                    mask: Some(mask.stats()),
                    ..StageFacts::default()
                };
                if *cutout {
                    let kept = apply_mask(workspace.get(ColorSpace::Rgb)?, &mask)?;
                    rec.emit(label, Frame::Mask(mask), facts)?;
                    let cutout_label = format!("{label} (cutout)");
                    rec.emit(&cutout_label, Frame::Color(kept), StageFacts::default())?;
                } else {
                    rec.emit(label, Frame::Mask(mask), facts)?;
                }
            }
            Step::Pause => {
                tracing::debug!("pause");
                rec.sink.pause()?;
                rec.report.pauses += 1;
            }
        }
    }

    rec.sink.finish()?;
    Ok(rec.report)
}

fn bounds(values: &[u8]) -> Result<[u8; 3]> {
    values
        .try_into()
        .map_err(|_| SegError::InvalidRecipe(format!("expected 3 bounds, got {}", values.len())))
}
