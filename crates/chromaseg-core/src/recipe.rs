//! Walkthrough recipes: the ordered list of steps to run on one image.
//!
//! Recipes are plain JSON so a walkthrough can be changed without
//! recompiling. [`Recipe::tutorial`] is the built-in colored-marbles lesson.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::hue_from_degrees;
use crate::error::{Result, SegError};
use crate::image::ColorSpace;
use crate::segment::threshold::ThresholdKind;

fn default_max_value() -> f32 {
    255.0
}

/// A single walkthrough step.
///
/// `source` names the representation of the loaded image a step reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Step {
    /// Display the source image itself.
    Show { label: String, source: ColorSpace },
    /// Display each channel of the source. Labels default to the channel names.
    Split {
        source: ColorSpace,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        labels: Option<[String; 3]>,
    },
    /// Threshold one channel of the source.
    Threshold {
        label: String,
        source: ColorSpace,
        channel: usize,
        #[serde(default)]
        thresh: f32,
        #[serde(default = "default_max_value")]
        max_value: f32,
        #[serde(default)]
        kind: ThresholdKind,
        /// Pick the threshold automatically; `thresh` is ignored.
        #[serde(default)]
        otsu: bool,
    },
    /// Range-mask the source. With `channel` set, a single bound is tested
    /// against that channel; otherwise all three bounds apply.
    Range {
        label: String,
        source: ColorSpace,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        channel: Option<usize>,
        lower: Vec<u8>,
        upper: Vec<u8>,
        /// Also display the RGB pixels the mask keeps.
        #[serde(default)]
        cutout: bool,
    },
    /// Wait for the viewer before continuing.
    Pause,
}

/// Ordered list of steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub steps: Vec<Step>,
}

impl Recipe {
    /// Parse and validate a JSON recipe.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let recipe: Recipe = serde_json::from_str(json)?;
        recipe.validate()?;
        Ok(recipe)
    }

    /// Read, parse and validate a JSON recipe file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check channel indices, bound arity and labels.
    pub fn validate(&self) -> Result<()> {
        for (i, step) in self.steps.iter().enumerate() {
            let fail = |msg: String| Err(SegError::InvalidRecipe(format!("step {i}: {msg}")));
            match step {
                Step::Show { label, .. } if label.trim().is_empty() => {
                    return fail("empty label".into());
                }
                Step::Split {
                    labels: Some(labels),
                    ..
                } if labels.iter().any(|l| l.trim().is_empty()) => {
                    return fail("empty channel label".into());
                }
                Step::Threshold {
                    label,
                    channel,
                    thresh,
                    max_value,
                    otsu,
                    ..
                } => {
                    if label.trim().is_empty() {
                        return fail("empty label".into());
                    }
                    if *channel >= 3 {
                        return fail(format!("channel {channel} out of range"));
                    }
                    if (!otsu && !thresh.is_finite()) || !max_value.is_finite() {
                        return fail("threshold values must be finite".into());
                    }
                }
                Step::Range {
                    label,
                    channel,
                    lower,
                    upper,
                    ..
                } => {
                    if label.trim().is_empty() {
                        return fail("empty label".into());
                    }
                    let arity = match channel {
                        Some(c) if *c >= 3 => return fail(format!("channel {c} out of range")),
                        Some(_) => 1,
                        None => 3,
                    };
                    if lower.len() != arity || upper.len() != arity {
                        return fail(format!(
                            "expected {arity} bound(s), got {} lower / {} upper",
                            lower.len(),
                            upper.len()
                        ));
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// The colored-marbles lesson: channel splits, red-channel thresholds,
    /// then hue/saturation ranges picking out the yellow, green and red
    /// marbles.
    pub fn tutorial() -> Self {
        let hue = hue_from_degrees;
        let threshold = |label: &str, thresh: f32, kind| Step::Threshold {
            label: label.to_string(),
            source: ColorSpace::Rgb,
            channel: 0,
            thresh,
            max_value: 255.0,
            kind,
            otsu: false,
        };
        let range = |label: &str, channel, lower: &[u8], upper: &[u8]| Step::Range {
            label: label.to_string(),
            source: ColorSpace::Hsv,
            channel,
            lower: lower.to_vec(),
            upper: upper.to_vec(),
            cutout: false,
        };

        Self {
            steps: vec![
                Step::Show {
                    label: "Original".into(),
                    source: ColorSpace::Rgb,
                },
                Step::Split {
                    source: ColorSpace::Rgb,
                    labels: None,
                },
                Step::Pause,
                // Blue and green marbles carry almost no red.
                threshold("Red at most 110", 110.0, ThresholdKind::BinaryInv),
                Step::Pause,
                threshold("Red above 200", 200.0, ThresholdKind::Binary),
                // Part of the red marble is as bright as the wood in this channel.
                threshold("Red above 190", 190.0, ThresholdKind::Binary),
                Step::Pause,
                Step::Split {
                    source: ColorSpace::Hsv,
                    labels: None,
                },
                Step::Pause,
                range("Yellow hue", Some(0), &[hue(36.0)], &[hue(60.0)]),
                // Saturation drops the weakly saturated rims of the green marbles.
                range("Yellow", None, &[hue(36.0), 180, 0], &[hue(60.0), 255, 255]),
                range("Green", None, &[hue(70.0), 0, 0], &[hue(100.0), 255, 255]),
                range("Red", None, &[0, 190, 0], &[15, 255, 255]),
                Step::Pause,
            ],
        }
    }
}

impl Default for Recipe {
    fn default() -> Self {
        Self::tutorial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tutorial_is_valid() {
        let recipe = Recipe::tutorial();
        recipe.validate().unwrap();
        assert_eq!(recipe.steps.iter().filter(|s| **s == Step::Pause).count(), 5);
    }

    #[test]
    fn test_tutorial_yellow_bounds() {
        let recipe = Recipe::tutorial();
        let yellow = recipe
            .steps
            .iter()
            .find_map(|s| match s {
                Step::Range {
                    label, lower, upper, ..
                } if label == "Yellow" => Some((lower.clone(), upper.clone())),
                _ => None,
            })
            .unwrap();
        assert_eq!(yellow, (vec![18, 180, 0], vec![30, 255, 255]));
    }

    #[test]
    fn test_json_roundtrip_of_tutorial() {
        let recipe = Recipe::tutorial();
        let json = recipe.to_json_pretty().unwrap();
        assert_eq!(Recipe::from_json_str(&json).unwrap(), recipe);
    }

    #[test]
    fn test_defaults_fill_in() {
        let recipe = Recipe::from_json_str(
            r#"{"steps":[{"type":"threshold","label":"r","source":"rgb","channel":0,"thresh":10}]}"#,
        )
        .unwrap();
        match &recipe.steps[0] {
            Step::Threshold {
                max_value,
                kind,
                otsu,
                ..
            } => {
                assert_eq!(*max_value, 255.0);
                assert_eq!(*kind, ThresholdKind::Binary);
                assert!(!otsu);
            }
            other => panic!("unexpected step {other:?}"),
        }
    }

    #[test]
    fn test_bad_channel_is_rejected() {
        let err = Recipe::from_json_str(
            r#"{"steps":[{"type":"threshold","label":"x","source":"hsv","channel":3,"thresh":1}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, SegError::InvalidRecipe(msg) if msg.contains("step 0")));
    }

    #[test]
    fn test_range_arity_is_checked() {
        let err = Recipe::from_json_str(
            r#"{"steps":[{"type":"range","label":"x","source":"hsv","lower":[1],"upper":[2]}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, SegError::InvalidRecipe(_)));

        Recipe::from_json_str(
            r#"{"steps":[{"type":"range","label":"x","source":"hsv","channel":1,"lower":[1],"upper":[2]}]}"#,
        )
        .unwrap();
    }

    #[test]
    fn test_unknown_step_type_is_parse_error() {
        let err = Recipe::from_json_str(r#"{"steps":[{"type":"blur"}]}"#).unwrap_err();
        assert!(matches!(err, SegError::RecipeParse(_)));
    }
}
