//! Behavioural properties of the segmentation primitives.

mod common;

use chromaseg_core::channels::{extract_channel, merge, split};
use chromaseg_core::segment::{in_range, in_range_plane, threshold};
use chromaseg_core::{ColorConversion, ColorImage, ColorRange, ColorSpace, ThresholdKind, convert_color};

/// Largest per-channel error allowed after an 8-bit RGB → HSV → RGB trip.
const ROUNDTRIP_TOLERANCE: i32 = 6;

#[test]
fn test_binary_threshold_is_monotonic() {
    let img = common::noise(40, 30, 7);
    for channel in 0..3 {
        let plane = extract_channel(&img, channel).unwrap();
        let mut previous = usize::MAX;
        for t in (-1..=256).map(|t| t as f32) {
            let (_, out) = threshold(&plane, t, 255.0, ThresholdKind::Binary).unwrap();
            let selected = out.data.iter().filter(|&&v| v == 255).count();
            assert!(
                selected <= previous,
                "channel {channel}: raising threshold to {t} grew selection {previous} -> {selected}"
            );
            previous = selected;
        }
        assert_eq!(previous, 0);
    }
}

#[test]
fn test_range_mask_matches_bounds() {
    let img = common::noise(32, 32, 11);
    let ranges = [
        ColorRange::new([0, 0, 0], [255, 255, 255]),
        ColorRange::new([10, 50, 90], [120, 200, 250]),
        ColorRange::new([128, 0, 64], [128, 255, 64]),
        ColorRange::new([200, 0, 0], [100, 255, 255]),
    ];
    for range in ranges {
        let mask = in_range(&img, &range);
        for y in 0..img.height {
            for x in 0..img.width {
                let px = img.get(x, y).unwrap();
                let inside = (0..3).all(|c| range.lower[c] <= px[c] && px[c] <= range.upper[c]);
                assert_eq!(mask.is_set(x, y), inside, "{range:?} at ({x}, {y}) = {px:?}");
            }
        }
    }
}

#[test]
fn test_single_channel_range_agrees_with_full_range() {
    let img = common::noise(16, 16, 3);
    let hue = extract_channel(&img, 0).unwrap();
    let a = in_range_plane(&hue, 40, 90);
    let b = in_range(&img, &ColorRange::new([40, 0, 0], [90, 255, 255]));
    assert_eq!(a, b);
}

#[test]
fn test_hsv_roundtrip_within_quantization() {
    let steps: Vec<u8> = (0..=255).step_by(15).map(|v| v as u8).collect();
    let mut worst = 0;
    for &r in &steps {
        for &g in &steps {
            for &b in &steps {
                let rgb = ColorImage::filled(1, 1, ColorSpace::Rgb, [r, g, b]);
                let hsv = convert_color(&rgb, ColorConversion::RgbToHsv).unwrap();
                let back = convert_color(&hsv, ColorConversion::HsvToRgb).unwrap();
                for c in 0..3 {
                    let err = (rgb.pixels[0][c] as i32 - back.pixels[0][c] as i32).abs();
                    assert!(
                        err <= ROUNDTRIP_TOLERANCE,
                        "{:?} -> {:?} -> {:?}",
                        rgb.pixels[0],
                        hsv.pixels[0],
                        back.pixels[0]
                    );
                    worst = worst.max(err);
                }
            }
        }
    }
    assert!(worst > 0, "8-bit hue quantization should be visible somewhere");
}

#[test]
fn test_channel_order_swap_is_exact() {
    let img = common::noise(10, 10, 5);
    let bgr = convert_color(&img, ColorConversion::RgbToBgr).unwrap();
    assert_eq!(convert_color(&bgr, ColorConversion::BgrToRgb).unwrap(), img);
}

#[test]
fn test_split_then_merge_reproduces_image() {
    let img = common::noise(23, 17, 99);
    assert_eq!(merge(&split(&img), img.space).unwrap(), img);

    let hsv = convert_color(&img, ColorConversion::RgbToHsv).unwrap();
    assert_eq!(merge(&split(&hsv), ColorSpace::Hsv).unwrap(), hsv);
}
