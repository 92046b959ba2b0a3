//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use chromaseg_core::{ColorImage, ColorSpace};

pub const WOOD: [u8; 3] = [160, 110, 80];
pub const RED: [u8; 3] = [220, 30, 30];
pub const YELLOW: [u8; 3] = [230, 210, 20];
pub const GREEN: [u8; 3] = [120, 200, 40];
pub const BLUE: [u8; 3] = [30, 60, 200];

/// Side of each square "marble".
pub const SIDE: u32 = 6;

/// Four colored squares on a wooden background, left to right:
/// red, yellow, green, blue. Each occupies `x0..x0 + 6`, `y` in `3..9`.
pub fn marbles() -> ColorImage {
    ColorImage::from_fn(48, 12, ColorSpace::Rgb, |x, y| {
        if !(3..3 + SIDE).contains(&y) {
            return WOOD;
        }
        match x {
            2..8 => RED,
            14..20 => YELLOW,
            26..32 => GREEN,
            38..44 => BLUE,
            _ => WOOD,
        }
    })
}

/// Left edge of the marble with the given color.
pub fn marble_x0(color: [u8; 3]) -> u32 {
    match color {
        RED => 2,
        YELLOW => 14,
        GREEN => 26,
        _ => 38,
    }
}

/// Deterministic pseudo-random image (64-bit LCG).
pub fn noise(width: u32, height: u32, seed: u64) -> ColorImage {
    let mut state = seed;
    let mut next = move || {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (state >> 33) as u8
    };
    ColorImage::from_fn(width, height, ColorSpace::Rgb, |_, _| [next(), next(), next()])
}
