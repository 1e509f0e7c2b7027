//! Color scoring and alpha-mask segmentation.
//!
//! Each pixel gets a continuous match score in `[0, 1]` against the target
//! palette: Euclidean RGB distance to every target, normalized by
//! `tolerance * 442` (the black-to-white diagonal), closest target wins.
//! Scores above [`SCORE_THRESHOLD`] become the alpha mask; everything else
//! turns fully transparent.

use image::{Rgba, RgbaImage};

use crate::color::{Color, MAX_RGB_DISTANCE};

/// Classification threshold: pixels scoring at or below this are background.
/// Fixed design constant, not user-configurable.
pub const SCORE_THRESHOLD: f32 = 0.5;

/// Match score of one pixel against the full target palette.
///
/// Per-target score is `max(0, 1 - distance / (tolerance * 442))`; the pixel
/// score is the maximum over all targets, so palette order never matters.
/// With `tolerance == 0` only exact matches score (1.0), avoiding a divide
/// by zero.
#[must_use]
pub fn color_score(r: u8, g: u8, b: u8, targets: &[Color], tolerance: f32) -> f32 {
    let max_distance = tolerance * MAX_RGB_DISTANCE;
    let mut best = 0.0_f32;
    for target in targets {
        let distance = target.distance_to(r, g, b);
        let score = if max_distance > 0.0 {
            (1.0 - distance / max_distance).max(0.0)
        } else if distance == 0.0 {
            1.0
        } else {
            0.0
        };
        best = best.max(score);
    }
    best
}

/// Segment the enhanced buffer into seal (opaque) and background
/// (transparent) pixels.
///
/// Matching pixels keep their enhanced RGB verbatim and get
/// `alpha = min(255, score * 255)`; non-matching pixels become fully
/// transparent black. Returns a newly allocated buffer.
#[must_use]
pub fn score_colors(image: &RgbaImage, targets: &[Color], tolerance: f32) -> RgbaImage {
    let (width, height) = image.dimensions();
    let mut out = RgbaImage::new(width, height);

    for (x, y, px) in image.enumerate_pixels() {
        let score = color_score(px[0], px[1], px[2], targets, tolerance);
        if score > SCORE_THRESHOLD {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let alpha = (score * 255.0).min(255.0) as u8;
            out.put_pixel(x, y, Rgba([px[0], px[1], px[2], alpha]));
        } else {
            out.put_pixel(x, y, Rgba([0, 0, 0, 0]));
        }
    }

    out
}
