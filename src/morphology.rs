//! Morphological closing of the alpha mask.
//!
//! Dilation followed by erosion over the alpha channel, filling small holes
//! inside the segmented seal. The erosion only considers strictly positive
//! alpha values, so it fills single-pixel holes without shrinking the
//! silhouette back to its pre-dilation size, at the cost of slight outward
//! growth on true boundaries.

use image::{Rgba, RgbaImage};

/// How color channels are carried through post-segmentation stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Preserve the full RGB of every seal pixel (default).
    #[default]
    FullColor,
    /// Retain only the red channel and clear green/blue, collapsing the seal
    /// to monochrome. Mirrors the behavior of red-only seal extractors.
    Monochrome,
}

/// 3x3 structuring element radius. Fixed by design.
const RADIUS: u32 = 1;

/// Close the alpha mask: dilate then erode.
///
/// Returns a newly allocated buffer; the input is not modified.
#[must_use]
pub fn close_mask(image: &RgbaImage, mode: ColorMode) -> RgbaImage {
    let dilated = dilate(image, mode);
    erode(&dilated)
}

/// Dilation pass: each output alpha is the maximum alpha over the 3x3
/// neighborhood (clamped to bounds). Where the result is positive, the color
/// of the neighbor that supplied the maximum is carried forward.
fn dilate(image: &RgbaImage, mode: ColorMode) -> RgbaImage {
    let (width, height) = image.dimensions();
    let mut out = RgbaImage::new(width, height);

    for y in 0..height {
        for x in 0..width {
            let mut best = Rgba([0, 0, 0, 0]);
            for ny in y.saturating_sub(RADIUS)..=(y + RADIUS).min(height - 1) {
                for nx in x.saturating_sub(RADIUS)..=(x + RADIUS).min(width - 1) {
                    let px = image.get_pixel(nx, ny);
                    if px[3] > best[3] {
                        best = *px;
                    }
                }
            }
            if best[3] > 0 && mode == ColorMode::Monochrome {
                best[1] = 0;
                best[2] = 0;
            }
            out.put_pixel(x, y, best);
        }
    }

    out
}

/// Erosion pass over the dilated buffer: each output alpha is the minimum of
/// the strictly positive alphas in the 3x3 neighborhood. Zero-alpha neighbors
/// do not lower the minimum; an all-transparent neighborhood yields zero.
/// The color of the neighbor that supplied the minimum is carried forward.
fn erode(dilated: &RgbaImage) -> RgbaImage {
    let (width, height) = dilated.dimensions();
    let mut out = RgbaImage::new(width, height);

    for y in 0..height {
        for x in 0..width {
            let mut best: Option<Rgba<u8>> = None;
            for ny in y.saturating_sub(RADIUS)..=(y + RADIUS).min(height - 1) {
                for nx in x.saturating_sub(RADIUS)..=(x + RADIUS).min(width - 1) {
                    let px = dilated.get_pixel(nx, ny);
                    if px[3] > 0 && best.is_none_or(|b| px[3] < b[3]) {
                        best = Some(*px);
                    }
                }
            }
            out.put_pixel(x, y, best.unwrap_or(Rgba([0, 0, 0, 0])));
        }
    }

    out
}
