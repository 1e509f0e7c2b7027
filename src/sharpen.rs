//! Unsharp masking within the segmented seal.
//!
//! Boosts edge contrast by amplifying each seal pixel's difference from the
//! mean of its non-transparent neighbors. Background pixels are never touched
//! and never contribute to the blur.

use image::{Rgba, RgbaImage};

/// Blur window radius. Fixed by design.
const RADIUS: u32 = 1;

/// Apply unsharp masking to every non-transparent pixel.
///
/// Per channel: `blur = mean over non-transparent neighbors`,
/// `out = clamp(original + (original - blur) * sharpness, 0, 255)`.
/// Processed pixels are committed as fully opaque; transparent pixels pass
/// through untouched.
///
/// Returns a newly allocated buffer; the input is not modified.
#[must_use]
pub fn unsharp_sharpen(image: &RgbaImage, sharpness: f32) -> RgbaImage {
    let (width, height) = image.dimensions();
    let mut out = RgbaImage::new(width, height);

    for y in 0..height {
        for x in 0..width {
            let src = image.get_pixel(x, y);
            if src[3] == 0 {
                out.put_pixel(x, y, Rgba([0, 0, 0, 0]));
                continue;
            }

            let mut sum = [0u32; 3];
            let mut count = 0u32;
            for ny in y.saturating_sub(RADIUS)..=(y + RADIUS).min(height - 1) {
                for nx in x.saturating_sub(RADIUS)..=(x + RADIUS).min(width - 1) {
                    let px = image.get_pixel(nx, ny);
                    if px[3] > 0 {
                        sum[0] += u32::from(px[0]);
                        sum[1] += u32::from(px[1]);
                        sum[2] += u32::from(px[2]);
                        count += 1;
                    }
                }
            }

            let mut dst = Rgba([0, 0, 0, 255]);
            for ch in 0..3 {
                #[allow(clippy::cast_precision_loss)]
                let blur = sum[ch] as f32 / count as f32;
                let original = f32::from(src[ch]);
                let boosted = sharpness.mul_add(original - blur, original);
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                {
                    dst[ch] = boosted.clamp(0.0, 255.0) as u8;
                }
            }
            out.put_pixel(x, y, dst);
        }
    }

    out
}
