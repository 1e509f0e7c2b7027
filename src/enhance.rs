//! Local contrast enhancement.
//!
//! Amplifies each pixel's deviation from its neighborhood mean, sharpening
//! color boundaries before segmentation. This pass always runs: seal edges on
//! low-contrast scans otherwise bleed into the paper background and score
//! below the classification threshold.

use image::RgbaImage;

/// Square neighborhood radius for the local mean.
const RADIUS: u32 = 2;

/// Amplification applied to the deviation from the local mean.
const CONTRAST_FACTOR: f32 = 1.5;

/// Amplify local contrast across the whole image.
///
/// For every pixel, the R/G/B output is
/// `clamp(mean + (original - mean) * 1.5, 0, 255)` where `mean` is taken over
/// the `[-2, 2]` square window clamped to image bounds (edge pixels use the
/// smaller in-bounds window, no wraparound). Alpha passes through unchanged.
///
/// Returns a newly allocated buffer; the input is not modified.
#[must_use]
pub fn enhance_contrast(image: &RgbaImage) -> RgbaImage {
    let (width, height) = image.dimensions();
    let mut out = RgbaImage::new(width, height);

    for y in 0..height {
        for x in 0..width {
            let x0 = x.saturating_sub(RADIUS);
            let y0 = y.saturating_sub(RADIUS);
            let x1 = (x + RADIUS).min(width - 1);
            let y1 = (y + RADIUS).min(height - 1);

            let mut sum = [0u32; 3];
            let mut count = 0u32;
            for ny in y0..=y1 {
                for nx in x0..=x1 {
                    let px = image.get_pixel(nx, ny);
                    sum[0] += u32::from(px[0]);
                    sum[1] += u32::from(px[1]);
                    sum[2] += u32::from(px[2]);
                    count += 1;
                }
            }

            let src = image.get_pixel(x, y);
            let mut dst = *src;
            for ch in 0..3 {
                #[allow(clippy::cast_precision_loss)]
                let mean = sum[ch] as f32 / count as f32;
                let boosted = CONTRAST_FACTOR.mul_add(f32::from(src[ch]) - mean, mean);
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

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn uniform_image_is_unchanged() {
        let img = RgbaImage::from_pixel(10, 10, Rgba([120, 60, 200, 255]));
        let out = enhance_contrast(&img);
        assert_eq!(out, img);
    }

    #[test]
    fn alpha_passes_through() {
        let mut img = RgbaImage::from_pixel(6, 6, Rgba([100, 100, 100, 255]));
        img.put_pixel(3, 3, Rgba([200, 50, 50, 37]));
        let out = enhance_contrast(&img);
        assert_eq!(out.get_pixel(3, 3)[3], 37);
        assert_eq!(out.get_pixel(0, 0)[3], 255);
    }

    #[test]
    fn bright_outlier_gets_brighter() {
        let mut img = RgbaImage::from_pixel(7, 7, Rgba([100, 100, 100, 255]));
        img.put_pixel(3, 3, Rgba([180, 100, 100, 255]));
        let out = enhance_contrast(&img);
        // The outlier sits above its neighborhood mean, so the deviation is
        // amplified.
        assert!(out.get_pixel(3, 3)[0] > 180);
        // Its neighbors sit slightly below their (outlier-inflated) mean.
        assert!(out.get_pixel(3, 2)[0] <= 100);
    }

    #[test]
    fn output_stays_in_range_at_extremes() {
        let mut img = RgbaImage::from_pixel(5, 5, Rgba([0, 0, 0, 255]));
        img.put_pixel(2, 2, Rgba([255, 255, 255, 255]));
        let out = enhance_contrast(&img);
        // the white outlier saturates upward, the black corner clamps at zero
        assert_eq!(out.get_pixel(2, 2)[0], 255);
        assert_eq!(out.get_pixel(0, 0)[0], 0);
    }

    #[test]
    fn edge_pixels_use_clamped_window() {
        // 3x3 image: corner pixel's window is 3x3 (clamped), must not panic
        // and must not wrap around.
        let mut img = RgbaImage::from_pixel(3, 3, Rgba([50, 50, 50, 255]));
        img.put_pixel(0, 0, Rgba([150, 50, 50, 255]));
        let out = enhance_contrast(&img);
        assert!(out.get_pixel(0, 0)[0] >= 150);
    }

    #[test]
    fn returns_new_buffer_without_mutating_input() {
        let img = RgbaImage::from_pixel(4, 4, Rgba([10, 20, 30, 255]));
        let before = img.clone();
        let _ = enhance_contrast(&img);
        assert_eq!(img, before);
    }
}
