//! Median filtering of the segmented seal.
//!
//! Removes speckle noise by replacing each seal pixel's channels with the
//! neighborhood median, computed only over other seal pixels. Background
//! pixels are never touched and never contribute.

use image::{Rgba, RgbaImage};

/// Neighborhood radius for a given denoise level. `floor(level * 2)`, so the
/// window grows from 1x1 through 5x5 as the level approaches 1.
#[must_use]
pub fn denoise_radius(denoise_level: f32) -> u32 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    {
        (denoise_level * 2.0).floor() as u32
    }
}

/// Apply a median filter to every non-transparent pixel.
///
/// Per channel, values are collected from the non-transparent pixels inside
/// the clamped window (the pixel itself included), sorted, and the lower
/// median taken. Processed pixels are committed as fully opaque; transparent
/// pixels pass through untouched.
///
/// Returns a newly allocated buffer; the input is not modified.
#[must_use]
pub fn median_denoise(image: &RgbaImage, denoise_level: f32) -> RgbaImage {
    let radius = denoise_radius(denoise_level);
    let (width, height) = image.dimensions();
    let mut out = RgbaImage::new(width, height);
    let mut window = [Vec::new(), Vec::new(), Vec::new()];

    for y in 0..height {
        for x in 0..width {
            let src = image.get_pixel(x, y);
            if src[3] == 0 {
                out.put_pixel(x, y, Rgba([0, 0, 0, 0]));
                continue;
            }

            for values in &mut window {
                values.clear();
            }
            for ny in y.saturating_sub(radius)..=(y + radius).min(height - 1) {
                for nx in x.saturating_sub(radius)..=(x + radius).min(width - 1) {
                    let px = image.get_pixel(nx, ny);
                    if px[3] > 0 {
                        window[0].push(px[0]);
                        window[1].push(px[1]);
                        window[2].push(px[2]);
                    }
                }
            }

            let mut dst = Rgba([0, 0, 0, 255]);
            for (ch, values) in window.iter_mut().enumerate() {
                values.sort_unstable();
                // lower median for even counts; the window always contains
                // at least the pixel itself
                dst[ch] = values[(values.len() - 1) / 2];
            }
            out.put_pixel(x, y, dst);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radius_follows_level() {
        assert_eq!(denoise_radius(0.0), 0);
        assert_eq!(denoise_radius(0.4), 0);
        assert_eq!(denoise_radius(0.5), 1);
        assert_eq!(denoise_radius(0.9), 1);
        assert_eq!(denoise_radius(1.0), 2);
    }

    #[test]
    fn uniform_region_colors_are_unchanged() {
        let img = RgbaImage::from_pixel(7, 7, Rgba([180, 30, 30, 200]));
        let out = median_denoise(&img, 1.0);
        for px in out.pixels() {
            assert_eq!((px[0], px[1], px[2]), (180, 30, 30));
            assert_eq!(px[3], 255);
        }
    }

    #[test]
    fn speckle_inside_region_is_removed() {
        let mut img = RgbaImage::from_pixel(7, 7, Rgba([180, 30, 30, 255]));
        img.put_pixel(3, 3, Rgba([10, 250, 250, 255]));
        let out = median_denoise(&img, 1.0);
        // the outlier is a minority in its 5x5 window, so the median wins
        assert_eq!(
            (
                out.get_pixel(3, 3)[0],
                out.get_pixel(3, 3)[1],
                out.get_pixel(3, 3)[2]
            ),
            (180, 30, 30)
        );
    }

    #[test]
    fn transparent_pixels_are_skipped_and_excluded() {
        let mut img = RgbaImage::new(5, 5);
        img.put_pixel(2, 2, Rgba([100, 0, 0, 255]));
        let out = median_denoise(&img, 1.0);

        // the lone seal pixel keeps its color, surrounded by transparency
        let px = out.get_pixel(2, 2);
        assert_eq!((px[0], px[3]), (100, 255));
        assert_eq!(out.get_pixel(0, 0)[3], 0);
        assert_eq!(out.get_pixel(4, 4)[3], 0);
    }

    #[test]
    fn processed_pixels_become_fully_opaque() {
        let img = RgbaImage::from_pixel(3, 3, Rgba([50, 50, 50, 130]));
        let out = median_denoise(&img, 0.6);
        for px in out.pixels() {
            assert_eq!(px[3], 255);
        }
    }
}
