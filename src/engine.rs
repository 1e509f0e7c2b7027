//! Core seal extraction engine.

use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat, RgbaImage};

use crate::color::Color;
use crate::denoise;
use crate::enhance;
use crate::error::{Error, Result};
use crate::morphology::{self, ColorMode};
use crate::segment;
use crate::sharpen;

/// Parameters controlling seal extraction.
#[derive(Debug, Clone)]
pub struct ExtractionParams {
    /// Colors to match. Order is irrelevant; the closest match wins.
    /// Must be non-empty.
    pub target_colors: Vec<Color>,
    /// How far a pixel may be from a target color and still match,
    /// normalized to `[0, 1]`. 0 matches the exact color only.
    pub color_tolerance: f32,
    /// Median filtering strength in `[0, 1]`. 0 disables the stage.
    pub denoise_level: f32,
    /// Unsharp masking strength in `[0, 1]`. 0 disables the stage.
    pub sharpness: f32,
    /// Color handling in post-segmentation stages.
    pub color_mode: ColorMode,
}

impl Default for ExtractionParams {
    fn default() -> Self {
        Self {
            target_colors: vec![Color::new(255, 0, 0)],
            color_tolerance: 0.3,
            denoise_level: 0.0,
            sharpness: 0.0,
            color_mode: ColorMode::FullColor,
        }
    }
}

impl ExtractionParams {
    /// Validate parameter ranges.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoTargetColors`] for an empty palette and
    /// [`Error::ParameterOutOfRange`] for any normalized parameter outside
    /// `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        if self.target_colors.is_empty() {
            return Err(Error::NoTargetColors);
        }
        for (name, value) in [
            ("color_tolerance", self.color_tolerance),
            ("denoise_level", self.denoise_level),
            ("sharpness", self.sharpness),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::ParameterOutOfRange { name, value });
            }
        }
        Ok(())
    }
}

/// Result of processing a single image file.
#[derive(Debug)]
pub struct ProcessResult {
    /// Path of the processed file.
    pub path: PathBuf,
    /// Whether processing succeeded.
    pub success: bool,
    /// Human-readable status message.
    pub message: String,
}

/// The seal extraction engine holding a validated parameter set.
///
/// Create once with [`SealExtractor::new()`] and reuse for multiple images.
/// Validation happens here, before any pixel is touched.
pub struct SealExtractor {
    params: ExtractionParams,
}

impl SealExtractor {
    /// Create a new extractor from a parameter set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoTargetColors`] or [`Error::ParameterOutOfRange`]
    /// if the parameters are invalid.
    pub fn new(params: ExtractionParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    /// The validated parameters this extractor runs with.
    #[must_use]
    pub const fn params(&self) -> &ExtractionParams {
        &self.params
    }

    /// Run the full pipeline on a decoded RGBA buffer.
    ///
    /// Stages run in fixed order — contrast enhancement, color scoring,
    /// morphological closing, then median denoising and unsharp masking when
    /// their levels are above zero. Each stage consumes its predecessor's
    /// complete output and allocates a fresh buffer; the input is never
    /// mutated.
    ///
    /// The call is synchronous and has no shared state, so an extractor may
    /// be used from multiple threads. Callers issuing overlapping runs for
    /// the same display slot (e.g. on rapid parameter changes) are
    /// responsible for discarding stale results; the engine defines no
    /// sequencing policy.
    #[must_use]
    pub fn extract(&self, image: &RgbaImage) -> RgbaImage {
        let enhanced = enhance::enhance_contrast(image);
        let scored = segment::score_colors(
            &enhanced,
            &self.params.target_colors,
            self.params.color_tolerance,
        );
        drop(enhanced);
        let mut working = morphology::close_mask(&scored, self.params.color_mode);
        drop(scored);

        if self.params.denoise_level > 0.0 {
            working = denoise::median_denoise(&working, self.params.denoise_level);
        }
        if self.params.sharpness > 0.0 {
            working = sharpen::unsharp_sharpen(&working, self.params.sharpness);
        }

        working
    }

    /// Process a single image file: load, extract, save.
    ///
    /// Returns a [`ProcessResult`] indicating success or failure. The output
    /// format must support an alpha channel (see [`save_image`]).
    #[must_use]
    pub fn process_file(&self, input: &Path, output: &Path) -> ProcessResult {
        let mut result = ProcessResult {
            path: input.to_path_buf(),
            success: false,
            message: String::new(),
        };

        let dyn_img = match image::open(input) {
            Ok(img) => img,
            Err(e) => {
                result.message = format!("Failed to load: {e}");
                return result;
            }
        };

        let rgba = dyn_img.to_rgba8();
        let extracted = self.extract(&rgba);

        if let Some(parent) = output.parent() {
            if !parent.exists() {
                if let Err(e) = std::fs::create_dir_all(parent) {
                    result.message = format!("Failed to create output directory: {e}");
                    return result;
                }
            }
        }

        match save_image(&extracted, output) {
            Ok(()) => {
                result.success = true;
                result.message = "Seal extracted".to_string();
            }
            Err(e) => {
                result.message = format!("Failed to save: {e}");
            }
        }

        result
    }

    /// Process all supported images in a directory.
    ///
    /// Output files keep their stem with a `_seal.png` suffix. Uses parallel
    /// iteration when the `cli` feature is enabled (via rayon). Returns a
    /// [`ProcessResult`] for each image found.
    #[must_use]
    pub fn process_directory(&self, input_dir: &Path, output_dir: &Path) -> Vec<ProcessResult> {
        let entries: Vec<_> = match std::fs::read_dir(input_dir) {
            Ok(rd) => rd
                .filter_map(std::result::Result::ok)
                .filter(|e| e.file_type().map(|ft| ft.is_file()).unwrap_or(false))
                .filter(|e| is_supported_image(e.path().as_path()))
                .collect(),
            Err(e) => {
                return vec![ProcessResult {
                    path: input_dir.to_path_buf(),
                    success: false,
                    message: format!("Failed to read directory: {e}"),
                }];
            }
        };

        if !output_dir.exists() {
            if let Err(e) = std::fs::create_dir_all(output_dir) {
                return vec![ProcessResult {
                    path: output_dir.to_path_buf(),
                    success: false,
                    message: format!("Failed to create output directory: {e}"),
                }];
            }
        }

        let process = |entry: &std::fs::DirEntry| {
            let input_path = entry.path();
            let output_path = output_dir.join(output_file_name(&input_path));
            self.process_file(&input_path, &output_path)
        };

        #[cfg(feature = "cli")]
        {
            use rayon::prelude::*;
            entries.par_iter().map(process).collect()
        }

        #[cfg(not(feature = "cli"))]
        {
            entries.iter().map(process).collect()
        }
    }
}

/// Check if a file has a supported input image extension.
#[must_use]
pub fn is_supported_image(path: &Path) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => matches!(
            ext.to_lowercase().as_str(),
            "jpg" | "jpeg" | "png" | "webp" | "bmp"
        ),
        None => false,
    }
}

/// Save an RGBA image, rejecting formats that cannot preserve transparency.
///
/// # Errors
///
/// Returns [`Error::UnsupportedFormat`] for alpha-less formats (JPEG and
/// anything else the crate does not write), or an error if writing fails.
pub fn save_image(img: &RgbaImage, path: &Path) -> Result<()> {
    let format =
        ImageFormat::from_path(path).map_err(|e| Error::UnsupportedFormat(e.to_string()))?;

    match format {
        ImageFormat::Png | ImageFormat::WebP | ImageFormat::Bmp => {
            let dyn_img = DynamicImage::ImageRgba8(img.clone());
            dyn_img.save(path)?;
            Ok(())
        }
        _ => Err(Error::UnsupportedFormat(format!("{format:?}"))),
    }
}

/// Output file name for an input path: `scan.jpg` becomes `scan_seal.png`.
///
/// The extension is always `.png` so the alpha channel survives regardless
/// of the input format.
#[must_use]
pub fn output_file_name(input: &Path) -> String {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    format!("{stem}_seal.png")
}

/// Generate a default output path next to the input file.
///
/// Example: `"scans/doc.jpg"` becomes `"scans/doc_seal.png"`.
#[must_use]
pub fn default_output_path(input: &Path) -> PathBuf {
    let parent = input.parent().unwrap_or(Path::new("."));
    parent.join(output_file_name(input))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn red_square_on_white(size: u32, x0: u32, x1: u32, y0: u32, y1: u32) -> RgbaImage {
        RgbaImage::from_fn(size, size, |x, y| {
            if (x0..=x1).contains(&x) && (y0..=y1).contains(&y) {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([255, 255, 255, 255])
            }
        })
    }

    #[test]
    fn empty_palette_is_rejected() {
        let params = ExtractionParams {
            target_colors: vec![],
            ..ExtractionParams::default()
        };
        assert!(matches!(
            SealExtractor::new(params),
            Err(Error::NoTargetColors)
        ));
    }

    #[test]
    fn out_of_range_parameters_are_rejected() {
        for (tolerance, denoise, sharpness) in
            [(1.5, 0.0, 0.0), (0.3, -0.1, 0.0), (0.3, 0.0, 2.0)]
        {
            let params = ExtractionParams {
                color_tolerance: tolerance,
                denoise_level: denoise,
                sharpness,
                ..ExtractionParams::default()
            };
            assert!(
                matches!(
                    SealExtractor::new(params),
                    Err(Error::ParameterOutOfRange { .. })
                ),
                "({tolerance}, {denoise}, {sharpness}) should be rejected"
            );
        }
    }

    #[test]
    fn all_white_image_yields_fully_transparent_output() {
        let img = RgbaImage::from_pixel(16, 16, Rgba([255, 255, 255, 255]));
        let extractor = SealExtractor::new(ExtractionParams::default()).unwrap();
        let out = extractor.extract(&img);
        assert_eq!(out.dimensions(), (16, 16));
        for px in out.pixels() {
            assert_eq!(px[3], 0);
        }
    }

    #[test]
    fn red_square_interior_is_opaque_background_transparent() {
        let img = red_square_on_white(20, 6, 13, 6, 13);
        let extractor = SealExtractor::new(ExtractionParams::default()).unwrap();
        let out = extractor.extract(&img);

        // interior pixels saturate the score; closing grows outward by a
        // bounded amount, so far-away background stays transparent
        assert_eq!(out.get_pixel(9, 9)[3], 255);
        assert_eq!(out.get_pixel(0, 0)[3], 0);
        assert_eq!(out.get_pixel(19, 0)[3], 0);
    }

    #[test]
    fn output_dimensions_match_input() {
        let img = red_square_on_white(24, 4, 10, 4, 10);
        let extractor = SealExtractor::new(ExtractionParams::default()).unwrap();
        assert_eq!(extractor.extract(&img).dimensions(), (24, 24));
    }

    #[test]
    fn input_buffer_is_not_mutated() {
        let img = red_square_on_white(12, 3, 8, 3, 8);
        let before = img.clone();
        let extractor = SealExtractor::new(ExtractionParams::default()).unwrap();
        let _ = extractor.extract(&img);
        assert_eq!(img, before);
    }

    #[test]
    fn zero_levels_reduce_pipeline_to_enhance_score_close() {
        let img = red_square_on_white(16, 4, 11, 4, 11);
        let params = ExtractionParams::default();
        let extractor = SealExtractor::new(params.clone()).unwrap();

        let enhanced = enhance::enhance_contrast(&img);
        let scored =
            segment::score_colors(&enhanced, &params.target_colors, params.color_tolerance);
        let closed = morphology::close_mask(&scored, params.color_mode);

        assert_eq!(extractor.extract(&img), closed);
    }

    #[test]
    fn denoise_forces_full_opacity_on_seal_pixels() {
        let img = red_square_on_white(16, 4, 11, 4, 11);
        let extractor = SealExtractor::new(ExtractionParams {
            denoise_level: 0.8,
            ..ExtractionParams::default()
        })
        .unwrap();
        let out = extractor.extract(&img);
        for px in out.pixels() {
            assert!(px[3] == 0 || px[3] == 255);
        }
    }

    #[test]
    fn monochrome_mode_produces_single_channel_seal() {
        let img = red_square_on_white(16, 4, 11, 4, 11);
        let extractor = SealExtractor::new(ExtractionParams {
            color_mode: ColorMode::Monochrome,
            ..ExtractionParams::default()
        })
        .unwrap();
        let out = extractor.extract(&img);
        for px in out.pixels() {
            if px[3] > 0 {
                assert_eq!(px[1], 0);
                assert_eq!(px[2], 0);
            }
        }
    }

    #[test]
    fn output_file_name_appends_seal_suffix() {
        assert_eq!(output_file_name(Path::new("/tmp/doc.jpg")), "doc_seal.png");
        assert_eq!(output_file_name(Path::new("scan.webp")), "scan_seal.png");
    }

    #[test]
    fn default_output_path_stays_in_parent() {
        let p = default_output_path(Path::new("/tmp/doc.jpg"));
        assert_eq!(p, PathBuf::from("/tmp/doc_seal.png"));
    }

    #[test]
    fn is_supported_image_accepts_common_formats() {
        assert!(is_supported_image(Path::new("doc.jpg")));
        assert!(is_supported_image(Path::new("doc.JPEG")));
        assert!(is_supported_image(Path::new("doc.png")));
        assert!(is_supported_image(Path::new("doc.webp")));
        assert!(!is_supported_image(Path::new("doc.gif")));
        assert!(!is_supported_image(Path::new("doc")));
    }

    #[test]
    fn save_image_rejects_alpha_less_formats() {
        let img = RgbaImage::new(2, 2);
        let result = save_image(&img, Path::new("/tmp/seal_extraction_test_out.jpg"));
        assert!(matches!(result, Err(Error::UnsupportedFormat(_))));
    }
}
