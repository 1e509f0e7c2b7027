//! Isolate colored stamp/seal markings from scanned documents.
//!
//! Scanned contracts and certificates often carry an inked seal over printed
//! text. This crate segments the seal by color, cleans the resulting mask,
//! and produces an RGBA image with the seal opaque and everything else fully
//! transparent.
//!
//! The pipeline runs five stages in fixed order: local contrast enhancement,
//! color scoring against a target palette, morphological closing of the alpha
//! mask, then optional median denoising and unsharp masking. Every stage is a
//! pure function over the previous stage's buffer.
//!
//! # Quick Start
//!
//! ```no_run
//! use seal_extraction::{ExtractionParams, SealExtractor};
//!
//! let extractor = SealExtractor::new(ExtractionParams::default()).expect("valid params");
//! let img = image::open("contract.jpg").unwrap().to_rgba8();
//! let seal = extractor.extract(&img);
//! seal.save("seal.png").unwrap();
//! ```
//!
//! # Target colors
//!
//! Any number of target colors can be matched at once; a pixel's score is its
//! best match across the palette. Colors parse from `#RRGGBB` strings:
//!
//! ```
//! use seal_extraction::{Color, ExtractionParams, SealExtractor};
//!
//! let params = ExtractionParams {
//!     target_colors: vec![Color::parse("#FF0000")?, Color::parse("#0066CC")?],
//!     color_tolerance: 0.3,
//!     ..ExtractionParams::default()
//! };
//! let extractor = SealExtractor::new(params)?;
//! # Ok::<(), seal_extraction::Error>(())
//! ```

#![deny(missing_docs)]

pub mod color;
pub mod denoise;
pub mod enhance;
mod engine;
pub mod error;
pub mod morphology;
pub mod segment;
pub mod sharpen;

pub use color::{Color, MAX_RGB_DISTANCE};
pub use engine::{
    default_output_path, is_supported_image, output_file_name, save_image, ExtractionParams,
    ProcessResult, SealExtractor,
};
pub use error::{Error, Result};
pub use morphology::ColorMode;
