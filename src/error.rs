//! Error types for the seal-extraction crate.

/// Errors that can occur during parameter validation and seal extraction.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A target color string does not match the `#RRGGBB` pattern.
    #[error("invalid color string {0:?}: expected 6 hex digits, optionally prefixed with '#'")]
    InvalidColor(String),

    /// The target color list is empty.
    #[error("target color list is empty: at least one color is required")]
    NoTargetColors,

    /// A normalized parameter lies outside `[0, 1]`.
    #[error("parameter `{name}` out of range: {value} (expected 0.0..=1.0)")]
    ParameterOutOfRange {
        /// Name of the offending parameter.
        name: &'static str,
        /// The rejected value.
        value: f32,
    },

    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The output format cannot preserve per-pixel transparency.
    #[error("unsupported output format: {0} (alpha channel required)")]
    UnsupportedFormat(String),

    /// An error occurred during image processing (load, save, encode).
    #[error("image processing error: {0}")]
    Image(#[from] image::ImageError),
}

/// A specialized `Result` type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
