//! Target color representation and hex parsing.

use crate::error::{Error, Result};

/// Maximum possible distance between two points in RGB space
/// (the black-to-white diagonal, `sqrt(3 * 255^2)` ≈ 441.67, rounded up).
/// Tolerance values are calibrated against this constant.
pub const MAX_RGB_DISTANCE: f32 = 442.0;

/// An 8-bit RGB target color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Create a color from channel values.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a 6-hex-digit color string (`#RRGGBB`, case-insensitive,
    /// leading `#` optional).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidColor`] if the string is not exactly six
    /// hex digits after stripping an optional `#`.
    pub fn parse(s: &str) -> Result<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::InvalidColor(s.to_string()));
        }
        // Length and digit checks above make these infallible.
        let r = u8::from_str_radix(&hex[0..2], 16).map_err(|_| Error::InvalidColor(s.to_string()))?;
        let g = u8::from_str_radix(&hex[2..4], 16).map_err(|_| Error::InvalidColor(s.to_string()))?;
        let b = u8::from_str_radix(&hex[4..6], 16).map_err(|_| Error::InvalidColor(s.to_string()))?;
        Ok(Self { r, g, b })
    }

    /// Euclidean distance to an RGB pixel value.
    #[must_use]
    pub fn distance_to(self, r: u8, g: u8, b: u8) -> f32 {
        let dr = f32::from(self.r) - f32::from(r);
        let dg = f32::from(self.g) - f32::from(g);
        let db = f32::from(self.b) - f32::from(b);
        (dr * dr + dg * dg + db * db).sqrt()
    }
}

impl std::str::FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}
