//! Native pixel representations and their normalization to [`Color`]
//!
//! Decoders hand back pixels in whatever shape is natural for the source:
//! a single grayscale intensity, an explicit RGB triple, or a delimited
//! string of channel values. All of them are normalized here, once, before
//! palette matching.

use crate::color::Color;
use thiserror::Error;

/// Error for pixel values that cannot be normalized to three channels
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PixelError {
    /// Delimited string did not contain exactly three channel values
    #[error("expected 3 channel values, found {found} in '{raw}'")]
    ChannelCount { raw: String, found: usize },
    /// A channel was not an integer in 0..=255
    #[error("invalid channel value '{value}' in '{raw}' (expected an integer 0-255)")]
    InvalidChannel { raw: String, value: String },
}

/// A pixel as exposed by an image source, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PixelValue {
    /// Grayscale intensity, broadcast to all three channels
    Intensity(u8),
    /// Explicit red/green/blue triple
    Rgb([u8; 3]),
    /// Whitespace or comma separated channel values, e.g. `"255 33 33"`
    Delimited(String),
}

impl PixelValue {
    /// Normalize to a canonical [`Color`].
    pub fn normalize(&self) -> Result<Color, PixelError> {
        match self {
            PixelValue::Intensity(v) => Ok(Color::new(*v, *v, *v)),
            PixelValue::Rgb(rgb) => Ok(Color::from(*rgb)),
            PixelValue::Delimited(raw) => parse_delimited(raw),
        }
    }
}

impl From<Color> for PixelValue {
    fn from(c: Color) -> Self {
        PixelValue::Rgb([c.r, c.g, c.b])
    }
}

impl From<[u8; 3]> for PixelValue {
    fn from(rgb: [u8; 3]) -> Self {
        PixelValue::Rgb(rgb)
    }
}

fn parse_delimited(raw: &str) -> Result<Color, PixelError> {
    let parts: Vec<&str> =
        raw.split(|c: char| c.is_whitespace() || c == ',').filter(|p| !p.is_empty()).collect();

    if parts.len() != 3 {
        return Err(PixelError::ChannelCount { raw: raw.to_string(), found: parts.len() });
    }

    let mut channels = [0u8; 3];
    for (slot, part) in channels.iter_mut().zip(&parts) {
        *slot = part.parse::<u8>().map_err(|_| PixelError::InvalidChannel {
            raw: raw.to_string(),
            value: part.to_string(),
        })?;
    }

    Ok(Color::from(channels))
}
