//! Ordered palettes and nearest-color matching
//!
//! Slot 0 is the background slot. It is never reached by distance
//! comparison: a pixel maps to 0 only when it lies within the near-black
//! threshold of pure black, whatever color the palette stores at slot 0.
//! Every other pixel is matched against slots 1.. by Euclidean RGB
//! distance, the lowest index winning ties.

use crate::color::Color;
use thiserror::Error;

/// Palettes index into single hex digits, so 16 slots at most.
pub const MAX_PALETTE_LEN: usize = 16;

/// Default near-black override distance.
pub const DEFAULT_BLACK_THRESHOLD: f64 = 10.0;

/// Error type for palette validation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PaletteError {
    /// Fewer than two slots: nothing to match beyond the background slot
    #[error("palette '{name}' has {len} color(s), at least 2 are required")]
    TooFew { name: String, len: usize },
    /// More slots than a single hex digit can address
    #[error("palette '{name}' has {len} colors, at most 16 are supported")]
    TooMany { name: String, len: usize },
    /// Near-black threshold is negative or not a number
    #[error("near-black threshold must be a finite, non-negative number, got {0}")]
    InvalidThreshold(f64),
}

/// A fixed, ordered list of 2 to 16 colors.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    name: String,
    colors: Vec<Color>,
}

impl Palette {
    /// Create a palette, checking the slot count.
    pub fn new(name: impl Into<String>, colors: Vec<Color>) -> Result<Self, PaletteError> {
        let name = name.into();
        let len = colors.len();
        if len < 2 {
            return Err(PaletteError::TooFew { name, len });
        }
        if len > MAX_PALETTE_LEN {
            return Err(PaletteError::TooMany { name, len });
        }
        Ok(Self { name, colors })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false, a palette holds at least two colors.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Index of the best match for `pixel`.
    ///
    /// Returns 0 when `pixel` is closer than `black_threshold` to pure
    /// black, otherwise the index in `1..len` with the smallest distance.
    pub fn match_color(&self, pixel: Color, black_threshold: f64) -> u8 {
        if pixel.distance(Color::BLACK) < black_threshold {
            return 0;
        }

        let mut best = 1usize;
        let mut lowest = f64::INFINITY;
        for (idx, candidate) in self.colors.iter().enumerate().skip(1) {
            let d = pixel.distance(*candidate);
            // strict comparison keeps the first index on ties
            if d < lowest {
                best = idx;
                lowest = d;
            }
        }
        best as u8
    }
}

/// A palette paired with its near-black threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct Quantizer {
    palette: Palette,
    black_threshold: f64,
}

impl Quantizer {
    pub fn new(palette: Palette, black_threshold: f64) -> Result<Self, PaletteError> {
        if !black_threshold.is_finite() || black_threshold < 0.0 {
            return Err(PaletteError::InvalidThreshold(black_threshold));
        }
        Ok(Self { palette, black_threshold })
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn black_threshold(&self) -> f64 {
        self.black_threshold
    }

    /// Palette index for `pixel`, in `0..palette.len()`.
    pub fn match_index(&self, pixel: Color) -> u8 {
        self.palette.match_color(pixel, self.black_threshold)
    }
}
