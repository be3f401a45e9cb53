//! Grid encoding: one hex digit per pixel, one text row per image row
//!
//! Each digit is written with a leading space, so a row of width 3 reads
//! `" 0 1 f"`. This is the layout the sprite literal parser expects.

use crate::bitmap::Bitmap;
use crate::palette::Quantizer;
use crate::pixel::PixelError;
use std::fmt;
use thiserror::Error;

/// A pixel that could not be normalized, with its position
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("pixel ({x}, {y}): {source}")]
pub struct EncodeError {
    pub x: u32,
    pub y: u32,
    #[source]
    pub source: PixelError,
}

/// Textual palette-index encoding of an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    rows: Vec<String>,
}

impl Grid {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.rows.len() as u32
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// Palette indices of row `y`, parsed back from the text.
    pub fn indices(&self, y: usize) -> Vec<u8> {
        self.rows[y]
            .split_whitespace()
            .filter_map(|d| u8::from_str_radix(d, 16).ok())
            .collect()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

/// Lowercase hex digit for a palette index below 16.
pub fn index_digit(index: u8) -> char {
    match char::from_digit(u32::from(index), 16) {
        Some(c) => c,
        None => unreachable!("palette index {} exceeds a single hex digit", index),
    }
}

/// Encode `image` row by row against the quantizer's palette.
pub fn encode(image: &Bitmap, quantizer: &Quantizer) -> Result<Grid, EncodeError> {
    let mut rows = Vec::with_capacity(image.height() as usize);

    for y in 0..image.height() {
        let mut row = String::with_capacity(image.width() as usize * 2);
        for (x, pixel) in image.row(y).enumerate() {
            let color =
                pixel.normalize().map_err(|source| EncodeError { x: x as u32, y, source })?;
            row.push(' ');
            row.push(index_digit(quantizer.match_index(color)));
        }
        rows.push(row);
    }

    Ok(Grid { width: image.width(), rows })
}
