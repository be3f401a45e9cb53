//! In-memory image: a width x height grid of native pixel values
//!
//! Decoded images keep their channel data packed (one byte per grayscale
//! pixel, three per RGB pixel). Only bitmaps built from arbitrary
//! [`PixelValue`]s store one enum per pixel.

use crate::pixel::PixelValue;
use thiserror::Error;

/// Error constructing a bitmap
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BitmapError {
    /// Width or height is zero
    #[error("image dimensions must be at least 1x1, got {width}x{height}")]
    Empty { width: u32, height: u32 },
    /// Pixel buffer length does not match width * height
    #[error("expected {expected} pixels for {width}x{height}, got {actual}")]
    LengthMismatch { width: u32, height: u32, expected: usize, actual: usize },
}

/// Row-major pixel storage
#[derive(Debug, Clone)]
enum PixelBuffer {
    Intensity(Vec<u8>),
    Rgb(Vec<[u8; 3]>),
    Values(Vec<PixelValue>),
}

impl PixelBuffer {
    fn len(&self) -> usize {
        match self {
            PixelBuffer::Intensity(v) => v.len(),
            PixelBuffer::Rgb(v) => v.len(),
            PixelBuffer::Values(v) => v.len(),
        }
    }

    fn get(&self, index: usize) -> PixelValue {
        match self {
            PixelBuffer::Intensity(v) => PixelValue::Intensity(v[index]),
            PixelBuffer::Rgb(v) => PixelValue::Rgb(v[index]),
            PixelBuffer::Values(v) => v[index].clone(),
        }
    }

    /// Same representation, holding the pixels at `indices` in order.
    fn pick(&self, indices: impl Iterator<Item = usize>) -> PixelBuffer {
        match self {
            PixelBuffer::Intensity(v) => PixelBuffer::Intensity(indices.map(|i| v[i]).collect()),
            PixelBuffer::Rgb(v) => PixelBuffer::Rgb(indices.map(|i| v[i]).collect()),
            PixelBuffer::Values(v) => PixelBuffer::Values(indices.map(|i| v[i].clone()).collect()),
        }
    }
}

/// A decoded image, stored row-major.
#[derive(Debug, Clone)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: PixelBuffer,
}

impl Bitmap {
    fn with_buffer(width: u32, height: u32, pixels: PixelBuffer) -> Result<Self, BitmapError> {
        if width == 0 || height == 0 {
            return Err(BitmapError::Empty { width, height });
        }
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(BitmapError::LengthMismatch {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self { width, height, pixels })
    }

    /// Create a bitmap from a row-major pixel buffer.
    pub fn new(width: u32, height: u32, pixels: Vec<PixelValue>) -> Result<Self, BitmapError> {
        Self::with_buffer(width, height, PixelBuffer::Values(pixels))
    }

    /// Create a grayscale bitmap from row-major intensities.
    pub fn from_intensities(width: u32, height: u32, data: Vec<u8>) -> Result<Self, BitmapError> {
        Self::with_buffer(width, height, PixelBuffer::Intensity(data))
    }

    /// Create an RGB bitmap from row-major channel triples.
    pub fn from_rgb(width: u32, height: u32, data: Vec<[u8; 3]>) -> Result<Self, BitmapError> {
        Self::with_buffer(width, height, PixelBuffer::Rgb(data))
    }

    /// Create a bitmap by evaluating `f(x, y)` for every pixel.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Result<Self, BitmapError>
    where
        F: FnMut(u32, u32) -> PixelValue,
    {
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self::new(width, height, pixels)
    }

    /// Create a bitmap from rows of pixels. All rows must have the same length.
    pub fn from_rows<P: Into<PixelValue>>(rows: Vec<Vec<P>>) -> Result<Self, BitmapError> {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |r| r.len()) as u32;
        if let Some(row) = rows.iter().find(|r| r.len() != width as usize) {
            return Err(BitmapError::LengthMismatch {
                width,
                height,
                expected: width as usize,
                actual: row.len(),
            });
        }
        let pixels: Vec<PixelValue> = rows.into_iter().flatten().map(Into::into).collect();
        Self::new(width, height, pixels)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn index(&self, x: u32, y: u32) -> usize {
        assert!(x < self.width && y < self.height, "pixel ({}, {}) out of bounds", x, y);
        y as usize * self.width as usize + x as usize
    }

    /// Pixel at `(x, y)`. Panics if out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> PixelValue {
        self.pixels.get(self.index(x, y))
    }

    /// Pixels of row `y`, left to right. Panics if out of bounds.
    pub fn row(&self, y: u32) -> impl Iterator<Item = PixelValue> + '_ {
        let start = self.index(0, y);
        (start..start + self.width as usize).map(move |i| self.pixels.get(i))
    }

    /// Build a `width` x `height` bitmap whose pixel `(x, y)` is this
    /// bitmap's pixel at `source(x, y)`, keeping the storage format.
    pub fn resample<F>(&self, width: u32, height: u32, mut source: F) -> Result<Self, BitmapError>
    where
        F: FnMut(u32, u32) -> (u32, u32),
    {
        let coords = (0..height).flat_map(|y| (0..width).map(move |x| (x, y)));
        let indices: Vec<usize> = coords
            .map(|(x, y)| {
                let (sx, sy) = source(x, y);
                self.index(sx, sy)
            })
            .collect();
        Self::with_buffer(width, height, self.pixels.pick(indices.into_iter()))
    }
}

impl PartialEq for Bitmap {
    /// Pixel-wise equality, regardless of storage format.
    fn eq(&self, other: &Self) -> bool {
        self.dimensions() == other.dimensions()
            && (0..self.pixels.len()).all(|i| self.pixels.get(i) == other.pixels.get(i))
    }
}

impl Eq for Bitmap {}
