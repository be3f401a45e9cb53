//! hexsprite - Compile bitmap images into palette-indexed sprite literals
//!
//! This library provides functionality to:
//! - Decode bitmaps and normalize their pixels to RGB
//! - Downsample oversized images by point sampling
//! - Match every pixel to a slot of an ordered palette of up to 16 colors
//! - Emit `const <name> = img\`...\`` blocks for block-based game editors
//!
//! ```
//! use hexsprite::bitmap::Bitmap;
//! use hexsprite::grid::encode;
//! use hexsprite::palette::Quantizer;
//! use hexsprite::palettes;
//!
//! let image = Bitmap::from_rows(vec![vec![[0u8, 0, 0], [255, 255, 255]]]).unwrap();
//! let quantizer = Quantizer::new(palettes::default_palette(), 10.0).unwrap();
//! let grid = encode(&image, &quantizer).unwrap();
//! assert_eq!(grid.rows(), &[" 0 1"]);
//! ```

pub mod bitmap;
pub mod cli;
pub mod color;
pub mod config;
pub mod convert;
pub mod downsample;
pub mod emit;
pub mod grid;
pub mod import;
pub mod palette;
pub mod palettes;
pub mod pixel;
pub mod suggest;
