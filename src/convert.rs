//! Conversion pipeline: decode, downsample, encode, collect
//!
//! Every input is processed independently. The sprite set is only handed
//! back once all inputs have been encoded and their heights agree, so a
//! failure anywhere leaves nothing to write.

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::bitmap::Bitmap;
use crate::downsample::{downsample, downsample_factor, sampled_dimensions, DEFAULT_MAX_DIM};
use crate::emit::{EmitError, SpriteSet};
use crate::grid::{encode, EncodeError, Grid};
use crate::import::{is_identifier, load_image, sprite_name};
use crate::palette::{PaletteError, Quantizer, DEFAULT_BLACK_THRESHOLD};
use crate::palettes;

/// Error type for the conversion pipeline
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConvertError {
    /// Input could not be decoded into an image
    #[error("failed to decode '{path}': {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    /// A pixel could not be normalized to three channels
    #[error("'{path}': {source}")]
    Pixel {
        path: PathBuf,
        #[source]
        source: EncodeError,
    },
    /// Maximum dimension must be positive
    #[error("maximum dimension must be at least 1, got {0}")]
    InvalidMaxDim(u32),
    /// Palette or threshold precondition
    #[error(transparent)]
    Palette(#[from] PaletteError),
    /// Height mismatch or duplicate sprite name
    #[error(transparent)]
    Emit(#[from] EmitError),
}

/// Settings shared by every input of a run.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    quantizer: Quantizer,
    max_dim: u32,
}

impl ConvertOptions {
    pub fn new(quantizer: Quantizer, max_dim: u32) -> Result<Self, ConvertError> {
        if max_dim == 0 {
            return Err(ConvertError::InvalidMaxDim(max_dim));
        }
        Ok(Self { quantizer, max_dim })
    }

    pub fn quantizer(&self) -> &Quantizer {
        &self.quantizer
    }

    pub fn max_dim(&self) -> u32 {
        self.max_dim
    }
}

impl Default for ConvertOptions {
    /// Arcade palette, 50 pixel bound, near-black distance 10.
    fn default() -> Self {
        let quantizer = match Quantizer::new(palettes::default_palette(), DEFAULT_BLACK_THRESHOLD) {
            Ok(q) => q,
            Err(e) => unreachable!("default quantizer is valid: {}", e),
        };
        Self { quantizer, max_dim: DEFAULT_MAX_DIM }
    }
}

/// Shrink `image` to fit `max_dim`, warning when it has to.
pub fn fit_image(name: &str, image: Bitmap, max_dim: u32) -> Bitmap {
    let (width, height) = image.dimensions();
    if let Some(factor) = downsample_factor(width, height, max_dim) {
        let (new_width, new_height) = sampled_dimensions(width, height, factor);
        tracing::warn!(
            file = name,
            width,
            height,
            factor,
            new_width,
            new_height,
            "downsampling {} (size: {}, {})",
            name,
            width,
            height
        );
    }
    downsample(image, max_dim)
}

/// Decode, fit and encode a single file.
pub fn convert_file(path: &Path, options: &ConvertOptions) -> Result<Grid, ConvertError> {
    let image = load_image(path)
        .map_err(|source| ConvertError::Decode { path: path.to_path_buf(), source })?;
    let image = fit_image(&path.display().to_string(), image, options.max_dim);
    let grid = encode(&image, &options.quantizer)
        .map_err(|source| ConvertError::Pixel { path: path.to_path_buf(), source })?;
    tracing::debug!(file = %path.display(), width = grid.width(), height = grid.height(), "encoded");
    Ok(grid)
}

/// Convert every file in order into one height-consistent sprite set.
pub fn convert_files<P: AsRef<Path>>(
    paths: &[P],
    options: &ConvertOptions,
) -> Result<SpriteSet, ConvertError> {
    let mut sprites = SpriteSet::new();
    for path in paths {
        let path = path.as_ref();
        let name = sprite_name(path);
        if !is_identifier(&name) {
            tracing::warn!(file = %path.display(), name = %name, "sprite name is not a valid identifier");
        }
        let grid = convert_file(path, options)?;
        sprites.push(name, grid)?;
    }
    sprites.check_heights()?;
    Ok(sprites)
}
