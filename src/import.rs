//! Image file decoding into [`Bitmap`]s.
//!
//! Any format the `image` crate can open is accepted. Grayscale images keep
//! their single-channel intensity; everything else is read as RGB. Alpha is
//! discarded.

use image::error::{LimitError, LimitErrorKind};
use image::io::Reader as ImageReader;
use image::{ColorType, DynamicImage, GenericImageView, ImageError};
use std::path::Path;

use crate::bitmap::{Bitmap, BitmapError};

/// Open and decode the image at `path`.
///
/// The format is detected from the file contents, falling back to the
/// extension, so extensionless inputs decode too. Images with a zero
/// dimension are rejected as a decode error.
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<Bitmap, ImageError> {
    let img = ImageReader::open(path.as_ref())?.with_guessed_format()?.decode()?;
    bitmap_from_dynamic(&img)
        .map_err(|_| ImageError::Limits(LimitError::from_kind(LimitErrorKind::DimensionError)))
}

/// Convert a decoded image into a [`Bitmap`].
pub fn bitmap_from_dynamic(img: &DynamicImage) -> Result<Bitmap, BitmapError> {
    let (width, height) = img.dimensions();
    match img.color() {
        ColorType::L8 | ColorType::La8 | ColorType::L16 | ColorType::La16 => {
            Bitmap::from_intensities(width, height, img.to_luma8().into_raw())
        }
        _ => Bitmap::from_rgb(width, height, img.to_rgb8().pixels().map(|p| p.0).collect()),
    }
}

/// Sprite identifier for an input file: its base name without extension.
pub fn sprite_name(path: &Path) -> String {
    path.file_stem().unwrap_or_default().to_string_lossy().into_owned()
}

/// Whether `name` can be used as a JavaScript `const` identifier.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
