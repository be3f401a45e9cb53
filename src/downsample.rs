//! Integer-factor point-sampling of oversized images
//!
//! Both axes are reduced by the same factor so the aspect ratio survives.
//! No averaging is done: every `factor`-th pixel, starting at the origin,
//! is kept and the rest are dropped.

use crate::bitmap::Bitmap;

/// Default bound on either dimension of an encoded sprite.
pub const DEFAULT_MAX_DIM: u32 = 50;

/// The factor `downsample` would use, or `None` if the image already fits.
///
/// `max_dim` must be at least 1.
pub fn downsample_factor(width: u32, height: u32, max_dim: u32) -> Option<u32> {
    if width <= max_dim && height <= max_dim {
        return None;
    }
    let scale_w = width.div_ceil(max_dim);
    let scale_h = height.div_ceil(max_dim);
    Some(scale_w.max(scale_h))
}

/// Dimensions after sampling every `factor`-th pixel.
pub fn sampled_dimensions(width: u32, height: u32, factor: u32) -> (u32, u32) {
    (width.div_ceil(factor), height.div_ceil(factor))
}

/// Reduce `image` so neither dimension exceeds `max_dim`.
///
/// Returns the image unchanged when it already fits.
pub fn downsample(image: Bitmap, max_dim: u32) -> Bitmap {
    match downsample_factor(image.width(), image.height(), max_dim) {
        Some(factor) => subsample(&image, factor),
        None => image,
    }
}

/// Keep pixels whose coordinates are both multiples of `factor`.
pub fn subsample(image: &Bitmap, factor: u32) -> Bitmap {
    let (width, height) = sampled_dimensions(image.width(), image.height(), factor);
    match image.resample(width, height, |x, y| (x * factor, y * factor)) {
        Ok(bitmap) => bitmap,
        // ceil division of a non-empty image never yields a zero dimension
        Err(e) => unreachable!("subsampled bitmap is non-empty: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::PixelValue;

    fn gradient(width: u32, height: u32) -> Bitmap {
        Bitmap::from_fn(width, height, |x, y| PixelValue::Rgb([x as u8, y as u8, 0])).unwrap()
    }

    #[test]
    fn test_identity_when_within_bounds() {
        let img = gradient(50, 50);
        let out = downsample(img.clone(), DEFAULT_MAX_DIM);
        assert_eq!(out, img);

        let small = gradient(3, 7);
        assert_eq!(downsample(small.clone(), DEFAULT_MAX_DIM), small);
    }

    #[test]
    fn test_factor_none_within_bounds() {
        assert_eq!(downsample_factor(50, 50, 50), None);
        assert_eq!(downsample_factor(1, 1, 1), None);
    }

    #[test]
    fn test_factor_uses_larger_axis() {
        assert_eq!(downsample_factor(120, 80, 50), Some(3));
        assert_eq!(downsample_factor(80, 120, 50), Some(3));
        assert_eq!(downsample_factor(51, 10, 50), Some(2));
        assert_eq!(downsample_factor(100, 100, 50), Some(2));
        assert_eq!(downsample_factor(101, 100, 50), Some(3));
    }

    #[test]
    fn test_120x80_downsamples_to_40x27() {
        let out = downsample(gradient(120, 80), 50);
        assert_eq!(out.dimensions(), (40, 27));
    }

    #[test]
    fn test_point_sampling_picks_every_factor_pixel() {
        let out = downsample(gradient(120, 80), 50);
        // factor 3: output (x, y) came from input (3x, 3y)
        assert_eq!(out.pixel(0, 0), PixelValue::Rgb([0, 0, 0]));
        assert_eq!(out.pixel(1, 0), PixelValue::Rgb([3, 0, 0]));
        assert_eq!(out.pixel(39, 26), PixelValue::Rgb([117, 78, 0]));
    }

    #[test]
    fn test_result_fits_within_max_dim() {
        for (w, h) in [(51, 1), (1, 51), (200, 3), (99, 149), (500, 499)] {
            let out = downsample(gradient(w, h), 50);
            assert!(out.width() <= 50 && out.height() <= 50, "{}x{} -> {:?}", w, h, out.dimensions());
            let factor = downsample_factor(w, h, 50).unwrap();
            assert_eq!(out.dimensions(), (w.div_ceil(factor), h.div_ceil(factor)));
        }
    }

    #[test]
    fn test_subsample_is_lossy() {
        // a single bright pixel off the sampling lattice disappears
        let img = Bitmap::from_fn(4, 4, |x, y| {
            if x == 1 && y == 1 {
                PixelValue::Intensity(255)
            } else {
                PixelValue::Intensity(0)
            }
        })
        .unwrap();
        let out = subsample(&img, 2);
        assert_eq!(out.dimensions(), (2, 2));
        assert!((0..2).flat_map(|y| out.row(y)).all(|p| p == PixelValue::Intensity(0)));
    }
}
