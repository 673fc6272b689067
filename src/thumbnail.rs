//! Bounded, aspect-preserving image downscaling
//!
//! Derives the two display representations a record carries: the grid
//! thumbnail and the detail-view image. Scaling never exceeds the requested
//! bound in either dimension and never upscales past the source size.

use crate::error::{Error, Result};
use image::{DynamicImage, ImageReader, imageops::FilterType};
use std::path::Path;

/// Maximum edge length of the eager grid thumbnail
pub const THUMBNAIL_BOUND: u32 = 128;

/// Maximum edge length of the lazily derived detail view
pub const FULL_VIEW_BOUND: u32 = 840;

/// Decode an image file into pixel data
pub fn decode_image(path: &Path) -> Result<DynamicImage> {
    ImageReader::open(path)
        .map_err(|e| Error::decode(path, e))?
        .decode()
        .map_err(|e| Error::decode(path, e))
}

/// Compute the scaled dimensions that fit `(src_w, src_h)` inside
/// `(max_w, max_h)` without changing the aspect ratio or upscaling.
///
/// Scale factor is `min(max_w/src_w, max_h/src_h, 1.0)`; each dimension is
/// floored, but never below one pixel. Deterministic for identical inputs.
pub fn fit_within(src_w: u32, src_h: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    if src_w == 0 || src_h == 0 {
        return (0, 0);
    }

    let scale = (max_w as f64 / src_w as f64)
        .min(max_h as f64 / src_h as f64)
        .min(1.0);

    let w = ((src_w as f64 * scale).floor() as u32).max(1);
    let h = ((src_h as f64 * scale).floor() as u32).max(1);
    (w, h)
}

/// Downscale an image so neither dimension exceeds the bound
///
/// Returns a clone of the source when it already fits.
pub fn scale_to_fit(image: &DynamicImage, max_w: u32, max_h: u32) -> DynamicImage {
    let (w, h) = fit_within(image.width(), image.height(), max_w, max_h);

    if (w, h) == (image.width(), image.height()) {
        return image.clone();
    }

    // fit_within already fixed the aspect ratio, so exact resize is safe
    image.resize_exact(w, h, FilterType::Triangle)
}
