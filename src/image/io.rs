//! Convenience helpers for loading images via the `image` crate.
//!
//! Available when the `image-io` feature is enabled. Template loading caps
//! the largest edge so registered templates stay cheap to scan.

use crate::image::{OwnedImage, RgbaView};
use crate::util::{FrameMatchError, FrameMatchResult};
use std::path::Path;

/// Default cap on a template's largest edge at load time.
pub const TEMPLATE_MAX_DIM: u32 = 150;

/// Creates a borrowed view from an RGBA image buffer.
pub fn view_from_rgba_image(img: &image::RgbaImage) -> FrameMatchResult<RgbaView<'_>> {
    RgbaView::from_rgba8(img.as_raw(), img.width() as usize, img.height() as usize)
}

/// Creates an owned image from an RGBA image buffer.
pub fn owned_from_rgba_image(img: &image::RgbaImage) -> FrameMatchResult<OwnedImage> {
    OwnedImage::new(
        img.as_raw().clone(),
        img.width() as usize,
        img.height() as usize,
    )
}

/// Creates an owned RGBA image from a dynamic image.
pub fn owned_from_dynamic_image(img: &image::DynamicImage) -> FrameMatchResult<OwnedImage> {
    owned_from_rgba_image(&img.to_rgba8())
}

/// Loads an image from disk and converts it to an owned RGBA image.
pub fn load_rgba_image<P: AsRef<Path>>(path: P) -> FrameMatchResult<OwnedImage> {
    let img = image::open(path).map_err(|err| FrameMatchError::ImageIo {
        reason: err.to_string(),
    })?;
    owned_from_dynamic_image(&img)
}

/// Loads a template image, downscaling so its largest edge fits `max_dim`.
///
/// Aspect ratio is preserved; images already within the cap are left alone.
/// Pass [`TEMPLATE_MAX_DIM`] for the stock registration behavior.
pub fn load_template_image<P: AsRef<Path>>(path: P, max_dim: u32) -> FrameMatchResult<OwnedImage> {
    let img = image::open(path).map_err(|err| FrameMatchError::ImageIo {
        reason: err.to_string(),
    })?;
    let img = if max_dim > 0 && img.width().max(img.height()) > max_dim {
        img.resize(max_dim, max_dim, image::imageops::FilterType::Triangle)
    } else {
        img
    };
    owned_from_dynamic_image(&img)
}
