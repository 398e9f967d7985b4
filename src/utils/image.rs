//! Image helpers for the fusion pipeline.
//!
//! Loading, proportional downscaling, clamped region cropping, and RGBA
//! cutout extraction for segment masks.

use image::imageops::FilterType;
use image::{DynamicImage, Rgba, RgbaImage, RgbImage};
use ndarray::Array2;
use tracing::warn;

use crate::core::{FusionError, FusionResult};
use crate::processors::BoundingBox;

/// Converts a DynamicImage to an RgbImage.
pub fn dynamic_to_rgb(img: DynamicImage) -> RgbImage {
    img.to_rgb8()
}

/// Loads an image from a file path and converts it to RgbImage.
///
/// # Errors
///
/// Returns `FusionError::ImageLoad` if the image cannot be opened or decoded.
pub fn load_image(path: &std::path::Path) -> FusionResult<RgbImage> {
    let img = image::open(path).map_err(FusionError::ImageLoad)?;
    Ok(dynamic_to_rgb(img))
}

/// Downscales an image proportionally so its longest edge does not exceed
/// `max_size`. Images already within the limit are returned unchanged.
pub fn downscale_to_fit(image: &RgbImage, max_size: u32) -> RgbImage {
    let (width, height) = image.dimensions();
    let longest = width.max(height);
    if longest <= max_size || longest == 0 {
        return image.clone();
    }

    let scale = max_size as f64 / longest as f64;
    let new_width = ((width as f64 * scale) as u32).max(1);
    let new_height = ((height as f64 * scale) as u32).max(1);
    image::imageops::resize(image, new_width, new_height, FilterType::Triangle)
}

/// Crops a bounding-box region out of an image, clamped to the image bounds.
///
/// Returns `None` when the clamped region is empty (the box lies outside the
/// image or has zero extent), logging a warning; callers treat that as a
/// degenerate region and fall back rather than abort.
pub fn crop_region(image: &RgbImage, bbox: &BoundingBox) -> Option<RgbImage> {
    let (img_width, img_height) = image.dimensions();

    let left = bbox.x.clamp(0, img_width as i32) as u32;
    let top = bbox.y.clamp(0, img_height as i32) as u32;
    let right = bbox.right().clamp(0, img_width as i64) as u32;
    let bottom = bbox.bottom().clamp(0, img_height as i64) as u32;

    if right <= left || bottom <= top {
        warn!(
            x = bbox.x,
            y = bbox.y,
            width = bbox.width,
            height = bbox.height,
            "degenerate crop region"
        );
        return None;
    }

    Some(image::imageops::crop_imm(image, left, top, right - left, bottom - top).to_image())
}

/// Extracts one segment from an image as an RGBA cutout: pixels covered by
/// the mask keep their color with full alpha, everything else is transparent.
///
/// # Errors
///
/// Returns `FusionError::InvalidInput` when the mask dimensions do not match
/// the image.
pub fn mask_cutout(image: &RgbImage, mask: &Array2<bool>) -> FusionResult<RgbaImage> {
    let (width, height) = image.dimensions();
    let (mask_height, mask_width) = mask.dim();

    if mask_width != width as usize || mask_height != height as usize {
        return Err(FusionError::invalid_input(format!(
            "mask is {mask_width}x{mask_height} but image is {width}x{height}"
        )));
    }

    let mut cutout = RgbaImage::new(width, height);
    for (x, y, pixel) in image.enumerate_pixels() {
        let alpha = if mask[(y as usize, x as usize)] {
            255
        } else {
            0
        };
        let [r, g, b] = pixel.0;
        cutout.put_pixel(x, y, Rgba([r, g, b, alpha]));
    }

    Ok(cutout)
}
