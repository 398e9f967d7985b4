//! Horizontal text alignment detection.
//!
//! Classifies alignment from where the center of a text box falls relative to
//! fractional thresholds of the image width. The comparisons are strict, so a
//! center sitting exactly on `left_fraction * width` is center-aligned, not
//! left-aligned.

use crate::core::AlignmentConfig;
use crate::domain::TextAlignment;
use crate::processors::BoundingBox;

/// Detects the horizontal alignment of a text box within the image.
pub fn detect_alignment(
    bbox: &BoundingBox,
    image_width: u32,
    config: &AlignmentConfig,
) -> TextAlignment {
    let center_x = bbox.x as f32 + bbox.width as f32 / 2.0;
    let width = image_width as f32;

    if center_x < width * config.left_fraction {
        TextAlignment::Left
    } else if center_x > width * config.right_fraction {
        TextAlignment::Right
    } else {
        TextAlignment::Center
    }
}
