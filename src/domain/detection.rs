//! Raw detection types produced by the external providers.
//!
//! Segments come from the segmentation provider and text elements from the
//! OCR provider. Both are created once per request and are immutable inside
//! the fusion core, except for the segment kind assigned by classification.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::processors::{BoundingBox, Point};

/// Semantic kind inferred for a segment from its geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    /// Large region covering most of the image.
    Background,
    /// Horizontally elongated region likely holding text.
    Text,
    /// Small, roughly square region (logo, glyph, button).
    Icon,
    /// Anything else.
    Shape,
}

/// A geometric region proposal from the segmentation provider.
///
/// The pixel mask is exclusively owned by the segment until the segment is
/// converted into a layer.
#[derive(Debug, Clone)]
pub struct Segment {
    /// Identifier assigned by the provider (e.g. `segment_3`).
    pub id: String,
    /// Per-pixel boolean coverage mask, image-sized.
    pub mask: Array2<bool>,
    /// Tight pixel bounding box of the mask.
    pub bbox: BoundingBox,
    /// Geometric centroid of the bounding box.
    pub center: Point,
    /// Mask pixel count. Never exceeds `bbox.width * bbox.height`.
    pub area: u32,
    /// Mask quality predicted by the segmentation model, in `[0, 1]`.
    pub predicted_iou: f32,
    /// Mask stability under threshold perturbation, in `[0, 1]`.
    pub stability_score: f32,
    /// Width over height of the bounding box; 1.0 when the height is zero.
    pub aspect_ratio: f32,
    /// Semantic kind, assigned by the classifier.
    pub kind: SegmentKind,
}

impl Segment {
    /// Aspect ratio for a box extent, defaulting to 1.0 for zero height.
    pub fn aspect_ratio_of(width: u32, height: u32) -> f32 {
        if height == 0 {
            1.0
        } else {
            width as f32 / height as f32
        }
    }
}

/// A text box produced by the OCR provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextElement {
    /// Identifier assigned by the provider (e.g. `text_0`).
    pub id: String,
    /// Recognized text. Non-empty after trimming.
    pub content: String,
    /// Recognition confidence in `[0, 1]`.
    pub confidence: f32,
    /// Axis-aligned bounding box of the text.
    pub bbox: BoundingBox,
    /// Center of the text box.
    pub center: Point,
    /// Original detection polygon, four or more points, when available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub polygon: Option<Vec<Point>>,
    /// Estimated font size in points, clamped to `[8, 72]`.
    pub font_size: u32,
}

/// Estimates a font size in points from a text height in pixels.
///
/// Uses the 96 DPI approximation (1 pt ≈ 1.333 px) and clamps the result to
/// the `[8, 72]` range carried by [`TextElement::font_size`].
pub fn estimate_font_size(pixel_height: f32) -> u32 {
    let points = (pixel_height / 1.333) as i64;
    points.clamp(8, 72) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_ratio_defaults_to_one_for_zero_height() {
        assert_eq!(Segment::aspect_ratio_of(50, 0), 1.0);
        assert_eq!(Segment::aspect_ratio_of(100, 20), 5.0);
    }

    #[test]
    fn font_size_is_clamped() {
        assert_eq!(estimate_font_size(4.0), 8);
        assert_eq!(estimate_font_size(16.0), 12);
        assert_eq!(estimate_font_size(500.0), 72);
    }
}
