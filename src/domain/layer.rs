//! The editable layer, the unit of fused output.
//!
//! A layer is a typed, positioned, styled element ready for a design-editing
//! client. Every layer carries exactly one of a text or a shape styling
//! block; the invariant is enforced structurally by [`LayerStyling`] being an
//! enum rather than two optional fields.

use serde::{Deserialize, Serialize};

use super::detection::SegmentKind;
use crate::processors::{BoundingBox, Point};

/// Kind of an assembled layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    /// A text layer (matched or standalone OCR text).
    Text,
    /// A generic shape layer.
    Shape,
    /// A background layer; always sorted beneath everything else.
    Background,
    /// An icon or logo layer.
    Icon,
}

impl From<SegmentKind> for LayerKind {
    fn from(kind: SegmentKind) -> Self {
        match kind {
            SegmentKind::Background => LayerKind::Background,
            SegmentKind::Text => LayerKind::Text,
            SegmentKind::Icon => LayerKind::Icon,
            SegmentKind::Shape => LayerKind::Shape,
        }
    }
}

/// Horizontal text alignment within the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlignment {
    /// Center of the text lies in the left third of the image.
    Left,
    /// Center of the text lies in the middle third.
    Center,
    /// Center of the text lies in the right third.
    Right,
}

/// Styling block for text layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// The text content.
    pub content: String,
    /// Font size in points, `[8, 72]`.
    pub font_size: u32,
    /// Font family. Defaults to a fixed placeholder until font recognition
    /// is wired in.
    pub font_family: String,
    /// Text color as a `#rrggbb` hex string.
    pub color: String,
    /// Bold flag.
    pub bold: bool,
    /// Italic flag.
    pub italic: bool,
    /// Underline flag.
    pub underline: bool,
    /// Horizontal alignment.
    pub align: TextAlignment,
}

/// Styling block for non-text layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// Fill color as a `#rrggbb` hex string.
    pub fill_color: String,
    /// Stroke color, when present.
    pub stroke_color: Option<String>,
    /// Stroke width in pixels.
    pub stroke_width: u32,
}

/// Exactly one styling block per layer.
///
/// Serializes as a `"text"` or `"style"` key so the wire shape matches what
/// downstream editors consume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LayerStyling {
    /// Text styling, present iff the layer kind is text.
    #[serde(rename = "text")]
    Text(TextStyle),
    /// Shape styling for every other kind.
    #[serde(rename = "style")]
    Shape(ShapeStyle),
}

impl LayerStyling {
    /// Returns the text styling block, if this is a text layer.
    pub fn as_text(&self) -> Option<&TextStyle> {
        match self {
            LayerStyling::Text(style) => Some(style),
            LayerStyling::Shape(_) => None,
        }
    }

    /// Returns the shape styling block, if this is a non-text layer.
    pub fn as_shape(&self) -> Option<&ShapeStyle> {
        match self {
            LayerStyling::Shape(style) => Some(style),
            LayerStyling::Text(_) => None,
        }
    }
}

/// An assembled, editable design layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    /// Identifier inherited from the originating detection.
    pub id: String,
    /// Layer kind.
    #[serde(rename = "type")]
    pub kind: LayerKind,
    /// Bounding box in image pixels.
    pub bbox: BoundingBox,
    /// Center point of the layer.
    pub center: Point,
    /// Pixel area of the backing segment mask. Zero for text layers with no
    /// segment geometry behind them, which keeps them last in z-order.
    pub area: u32,
    /// Text content for text layers, `None` otherwise.
    pub content: Option<String>,
    /// The single styling block.
    #[serde(flatten)]
    pub styling: LayerStyling,
    /// Confidence of the detection this layer was built from.
    pub confidence: f32,
    /// Whether the layer can be edited. Always true at creation.
    pub editable: bool,
    /// Whether the layer is locked. Always false at creation.
    pub locked: bool,
    /// Whether the layer is visible. Always true at creation.
    pub visible: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape_layer() -> Layer {
        Layer {
            id: "segment_0".into(),
            kind: LayerKind::Shape,
            bbox: BoundingBox::new(0, 0, 10, 10),
            center: Point::new(5.0, 5.0),
            area: 80,
            content: None,
            styling: LayerStyling::Shape(ShapeStyle {
                fill_color: "#112233".into(),
                stroke_color: None,
                stroke_width: 0,
            }),
            confidence: 0.9,
            editable: true,
            locked: false,
            visible: true,
        }
    }

    #[test]
    fn styling_accessors_are_exclusive() {
        let layer = shape_layer();
        assert!(layer.styling.as_shape().is_some());
        assert!(layer.styling.as_text().is_none());
    }

    #[test]
    fn serializes_style_key_for_shape_layers() {
        let value = serde_json::to_value(shape_layer()).unwrap();
        assert_eq!(value["type"], "shape");
        assert!(value.get("style").is_some());
        assert!(value.get("text").is_none());
        assert_eq!(value["style"]["fill_color"], "#112233");
    }
}
