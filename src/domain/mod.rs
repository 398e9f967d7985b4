//! Domain types for the fusion pipeline.
//!
//! This module defines the data model shared across the crate: raw detections
//! coming in from the providers, and the editable layers and color swatches
//! going out to the caller.

pub mod color;
pub mod detection;
pub mod layer;

pub use color::{ColorSwatch, Rgb};
pub use detection::{Segment, SegmentKind, TextElement, estimate_font_size};
pub use layer::{Layer, LayerKind, LayerStyling, ShapeStyle, TextAlignment, TextStyle};
