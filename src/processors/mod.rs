//! Leaf processors of the fusion pipeline.
//!
//! Each submodule owns one concern and depends on nothing above it:
//!
//! * `geometry` - Bounding-box and point primitives with overlap arithmetic
//! * `classification` - Rule-based geometric segment classification
//! * `matching` - Greedy segment-to-text assignment
//! * `color` - Palette extraction, text-color detection and color naming
//! * `alignment` - Horizontal text alignment detection

pub mod alignment;
pub mod classification;
pub mod color;
pub mod geometry;
pub mod matching;

pub use alignment::detect_alignment;
pub use classification::{ClassificationRule, GeometricFeatures, SegmentClassifier};
pub use color::ColorSampler;
pub use geometry::{BoundingBox, Point};
pub use matching::{MatchOutcome, match_segments};
