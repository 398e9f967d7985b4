//! Provider traits: the seams to the external detection models.
//!
//! The fusion core never talks to a neural network directly. Segmentation,
//! OCR and layout description are capabilities injected by the caller through
//! these traits, bundled into a [`ProviderContext`] that is constructed once
//! and passed into the pipeline. This replaces any notion of process-global
//! model handles.

use image::RgbImage;
use serde::{Deserialize, Serialize};

use crate::core::FusionResult;
use crate::domain::{Segment, TextElement};

/// A free-text layout hint extracted by the layout model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutHint {
    /// Identifier assigned by the provider.
    pub id: String,
    /// The hinted content or position keyword.
    pub content: String,
    /// Provider confidence in `[0, 1]`.
    pub confidence: f32,
}

/// Coarse layout description of a whole image.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutSummary {
    /// The raw free-text description generated by the layout model.
    pub description: String,
    /// Structured hints parsed out of the description.
    pub hints: Vec<LayoutHint>,
}

/// Produces raw segments (masks + boxes) for an image.
pub trait SegmentationProvider {
    /// Segments the image into region proposals.
    ///
    /// Implementations should filter degenerate masks themselves; the fusion
    /// core treats the returned list as already validated.
    fn segment(&self, image: &RgbImage) -> FusionResult<Vec<Segment>>;
}

/// Produces raw text boxes for an image.
pub trait TextRecognitionProvider {
    /// Extracts text elements from the image.
    ///
    /// Elements with empty content (after trimming) must be dropped by the
    /// implementation before returning.
    fn extract_text(&self, image: &RgbImage) -> FusionResult<Vec<TextElement>>;
}

/// Produces a coarse free-text layout description for an image.
pub trait LayoutProvider {
    /// Describes the overall layout of the image.
    fn describe_layout(&self, image: &RgbImage) -> FusionResult<LayoutSummary>;
}

/// The three provider capabilities the pipeline runs against.
///
/// Constructed once by the caller and borrowed for the duration of a request;
/// the fusion core holds no provider state of its own.
pub struct ProviderContext<'a> {
    /// The segmentation model.
    pub segmentation: &'a dyn SegmentationProvider,
    /// The OCR engine.
    pub text_recognition: &'a dyn TextRecognitionProvider,
    /// The layout description model.
    pub layout: &'a dyn LayoutProvider,
}

impl<'a> ProviderContext<'a> {
    /// Bundles the three provider capabilities.
    pub fn new(
        segmentation: &'a dyn SegmentationProvider,
        text_recognition: &'a dyn TextRecognitionProvider,
        layout: &'a dyn LayoutProvider,
    ) -> Self {
        Self {
            segmentation,
            text_recognition,
            layout,
        }
    }
}
