//! Layer assembly, the top-level fusion step.
//!
//! Takes the raw detections of one request, classifies the segments, runs the
//! matching pass, synthesizes per-layer styling (colors, alignment), and
//! returns the final deterministically ordered layer list. The whole step is
//! a pure, synchronous transformation: all state it builds (including the
//! consumed-text bookkeeping inside matching) lives and dies with one call.

use std::cmp::Reverse;

use image::RgbImage;
use tracing::{debug, warn};

use crate::core::{FusionConfig, FusionError, FusionResult};
use crate::domain::{
    Layer, LayerKind, LayerStyling, Rgb, Segment, SegmentKind, ShapeStyle, TextElement, TextStyle,
};
use crate::processors::{ColorSampler, SegmentClassifier, detect_alignment, match_segments};
use crate::utils::crop_region;

/// Font family placeholder used until font recognition is wired in.
const DEFAULT_FONT_FAMILY: &str = "Arial";

/// Assembles editable layers from raw detections.
pub struct LayerAssembler {
    classifier: SegmentClassifier,
    sampler: ColorSampler,
    config: FusionConfig,
}

impl LayerAssembler {
    /// Creates an assembler with the given configuration.
    pub fn new(config: FusionConfig) -> Self {
        Self {
            classifier: SegmentClassifier::new(config.classifier),
            sampler: ColorSampler::new(config.color),
            config,
        }
    }

    /// Fuses one request's segments and text elements into an ordered layer
    /// list.
    ///
    /// Segments are consumed in the order given: upstream sorts them
    /// largest-area-first and that order drives matching determinism. A
    /// segment whose own data is inconsistent is dropped with a warning
    /// before matching, so its text candidates stay claimable; text elements
    /// with empty content are a precondition violation and fail the whole
    /// call.
    pub fn assemble(
        &self,
        mut segments: Vec<Segment>,
        texts: Vec<TextElement>,
        image: &RgbImage,
    ) -> FusionResult<Vec<Layer>> {
        validate_texts(&texts)?;

        // Invalid segments must go before matching runs; a dropped segment
        // must not have consumed a text element.
        segments.retain(|segment| match validate_segment(segment, image) {
            Ok(()) => true,
            Err(error) => {
                warn!(id = %segment.id, %error, "skipping segment");
                false
            }
        });

        self.classifier
            .classify_all(&mut segments, image.width(), image.height());

        let outcome = match_segments(&segments, &texts, &self.config.matching);

        let mut layers = Vec::with_capacity(segments.len() + texts.len());

        for (segment, assignment) in segments.iter().zip(outcome.assignments.iter()) {
            layers.push(self.build_segment_layer(segment, assignment.map(|i| &texts[i]), image));
        }

        for text in texts.iter().filter(|t| outcome.is_unmatched(t)) {
            layers.push(self.build_standalone_text_layer(text, image));
        }

        // Background layers first, then area descending. The sort must be
        // stable: equal-area layers keep their prior relative order.
        layers.sort_by_key(|layer| {
            (
                if layer.kind == LayerKind::Background {
                    0
                } else {
                    1
                },
                Reverse(layer.area),
            )
        });

        debug!(count = layers.len(), "assembled layers");
        Ok(layers)
    }

    /// Builds the layer for one segment, matched or not.
    fn build_segment_layer(
        &self,
        segment: &Segment,
        matched: Option<&TextElement>,
        image: &RgbImage,
    ) -> Layer {
        match matched {
            Some(text) => Layer {
                id: segment.id.clone(),
                // Textual evidence overrides the geometric classification.
                kind: LayerKind::Text,
                bbox: segment.bbox,
                center: segment.center,
                area: segment.area,
                content: Some(text.content.clone()),
                styling: LayerStyling::Text(self.text_style(text, image)),
                confidence: text.confidence,
                editable: true,
                locked: false,
                visible: true,
            },
            None => Layer {
                id: segment.id.clone(),
                kind: LayerKind::from(segment.kind),
                bbox: segment.bbox,
                center: segment.center,
                area: segment.area,
                content: None,
                styling: LayerStyling::Shape(ShapeStyle {
                    fill_color: self.fill_color(segment, image).to_hex(),
                    stroke_color: None,
                    stroke_width: 0,
                }),
                confidence: segment.predicted_iou,
                editable: true,
                locked: false,
                visible: true,
            },
        }
    }

    /// Builds an independent layer for a text element no segment claimed.
    ///
    /// Such layers carry no segment geometry, so their area is zero and they
    /// sort behind every mask-backed layer.
    fn build_standalone_text_layer(&self, text: &TextElement, image: &RgbImage) -> Layer {
        Layer {
            id: text.id.clone(),
            kind: LayerKind::Text,
            bbox: text.bbox,
            center: text.center,
            area: 0,
            content: Some(text.content.clone()),
            styling: LayerStyling::Text(self.text_style(text, image)),
            confidence: text.confidence,
            editable: true,
            locked: false,
            visible: true,
        }
    }

    /// Synthesizes the text styling block for a text element.
    fn text_style(&self, text: &TextElement, image: &RgbImage) -> TextStyle {
        let color = match crop_region(image, &text.bbox) {
            Some(region) => self.sampler.text_color(&region),
            None => Rgb::BLACK,
        };

        TextStyle {
            content: text.content.clone(),
            font_size: text.font_size,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            color: color.to_hex(),
            bold: false,
            italic: false,
            underline: false,
            align: detect_alignment(&text.bbox, image.width(), &self.config.alignment),
        }
    }

    /// Samples the fill color for an unmatched segment's bounding box.
    fn fill_color(&self, segment: &Segment, image: &RgbImage) -> Rgb {
        match crop_region(image, &segment.bbox) {
            Some(region) => self.sampler.dominant_color(&region),
            None => Rgb::BLACK,
        }
    }
}

/// Fuses detections into layers with a one-off assembler.
///
/// Convenience wrapper over [`LayerAssembler::assemble`].
pub fn assemble_layers(
    segments: Vec<Segment>,
    texts: Vec<TextElement>,
    image: &RgbImage,
    config: &FusionConfig,
) -> FusionResult<Vec<Layer>> {
    LayerAssembler::new(config.clone()).assemble(segments, texts, image)
}

/// Checks the core's text preconditions: content must be non-empty after
/// trimming (providers drop empty detections before the core runs) and
/// centers must be finite, since matching compares them.
fn validate_texts(texts: &[TextElement]) -> FusionResult<()> {
    for text in texts {
        if text.content.trim().is_empty() {
            return Err(FusionError::invalid_input(format!(
                "text element {} has empty content",
                text.id
            )));
        }
        if !text.center.x.is_finite() || !text.center.y.is_finite() {
            return Err(FusionError::invalid_input(format!(
                "text element {} has a non-finite center",
                text.id
            )));
        }
    }
    Ok(())
}

/// Checks one segment's internal consistency before building its layer.
fn validate_segment(segment: &Segment, image: &RgbImage) -> FusionResult<()> {
    if segment.area as u64 > segment.bbox.box_area() {
        return Err(FusionError::invalid_input(format!(
            "segment {} area {} exceeds its bounding box",
            segment.id, segment.area
        )));
    }

    let (mask_height, mask_width) = segment.mask.dim();
    if mask_width != image.width() as usize || mask_height != image.height() as usize {
        return Err(FusionError::invalid_input(format!(
            "segment {} mask is {}x{} but image is {}x{}",
            segment.id,
            mask_width,
            mask_height,
            image.width(),
            image.height()
        )));
    }

    Ok(())
}
