//! Provider-driven image analysis.
//!
//! Runs the three external providers against one image, fuses their output
//! into layers, and packages the whole-image palette and layout description
//! alongside, giving the complete response shape a design editor consumes.

use std::cmp::Reverse;

use image::RgbImage;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::{FusionConfig, FusionResult, LayoutSummary, ProviderContext};
use crate::domain::{ColorSwatch, Layer};
use crate::pipeline::LayerAssembler;
use crate::processors::ColorSampler;

/// Pixel dimensions of the analyzed image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Complete analysis of one image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageAnalysis {
    /// Fused editable layers, background first.
    pub layers: Vec<Layer>,
    /// Coarse layout description from the layout provider.
    pub layout: LayoutSummary,
    /// Whole-image color palette, most prominent first.
    pub color_palette: Vec<ColorSwatch>,
    /// Dimensions of the analyzed image.
    pub image_size: ImageSize,
    /// Number of segments produced by the segmentation provider.
    pub total_segments: usize,
    /// Number of text elements produced by the OCR provider.
    pub total_text_elements: usize,
}

/// Runs the full analysis pipeline for one image.
///
/// Calls the three providers in sequence (segmentation, OCR, layout), sorts
/// the segments largest-area-first so matching determinism holds, assembles
/// the layers and extracts the whole-image palette. Provider failures are
/// fatal for the request; per-segment problems inside assembly are not.
pub fn process_image(
    ctx: &ProviderContext<'_>,
    image: &RgbImage,
    config: &FusionConfig,
) -> FusionResult<ImageAnalysis> {
    info!(
        width = image.width(),
        height = image.height(),
        "processing image"
    );

    let mut segments = ctx.segmentation.segment(image)?;
    // Largest first; the matching pass depends on this order.
    segments.sort_by_key(|s| Reverse(s.area));
    let total_segments = segments.len();
    info!(count = total_segments, "segmentation complete");

    let texts = ctx.text_recognition.extract_text(image)?;
    let total_text_elements = texts.len();
    info!(count = total_text_elements, "text extraction complete");

    let layout = ctx.layout.describe_layout(image)?;

    let assembler = LayerAssembler::new(config.clone());
    let layers = assembler.assemble(segments, texts, image)?;

    let color_palette = ColorSampler::new(config.color).palette(image);

    info!(layers = layers.len(), "analysis complete");

    Ok(ImageAnalysis {
        layers,
        layout,
        color_palette,
        image_size: ImageSize {
            width: image.width(),
            height: image.height(),
        },
        total_segments,
        total_text_elements,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        LayoutProvider, SegmentationProvider, TextRecognitionProvider,
    };
    use crate::domain::{LayerKind, Segment, SegmentKind, TextElement};
    use crate::processors::BoundingBox;
    use image::Rgb as ImageRgb;
    use ndarray::Array2;

    struct FixedSegmentation;
    struct FixedOcr;
    struct FixedLayout;

    fn segment_for(image: &RgbImage, id: &str, bbox: BoundingBox) -> Segment {
        Segment {
            id: id.to_string(),
            mask: Array2::from_elem(
                (image.height() as usize, image.width() as usize),
                false,
            ),
            bbox,
            center: bbox.center(),
            area: bbox.box_area() as u32,
            predicted_iou: 0.9,
            stability_score: 0.9,
            aspect_ratio: Segment::aspect_ratio_of(bbox.width, bbox.height),
            kind: SegmentKind::Shape,
        }
    }

    impl SegmentationProvider for FixedSegmentation {
        fn segment(&self, image: &RgbImage) -> FusionResult<Vec<Segment>> {
            // Deliberately unsorted; the pipeline must order them by area.
            Ok(vec![
                segment_for(image, "segment_small", BoundingBox::new(10, 10, 100, 20)),
                segment_for(image, "segment_bg", BoundingBox::new(0, 0, 300, 200)),
            ])
        }
    }

    impl TextRecognitionProvider for FixedOcr {
        fn extract_text(&self, _image: &RgbImage) -> FusionResult<Vec<TextElement>> {
            let bbox = BoundingBox::new(15, 12, 90, 16);
            Ok(vec![TextElement {
                id: "text_0".to_string(),
                content: "Sample".to_string(),
                confidence: 0.92,
                bbox,
                center: bbox.center(),
                polygon: None,
                font_size: 12,
            }])
        }
    }

    impl LayoutProvider for FixedLayout {
        fn describe_layout(&self, _image: &RgbImage) -> FusionResult<LayoutSummary> {
            Ok(LayoutSummary {
                description: "text in the top left".to_string(),
                hints: Vec::new(),
            })
        }
    }

    #[test]
    fn full_pipeline_wires_providers_together() {
        let image = RgbImage::from_pixel(300, 300, ImageRgb([230, 230, 230]));
        let segmentation = FixedSegmentation;
        let ocr = FixedOcr;
        let layout = FixedLayout;
        let ctx = ProviderContext::new(&segmentation, &ocr, &layout);

        let analysis = process_image(&ctx, &image, &FusionConfig::default()).unwrap();

        assert_eq!(analysis.total_segments, 2);
        assert_eq!(analysis.total_text_elements, 1);
        assert_eq!(analysis.image_size, ImageSize { width: 300, height: 300 });
        assert_eq!(analysis.layout.description, "text in the top left");
        assert!(!analysis.color_palette.is_empty());

        // The background segment leads; the small segment matched the text.
        assert_eq!(analysis.layers[0].id, "segment_bg");
        assert_eq!(analysis.layers[0].kind, LayerKind::Background);
        let matched = analysis
            .layers
            .iter()
            .find(|l| l.id == "segment_small")
            .unwrap();
        assert_eq!(matched.kind, LayerKind::Text);
        assert_eq!(matched.content.as_deref(), Some("Sample"));
    }
}
