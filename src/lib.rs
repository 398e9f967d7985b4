//! # layerlift
//!
//! A Rust library that fuses raw visual-detection outputs (segmentation
//! masks, OCR text boxes, and coarse layout hints) into a single ordered
//! list of editable design layers for a downstream graphics editor.
//!
//! ## Features
//!
//! - Rule-based geometric segment classification (background/text/icon/shape)
//! - Greedy IoU + containment matching of segments to OCR text
//! - Color sampling: palette extraction, text-color detection, color naming
//! - Deterministic z-ordering (background first, then area descending)
//! - Provider traits so segmentation, OCR and layout models stay swappable
//!
//! ## Modules
//!
//! * [`core`] - Errors, configuration, and provider traits
//! * [`domain`] - Segments, text elements, layers, and color types
//! * [`processors`] - Geometry, classification, matching, color, alignment
//! * [`pipeline`] - The layer assembler and the full analysis entry point
//! * [`utils`] - Image loading, cropping, and mask helpers
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use layerlift::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! # let (segments, text_elements) = (Vec::new(), Vec::new());
//! let image = load_image(std::path::Path::new("design.png"))?;
//!
//! // Detections come from external providers (see `core::traits`);
//! // fuse them into ordered editable layers.
//! let config = FusionConfig::default();
//! let layers = assemble_layers(segments, text_elements, &image, &config)?;
//!
//! for layer in &layers {
//!     println!("{} ({:?})", layer.id, layer.kind);
//! }
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod domain;
pub mod pipeline;
pub mod processors;
pub mod utils;

/// Prelude module for convenient imports.
///
/// Bring the essentials into scope with a single use statement:
///
/// ```rust
/// use layerlift::prelude::*;
/// ```
pub mod prelude {
    pub use crate::core::{FusionConfig, FusionError, FusionResult, ProviderContext};
    pub use crate::domain::{Layer, LayerKind, Segment, SegmentKind, TextElement};
    pub use crate::pipeline::{ImageAnalysis, assemble_layers, process_image};
    pub use crate::utils::load_image;
}
