//! The fusion pipeline: layer assembly and provider-driven analysis.

pub mod analysis;
pub mod assembler;

pub use analysis::{ImageAnalysis, ImageSize, process_image};
pub use assembler::{LayerAssembler, assemble_layers};
