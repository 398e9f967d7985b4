//! Core error handling, configuration and provider seams.

pub mod config;
pub mod errors;
pub mod traits;

pub use config::{
    AlignmentConfig, ClassifierConfig, ColorConfig, ConfigError, ConfigValidator, FusionConfig,
    MatchingConfig,
};
pub use errors::{FusionError, FusionResult, FusionStage, ProviderStage};
pub use traits::{
    LayoutHint, LayoutProvider, LayoutSummary, ProviderContext, SegmentationProvider,
    TextRecognitionProvider,
};
