//! Error types for the fusion pipeline.
//!
//! This module defines the errors that can occur while fusing detections into
//! layers, including provider (upstream) failures, invalid input, and
//! per-stage processing errors, along with helper constructors for creating
//! them with context.

use thiserror::Error;

/// Stages of the fusion pipeline, used to attribute processing errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FusionStage {
    /// Segment classification.
    Classification,
    /// Segment-to-text matching.
    Matching,
    /// Color sampling from pixel data.
    ColorSampling,
    /// Layer assembly and ordering.
    Assembly,
}

impl std::fmt::Display for FusionStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FusionStage::Classification => write!(f, "classification"),
            FusionStage::Matching => write!(f, "matching"),
            FusionStage::ColorSampling => write!(f, "color sampling"),
            FusionStage::Assembly => write!(f, "layer assembly"),
        }
    }
}

/// External provider capabilities that can fail upstream of the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderStage {
    /// The segmentation model.
    Segmentation,
    /// The OCR engine.
    TextRecognition,
    /// The layout description model.
    Layout,
}

impl std::fmt::Display for ProviderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderStage::Segmentation => write!(f, "segmentation"),
            ProviderStage::TextRecognition => write!(f, "text recognition"),
            ProviderStage::Layout => write!(f, "layout analysis"),
        }
    }
}

/// Errors produced by the fusion pipeline.
#[derive(Error, Debug)]
pub enum FusionError {
    /// Error occurred while loading an image.
    #[error("image load")]
    ImageLoad(#[source] image::ImageError),

    /// An external provider failed to produce its detections. Fatal for the
    /// whole request.
    #[error("{stage} provider failed")]
    Provider {
        /// Which provider failed.
        stage: ProviderStage,
        /// The underlying provider error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Error occurred during a fusion stage.
    #[error("{stage} failed: {context}")]
    Processing {
        /// The stage where the error occurred.
        stage: FusionStage,
        /// Additional context about the error.
        context: String,
        /// The underlying error that caused this error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Error indicating input that violates the core's preconditions.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// A message describing the invalid input.
        message: String,
    },

    /// Error indicating a configuration problem.
    #[error(transparent)]
    Config(#[from] crate::core::config::ConfigError),

    /// IO error.
    #[error("io")]
    Io(#[from] std::io::Error),
}

impl FusionError {
    /// Creates an error for a failed provider call.
    pub fn provider(
        stage: ProviderStage,
        error: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Provider {
            stage,
            source: Box::new(error),
        }
    }

    /// Creates a processing error with context.
    pub fn processing(
        stage: FusionStage,
        context: impl Into<String>,
        error: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Processing {
            stage,
            context: context.into(),
            source: Box::new(error),
        }
    }

    /// Creates an invalid-input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}

/// Convenient result alias for fusion operations.
pub type FusionResult<T> = Result<T, FusionError>;
