//! Configuration for the fusion pipeline.
//!
//! Every heuristic threshold used by the classifiers, the matcher, the color
//! namer and the alignment detector is hoisted into the config structs below
//! so behavior is testable and overridable without touching algorithm code.
//! Defaults reproduce the documented policy constants exactly.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during configuration validation.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Error indicating that a configuration is invalid.
    #[error("invalid configuration: {message}")]
    InvalidConfig {
        /// A message describing the problem.
        message: String,
    },
}

/// A trait for validating configuration parameters.
pub trait ConfigValidator {
    /// Validates the configuration.
    fn validate(&self) -> Result<(), ConfigError>;

    /// Returns the default configuration.
    fn get_defaults() -> Self
    where
        Self: Sized;
}

fn ensure_unit_range(value: f32, name: &str) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::InvalidConfig {
            message: format!("{name} must be between 0.0 and 1.0, got {value}"),
        });
    }
    Ok(())
}

/// Thresholds for geometric segment classification.
///
/// Rules are evaluated in a fixed order (background, text, icon, then the
/// shape fallback); see the classification module for the precedence
/// contract.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Area ratio above which a segment is background (strict `>`).
    pub background_area_ratio: f32,
    /// Lower aspect-ratio bound for text segments (exclusive).
    pub text_aspect_min: f32,
    /// Upper aspect-ratio bound for text segments (exclusive).
    pub text_aspect_max: f32,
    /// Area ratio below which an elongated segment can be text (strict `<`).
    pub text_area_ratio_max: f32,
    /// Lower aspect-ratio bound for icon segments (exclusive).
    pub icon_aspect_min: f32,
    /// Upper aspect-ratio bound for icon segments (exclusive).
    pub icon_aspect_max: f32,
    /// Area ratio below which a squarish segment can be an icon (strict `<`).
    pub icon_area_ratio_max: f32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            background_area_ratio: 0.5,
            text_aspect_min: 1.5,
            text_aspect_max: 10.0,
            text_area_ratio_max: 0.3,
            icon_aspect_min: 0.5,
            icon_aspect_max: 2.0,
            icon_area_ratio_max: 0.1,
        }
    }
}

impl ConfigValidator for ClassifierConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        ensure_unit_range(self.background_area_ratio, "background_area_ratio")?;
        ensure_unit_range(self.text_area_ratio_max, "text_area_ratio_max")?;
        ensure_unit_range(self.icon_area_ratio_max, "icon_area_ratio_max")?;
        if self.text_aspect_min >= self.text_aspect_max {
            return Err(ConfigError::InvalidConfig {
                message: "text_aspect_min must be less than text_aspect_max".to_string(),
            });
        }
        if self.icon_aspect_min >= self.icon_aspect_max {
            return Err(ConfigError::InvalidConfig {
                message: "icon_aspect_min must be less than icon_aspect_max".to_string(),
            });
        }
        Ok(())
    }

    fn get_defaults() -> Self {
        Self::default()
    }
}

/// Thresholds for segment-to-text matching.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// IoU above which a text box matches a segment outright (strict `>`).
    pub iou_accept: f32,
    /// IoU above which a text box whose center lies inside the segment
    /// matches (strict `>`).
    pub iou_accept_with_center: f32,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            iou_accept: 0.5,
            iou_accept_with_center: 0.3,
        }
    }
}

impl ConfigValidator for MatchingConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        ensure_unit_range(self.iou_accept, "iou_accept")?;
        ensure_unit_range(self.iou_accept_with_center, "iou_accept_with_center")?;
        Ok(())
    }

    fn get_defaults() -> Self {
        Self::default()
    }
}

/// Thresholds for horizontal alignment detection, as fractions of the image
/// width.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AlignmentConfig {
    /// Centers left of this fraction are left-aligned (strict `<`).
    pub left_fraction: f32,
    /// Centers right of this fraction are right-aligned (strict `>`).
    pub right_fraction: f32,
}

impl Default for AlignmentConfig {
    fn default() -> Self {
        Self {
            left_fraction: 0.33,
            right_fraction: 0.67,
        }
    }
}

impl ConfigValidator for AlignmentConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        ensure_unit_range(self.left_fraction, "left_fraction")?;
        ensure_unit_range(self.right_fraction, "right_fraction")?;
        if self.left_fraction > self.right_fraction {
            return Err(ConfigError::InvalidConfig {
                message: "left_fraction must not exceed right_fraction".to_string(),
            });
        }
        Ok(())
    }

    fn get_defaults() -> Self {
        Self::default()
    }
}

/// Settings for color sampling and naming.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ColorConfig {
    /// Number of swatches in an extracted palette.
    pub palette_size: usize,
    /// Iteration cap for the palette clustering loop.
    pub max_cluster_iterations: usize,
    /// All channels above this value name the color white.
    pub white_min: u8,
    /// All channels below this value name the color black.
    pub black_max: u8,
    /// Margin by which one channel must dominate both others to take a
    /// primary name (red/green/blue).
    pub primary_dominance: u8,
    /// Channel level for the yellow pairing (`r` and `g` both above).
    pub yellow_min: u8,
    /// Channel level for the purple/cyan pairings.
    pub secondary_min: u8,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            palette_size: 8,
            max_cluster_iterations: 10,
            white_min: 200,
            black_max: 50,
            primary_dominance: 50,
            yellow_min: 200,
            secondary_min: 150,
        }
    }
}

impl ConfigValidator for ColorConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.palette_size == 0 {
            return Err(ConfigError::InvalidConfig {
                message: "palette_size must be greater than 0".to_string(),
            });
        }
        if self.max_cluster_iterations == 0 {
            return Err(ConfigError::InvalidConfig {
                message: "max_cluster_iterations must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    fn get_defaults() -> Self {
        Self::default()
    }
}

/// Top-level configuration for the fusion pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FusionConfig {
    /// Segment classification thresholds.
    pub classifier: ClassifierConfig,
    /// Segment-to-text matching thresholds.
    pub matching: MatchingConfig,
    /// Alignment detection thresholds.
    pub alignment: AlignmentConfig,
    /// Color sampling settings.
    pub color: ColorConfig,
}

impl ConfigValidator for FusionConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.classifier.validate()?;
        self.matching.validate()?;
        self.alignment.validate()?;
        self.color.validate()?;
        Ok(())
    }

    fn get_defaults() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(FusionConfig::default().validate().is_ok());
    }

    #[test]
    fn defaults_carry_policy_constants() {
        let config = FusionConfig::default();
        assert_eq!(config.classifier.background_area_ratio, 0.5);
        assert_eq!(config.classifier.text_aspect_min, 1.5);
        assert_eq!(config.classifier.text_aspect_max, 10.0);
        assert_eq!(config.matching.iou_accept, 0.5);
        assert_eq!(config.matching.iou_accept_with_center, 0.3);
        assert_eq!(config.alignment.left_fraction, 0.33);
        assert_eq!(config.alignment.right_fraction, 0.67);
        assert_eq!(config.color.palette_size, 8);
    }

    #[test]
    fn out_of_range_threshold_is_rejected() {
        let config = MatchingConfig {
            iou_accept: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn inverted_aspect_bounds_are_rejected() {
        let config = ClassifierConfig {
            text_aspect_min: 10.0,
            text_aspect_max: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
