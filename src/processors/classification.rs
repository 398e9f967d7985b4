//! Geometric segment classification.
//!
//! Infers a semantic kind (background, text, icon or shape) for each raw
//! segment from its aspect ratio and its share of the image area. The
//! precedence contract is explicit: rules are held as an ordered list and
//! evaluated in sequence, first match wins, with shape as the fallback. A
//! segment whose numbers satisfy both the text and the icon ranges therefore
//! always resolves to text, because the text rule comes first.

use tracing::debug;

use crate::core::ClassifierConfig;
use crate::domain::{Segment, SegmentKind};

/// Geometric features a classification rule looks at.
#[derive(Debug, Clone, Copy)]
pub struct GeometricFeatures {
    /// Width over height of the segment's bounding box.
    pub aspect_ratio: f32,
    /// Segment area divided by total image area.
    pub area_ratio: f32,
}

/// One ordered classification rule: a predicate and the kind it assigns.
pub struct ClassificationRule {
    /// Kind assigned when the predicate holds.
    pub kind: SegmentKind,
    predicate: Box<dyn Fn(GeometricFeatures) -> bool + Send + Sync>,
}

impl ClassificationRule {
    /// Creates a rule from a kind and its predicate.
    pub fn new(
        kind: SegmentKind,
        predicate: impl Fn(GeometricFeatures) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            predicate: Box::new(predicate),
        }
    }

    /// Evaluates the predicate against the given features.
    pub fn matches(&self, features: GeometricFeatures) -> bool {
        (self.predicate)(features)
    }
}

impl std::fmt::Debug for ClassificationRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassificationRule")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Rule-based geometric classifier for segments.
#[derive(Debug)]
pub struct SegmentClassifier {
    rules: Vec<ClassificationRule>,
    fallback: SegmentKind,
}

impl SegmentClassifier {
    /// Builds the standard rule list from the given thresholds.
    ///
    /// Rule order is part of the contract:
    /// 1. large area share → background
    /// 2. elongated and not too large → text
    /// 3. squarish and small → icon
    /// 4. fallback → shape
    pub fn new(config: ClassifierConfig) -> Self {
        let rules = vec![
            ClassificationRule::new(SegmentKind::Background, move |f| {
                f.area_ratio > config.background_area_ratio
            }),
            ClassificationRule::new(SegmentKind::Text, move |f| {
                config.text_aspect_min < f.aspect_ratio
                    && f.aspect_ratio < config.text_aspect_max
                    && f.area_ratio < config.text_area_ratio_max
            }),
            ClassificationRule::new(SegmentKind::Icon, move |f| {
                config.icon_aspect_min < f.aspect_ratio
                    && f.aspect_ratio < config.icon_aspect_max
                    && f.area_ratio < config.icon_area_ratio_max
            }),
        ];

        Self {
            rules,
            fallback: SegmentKind::Shape,
        }
    }

    /// The ordered rules, exposed so the precedence contract is inspectable.
    pub fn rules(&self) -> &[ClassificationRule] {
        &self.rules
    }

    /// Classifies one set of geometric features.
    pub fn classify_features(&self, features: GeometricFeatures) -> SegmentKind {
        self.rules
            .iter()
            .find(|rule| rule.matches(features))
            .map(|rule| rule.kind)
            .unwrap_or(self.fallback)
    }

    /// Classifies a segment against the image dimensions.
    pub fn classify(&self, segment: &Segment, image_width: u32, image_height: u32) -> SegmentKind {
        let total_area = image_width as f64 * image_height as f64;
        let area_ratio = if total_area == 0.0 {
            0.0
        } else {
            (segment.area as f64 / total_area) as f32
        };

        self.classify_features(GeometricFeatures {
            aspect_ratio: segment.aspect_ratio,
            area_ratio,
        })
    }

    /// Assigns a kind to every segment in place.
    pub fn classify_all(&self, segments: &mut [Segment], image_width: u32, image_height: u32) {
        for segment in segments.iter_mut() {
            segment.kind = self.classify(segment, image_width, image_height);
            debug!(id = %segment.id, kind = ?segment.kind, "classified segment");
        }
    }
}

impl Default for SegmentClassifier {
    fn default() -> Self {
        Self::new(ClassifierConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(aspect_ratio: f32, area_ratio: f32) -> SegmentKind {
        SegmentClassifier::default().classify_features(GeometricFeatures {
            aspect_ratio,
            area_ratio,
        })
    }

    #[test]
    fn large_area_share_is_background() {
        // 300x180 in a 300x300 image: area ratio 0.6
        assert_eq!(classify(300.0 / 180.0, 0.6), SegmentKind::Background);
    }

    #[test]
    fn background_boundary_is_strict() {
        assert_ne!(classify(1.0, 0.5), SegmentKind::Background);
        assert_eq!(classify(1.0, 0.500_000_1), SegmentKind::Background);
    }

    #[test]
    fn elongated_small_region_is_text() {
        assert_eq!(classify(5.0, 0.022), SegmentKind::Text);
    }

    #[test]
    fn squarish_small_region_is_icon() {
        assert_eq!(classify(1.0, 0.05), SegmentKind::Icon);
    }

    #[test]
    fn text_rule_wins_over_icon_rule() {
        // aspect 1.8 and area ratio 0.05 satisfy both the text and the icon
        // ranges; the text rule is evaluated first.
        assert_eq!(classify(1.8, 0.05), SegmentKind::Text);
    }

    #[test]
    fn fallback_is_shape() {
        assert_eq!(classify(0.2, 0.4), SegmentKind::Shape);
        assert_eq!(classify(20.0, 0.4), SegmentKind::Shape);
    }

    #[test]
    fn rule_order_is_background_text_icon() {
        let classifier = SegmentClassifier::default();
        let kinds: Vec<_> = classifier.rules().iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![SegmentKind::Background, SegmentKind::Text, SegmentKind::Icon]
        );
    }
}
