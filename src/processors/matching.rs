//! Segment-to-text matching.
//!
//! Pairs each segment with at most one OCR text element using IoU and center
//! containment, and records consumed text ids in an explicit accumulator so a
//! text element is never claimed twice. Segments are processed in the order
//! the caller supplies them; upstream sorts largest-area-first, and that
//! order decides who wins contested text.
//!
//! The assignment is greedy per segment, not globally optimal: the first
//! segment to claim a text element keeps it even if a later segment overlaps
//! it better. This mirrors the established behavior downstream editors depend
//! on; a global assignment over the full segment×text IoU matrix would be a
//! behavior change and is left as future work.

use std::collections::HashSet;

use tracing::debug;

use crate::core::MatchingConfig;
use crate::domain::{Segment, TextElement};

/// Result of one matching pass.
///
/// Built fresh for every call; nothing here outlives the request.
#[derive(Debug, Default)]
pub struct MatchOutcome {
    /// For each segment (by input position), the index of the text element
    /// assigned to it, if any.
    pub assignments: Vec<Option<usize>>,
    /// Ids of text elements consumed by some segment.
    pub consumed: HashSet<String>,
}

impl MatchOutcome {
    /// Returns true when the text element was not claimed by any segment.
    pub fn is_unmatched(&self, text: &TextElement) -> bool {
        !self.consumed.contains(&text.id)
    }
}

/// Runs the matching pass over all segments.
///
/// For each segment, every not-yet-consumed text element is scored by
/// `IoU(segment.bbox, text.bbox)`; a candidate is accepted when
/// `iou > iou_accept` or when the text center lies inside the segment box
/// (closed interval) and `iou > iou_accept_with_center`. Among accepted
/// candidates the strictly greatest IoU wins, ties going to the earliest in
/// iteration order, which makes the result deterministic for a stable input
/// ordering.
pub fn match_segments(
    segments: &[Segment],
    texts: &[TextElement],
    config: &MatchingConfig,
) -> MatchOutcome {
    let mut outcome = MatchOutcome {
        assignments: Vec::with_capacity(segments.len()),
        consumed: HashSet::new(),
    };

    for segment in segments {
        let chosen = find_matching_text(segment, texts, &outcome.consumed, config);
        if let Some(index) = chosen {
            outcome.consumed.insert(texts[index].id.clone());
            debug!(
                segment = %segment.id,
                text = %texts[index].id,
                "matched text to segment"
            );
        }
        outcome.assignments.push(chosen);
    }

    outcome
}

/// Picks the best not-yet-consumed text element for one segment, if any
/// candidate clears the acceptance thresholds.
fn find_matching_text(
    segment: &Segment,
    texts: &[TextElement],
    consumed: &HashSet<String>,
    config: &MatchingConfig,
) -> Option<usize> {
    let mut best: Option<usize> = None;
    let mut best_iou = 0.0f32;

    for (index, text) in texts.iter().enumerate() {
        if consumed.contains(&text.id) {
            continue;
        }

        let iou = segment.bbox.iou(&text.bbox);
        let center_inside = segment.bbox.contains_point(text.center);

        let accepted =
            iou > config.iou_accept || (center_inside && iou > config.iou_accept_with_center);

        if accepted && iou > best_iou {
            best_iou = iou;
            best = Some(index);
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SegmentKind;
    use crate::processors::BoundingBox;
    use ndarray::Array2;

    fn segment(id: &str, bbox: BoundingBox) -> Segment {
        Segment {
            id: id.to_string(),
            mask: Array2::from_elem((1, 1), false),
            bbox,
            center: bbox.center(),
            area: (bbox.box_area()) as u32,
            predicted_iou: 0.9,
            stability_score: 0.9,
            aspect_ratio: Segment::aspect_ratio_of(bbox.width, bbox.height),
            kind: SegmentKind::Shape,
        }
    }

    fn text(id: &str, bbox: BoundingBox) -> TextElement {
        TextElement {
            id: id.to_string(),
            content: format!("content of {id}"),
            confidence: 0.95,
            bbox,
            center: bbox.center(),
            polygon: None,
            font_size: 12,
        }
    }

    #[test]
    fn overlapping_text_matches_segment() {
        // Segment 10,10 100x20 and text 15,12 90x16: text center (60, 20)
        // lies inside the segment, IoU well above 0.3.
        let segments = vec![segment("segment_0", BoundingBox::new(10, 10, 100, 20))];
        let texts = vec![text("text_0", BoundingBox::new(15, 12, 90, 16))];

        let outcome = match_segments(&segments, &texts, &MatchingConfig::default());
        assert_eq!(outcome.assignments, vec![Some(0)]);
        assert!(outcome.consumed.contains("text_0"));
    }

    #[test]
    fn best_iou_candidate_wins_and_loser_stays_unmatched() {
        let seg_box = BoundingBox::new(0, 0, 100, 100);
        let segments = vec![segment("segment_0", seg_box)];
        // IoU 0.6 vs 0.8, both centers inside.
        let texts = vec![
            text("text_low", BoundingBox::new(0, 0, 60, 100)),
            text("text_high", BoundingBox::new(0, 0, 80, 100)),
        ];

        let outcome = match_segments(&segments, &texts, &MatchingConfig::default());
        assert_eq!(outcome.assignments, vec![Some(1)]);
        assert!(outcome.consumed.contains("text_high"));
        assert!(outcome.is_unmatched(&texts[0]));
    }

    #[test]
    fn consumed_text_is_not_reused_by_later_segments() {
        let shared = BoundingBox::new(0, 0, 100, 100);
        let segments = vec![segment("segment_0", shared), segment("segment_1", shared)];
        let texts = vec![text("text_0", BoundingBox::new(0, 0, 100, 100))];

        let outcome = match_segments(&segments, &texts, &MatchingConfig::default());
        // First segment in input order claims the text, second gets nothing.
        assert_eq!(outcome.assignments, vec![Some(0), None]);
    }

    #[test]
    fn zero_area_text_never_matches() {
        let segments = vec![segment("segment_0", BoundingBox::new(0, 0, 100, 100))];
        // Center sits on the segment boundary: contained (inclusive), but the
        // IoU of a zero-area box is 0.0, below both thresholds.
        let texts = vec![text("text_0", BoundingBox::new(0, 0, 0, 0))];

        let outcome = match_segments(&segments, &texts, &MatchingConfig::default());
        assert_eq!(outcome.assignments, vec![None]);
        assert!(outcome.consumed.is_empty());
    }

    #[test]
    fn disjoint_text_does_not_match() {
        let segments = vec![segment("segment_0", BoundingBox::new(0, 0, 50, 50))];
        let texts = vec![text("text_0", BoundingBox::new(200, 200, 50, 50))];

        let outcome = match_segments(&segments, &texts, &MatchingConfig::default());
        assert_eq!(outcome.assignments, vec![None]);
    }

    #[test]
    fn equal_iou_tie_goes_to_first_seen() {
        let segments = vec![segment("segment_0", BoundingBox::new(0, 0, 100, 100))];
        let same_box = BoundingBox::new(10, 10, 80, 80);
        let texts = vec![text("text_a", same_box), text("text_b", same_box)];

        let outcome = match_segments(&segments, &texts, &MatchingConfig::default());
        assert_eq!(outcome.assignments, vec![Some(0)]);
    }

    #[test]
    fn accumulator_is_fresh_per_call() {
        let segments = vec![segment("segment_0", BoundingBox::new(0, 0, 100, 100))];
        let texts = vec![text("text_0", BoundingBox::new(0, 0, 100, 100))];
        let config = MatchingConfig::default();

        let first = match_segments(&segments, &texts, &config);
        let second = match_segments(&segments, &texts, &config);
        assert_eq!(first.assignments, second.assignments);
        assert_eq!(first.consumed, second.consumed);
    }
}
