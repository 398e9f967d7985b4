//! Geometric primitives for detection fusion.
//!
//! This module provides the axis-aligned rectangle and point types shared by
//! every detection source, together with the overlap arithmetic (intersection
//! over union, point containment) the matching rules are built on.

use serde::{Deserialize, Serialize};

/// A 2D point with floating-point coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X-coordinate of the point.
    pub x: f32,
    /// Y-coordinate of the point.
    pub y: f32,
}

impl Point {
    /// Creates a new point with the given coordinates.
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned bounding box in integer pixel coordinates.
///
/// Width and height are unsigned, so degenerate (zero-extent) boxes are
/// representable but negative extents are not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// X-coordinate of the top-left corner.
    pub x: i32,
    /// Y-coordinate of the top-left corner.
    pub y: i32,
    /// Width of the box in pixels.
    pub width: u32,
    /// Height of the box in pixels.
    pub height: u32,
}

impl BoundingBox {
    /// Creates a new bounding box from its top-left corner and extent.
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// X-coordinate of the right edge.
    #[inline]
    pub fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    /// Y-coordinate of the bottom edge.
    #[inline]
    pub fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    /// Area of the box in pixels.
    #[inline]
    pub fn box_area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Geometric centroid of the box.
    pub fn center(&self) -> Point {
        Point::new(
            self.x as f32 + self.width as f32 / 2.0,
            self.y as f32 + self.height as f32 / 2.0,
        )
    }

    /// Computes the intersection-over-union overlap with another box.
    ///
    /// Returns 0.0 when the boxes do not overlap (a negative intersection
    /// extent is treated as an empty intersection) or when the union area is
    /// zero (both boxes degenerate). The result is symmetric, lies in
    /// `[0.0, 1.0]`, and equals 1.0 exactly when the boxes are identical and
    /// non-degenerate.
    ///
    /// # Arguments
    ///
    /// * `other` - The box to compare against.
    pub fn iou(&self, other: &BoundingBox) -> f32 {
        let inter_left = (self.x as i64).max(other.x as i64);
        let inter_top = (self.y as i64).max(other.y as i64);
        let inter_right = self.right().min(other.right());
        let inter_bottom = self.bottom().min(other.bottom());

        if inter_right < inter_left || inter_bottom < inter_top {
            return 0.0;
        }

        let inter_area = (inter_right - inter_left) as f64 * (inter_bottom - inter_top) as f64;
        let union_area = self.box_area() as f64 + other.box_area() as f64 - inter_area;

        if union_area == 0.0 {
            return 0.0;
        }

        (inter_area / union_area) as f32
    }

    /// Tests whether a point lies inside the box.
    ///
    /// The comparison is a closed interval on both axes: points exactly on an
    /// edge count as contained. A zero-width or zero-height box therefore
    /// still contains points on its boundary line.
    pub fn contains_point(&self, point: Point) -> bool {
        self.x as f32 <= point.x
            && point.x <= self.right() as f32
            && self.y as f32 <= point.y
            && point.y <= self.bottom() as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iou_identical_boxes() {
        let a = BoundingBox::new(10, 20, 100, 50);
        assert_eq!(a.iou(&a), 1.0);
    }

    #[test]
    fn iou_disjoint_boxes() {
        let a = BoundingBox::new(0, 0, 10, 10);
        let b = BoundingBox::new(100, 100, 10, 10);
        assert_eq!(a.iou(&b), 0.0);
        assert_eq!(b.iou(&a), 0.0);
    }

    #[test]
    fn iou_is_symmetric_and_bounded() {
        let a = BoundingBox::new(0, 0, 100, 100);
        let b = BoundingBox::new(50, 50, 100, 100);
        let ab = a.iou(&b);
        let ba = b.iou(&a);
        assert_eq!(ab, ba);
        assert!(ab > 0.0 && ab < 1.0);
        // 50x50 overlap over (10000 + 10000 - 2500) union
        assert!((ab - 2500.0 / 17500.0).abs() < 1e-6);
    }

    #[test]
    fn iou_zero_union_is_zero() {
        let a = BoundingBox::new(5, 5, 0, 0);
        let b = BoundingBox::new(5, 5, 0, 0);
        assert_eq!(a.iou(&b), 0.0);
    }

    #[test]
    fn iou_touching_edges_is_zero() {
        let a = BoundingBox::new(0, 0, 10, 10);
        let b = BoundingBox::new(10, 0, 10, 10);
        // Shared edge has zero intersection area.
        assert_eq!(a.iou(&b), 0.0);
    }

    #[test]
    fn contains_point_is_inclusive() {
        let b = BoundingBox::new(10, 10, 30, 20);
        assert!(b.contains_point(Point::new(10.0, 10.0)));
        assert!(b.contains_point(Point::new(40.0, 30.0)));
        assert!(b.contains_point(Point::new(25.0, 15.0)));
        assert!(!b.contains_point(Point::new(9.9, 15.0)));
        assert!(!b.contains_point(Point::new(25.0, 30.1)));
    }

    #[test]
    fn degenerate_box_still_contains_boundary_points() {
        let line = BoundingBox::new(10, 10, 0, 20);
        assert!(line.contains_point(Point::new(10.0, 20.0)));
        assert!(!line.contains_point(Point::new(11.0, 20.0)));
    }

    #[test]
    fn center_is_bbox_centroid() {
        let b = BoundingBox::new(10, 10, 100, 20);
        assert_eq!(b.center(), Point::new(60.0, 20.0));
    }
}
