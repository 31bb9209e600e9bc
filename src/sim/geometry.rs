//! Geometry for hit testing
//!
//! Hitboxes are convex polygons stored in entity-local space (relative to the
//! entity's top-left corner). Overlap is a separating-axis test on the
//! translated polygons.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::box_within;

/// The fixed visible rectangle, anchored at the origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: crate::consts::VIEWPORT_WIDTH,
            height: crate::consts::VIEWPORT_HEIGHT,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Whether a box of `size` at `pos` lies fully inside the viewport
    #[inline]
    pub fn contains_box(&self, pos: Vec2, size: Vec2) -> bool {
        box_within(pos, size, Vec2::ZERO, Vec2::new(self.width, self.height))
    }
}

/// A convex polygon in local space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub points: Vec<Vec2>,
}

impl Polygon {
    pub fn new(points: Vec<Vec2>) -> Self {
        Self { points }
    }

    /// Build from integer-ish pairs, e.g. a sprite-relative hit map
    pub fn from_pairs(pairs: &[(f32, f32)]) -> Self {
        Self::new(pairs.iter().map(|&(x, y)| Vec2::new(x, y)).collect())
    }

    /// Rectangle `[min, max]` as a four-point polygon
    pub fn rect(min: Vec2, max: Vec2) -> Self {
        Self::new(vec![
            min,
            Vec2::new(min.x, max.y),
            max,
            Vec2::new(max.x, min.y),
        ])
    }

    /// Rectangle inset from a `size` box: (m, m) to (w - 2m, h - 2m).
    ///
    /// The far corner is pulled in by twice the margin, so the inset box is
    /// biased toward the top-left of the sprite.
    pub fn inset(size: Vec2, margin: f32) -> Self {
        Self::rect(Vec2::splat(margin), size - Vec2::splat(margin * 2.0))
    }

    /// Points moved by `offset` into world space
    pub fn translated(&self, offset: Vec2) -> Vec<Vec2> {
        self.points.iter().map(|&p| p + offset).collect()
    }
}

/// Project a point set onto an axis, returning (min, max)
fn project(points: &[Vec2], axis: Vec2) -> (f32, f32) {
    points.iter().fold((f32::MAX, f32::MIN), |(lo, hi), p| {
        let d = p.dot(axis);
        (lo.min(d), hi.max(d))
    })
}

/// Whether any edge normal of `a` separates `a` from `b`
fn has_separating_axis(a: &[Vec2], b: &[Vec2]) -> bool {
    (0..a.len()).any(|i| {
        let edge = a[(i + 1) % a.len()] - a[i];
        let axis = edge.perp();
        if axis == Vec2::ZERO {
            return false;
        }
        let (a_min, a_max) = project(a, axis);
        let (b_min, b_max) = project(b, axis);
        // Touching edges do not count as overlap
        a_max <= b_min || b_max <= a_min
    })
}

/// Separating-axis overlap test for two convex world-space polygons
pub fn polygons_overlap(a: &[Vec2], b: &[Vec2]) -> bool {
    if a.len() < 3 || b.len() < 3 {
        return false;
    }
    !has_separating_axis(a, b) && !has_separating_axis(b, a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inset_rect_corners() {
        let poly = Polygon::inset(Vec2::new(198.0, 187.0), 10.0);
        assert_eq!(poly.points[0], Vec2::new(10.0, 10.0));
        assert_eq!(poly.points[2], Vec2::new(178.0, 167.0));
    }

    #[test]
    fn test_overlap_and_separation() {
        let a = Polygon::rect(Vec2::ZERO, Vec2::new(10.0, 10.0));
        let b = Polygon::rect(Vec2::ZERO, Vec2::new(10.0, 10.0));

        assert!(polygons_overlap(
            &a.translated(Vec2::ZERO),
            &b.translated(Vec2::new(5.0, 5.0))
        ));
        assert!(!polygons_overlap(
            &a.translated(Vec2::ZERO),
            &b.translated(Vec2::new(20.0, 0.0))
        ));
        // Shared edge only
        assert!(!polygons_overlap(
            &a.translated(Vec2::ZERO),
            &b.translated(Vec2::new(10.0, 0.0))
        ));
    }

    #[test]
    fn test_trapezoid_diagonal_separation() {
        // Bounding boxes overlap but the slanted edge separates them
        let trap = Polygon::from_pairs(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (20.0, 0.0)]);
        let square = Polygon::rect(Vec2::ZERO, Vec2::new(4.0, 4.0));
        assert!(!polygons_overlap(
            &trap.translated(Vec2::ZERO),
            &square.translated(Vec2::new(16.0, 7.0))
        ));
        assert!(polygons_overlap(
            &trap.translated(Vec2::ZERO),
            &square.translated(Vec2::new(12.0, 2.0))
        ));
    }

    #[test]
    fn test_viewport_contains_box() {
        let vp = Viewport::default();
        assert!(vp.contains_box(Vec2::new(64.0, 64.0), Vec2::new(199.0, 96.0)));
        assert!(!vp.contains_box(Vec2::new(900.0, 64.0), Vec2::new(199.0, 96.0)));
    }
}
