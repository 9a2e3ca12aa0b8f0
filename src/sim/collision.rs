//! Axis-aligned bounding boxes and the overlap test
//!
//! Every entity on screen is a rectangle anchored at its top-left corner.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in screen units (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Centre point of the rectangle
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Move the rectangle by an offset
    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }
}

/// Check whether two rectangles overlap
///
/// Edges that merely touch do not count. The test is symmetric, and any
/// rectangle with non-zero size overlaps itself.
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlapping_rects() {
        let a = Rect::new(0.0, 0.0, 50.0, 50.0);
        let b = Rect::new(40.0, 40.0, 10.0, 10.0);
        assert!(overlaps(&a, &b));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 50.0, 50.0);
        let right = Rect::new(50.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 50.0, 10.0, 10.0);
        assert!(!overlaps(&a, &right));
        assert!(!overlaps(&a, &below));
    }

    #[test]
    fn test_contained_rect_overlaps() {
        let outer = Rect::new(400.0, 500.0, 50.0, 50.0);
        let inner = Rect::new(420.0, 520.0, 10.0, 10.0);
        assert!(overlaps(&outer, &inner));
        assert!(overlaps(&inner, &outer));
    }

    #[test]
    fn test_zero_size_rect_does_not_overlap_itself() {
        let dot = Rect::new(10.0, 10.0, 0.0, 0.0);
        assert!(!overlaps(&dot, &dot));
    }

    #[test]
    fn test_center() {
        let r = Rect::new(400.0, 50.0, 100.0, 50.0);
        assert_eq!(r.center(), Vec2::new(450.0, 75.0));
    }

    fn rect_strategy() -> impl Strategy<Value = Rect> {
        (-1000.0f32..1000.0, -1000.0f32..1000.0, 0.0f32..200.0, 0.0f32..200.0)
            .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(a in rect_strategy(), b in rect_strategy()) {
            prop_assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
        }

        #[test]
        fn non_empty_rect_overlaps_itself(
            x in -1000.0f32..1000.0,
            y in -1000.0f32..1000.0,
            w in 0.5f32..200.0,
            h in 0.5f32..200.0,
        ) {
            let r = Rect::new(x, y, w, h);
            prop_assert!(overlaps(&r, &r));
        }
    }
}
