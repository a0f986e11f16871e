//! Pixel-space geometry primitives

use serde::{Deserialize, Serialize};

/// 2D point in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a new point
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = (other.x - self.x) as f64;
        let dy = (other.y - self.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Axis-aligned rectangle, y axis pointing down
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    /// Create a new rectangle from its edges
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Smallest rectangle enclosing all given points
    ///
    /// Returns `None` for an empty slice.
    pub fn bounding(points: &[Point]) -> Option<Rect> {
        let first = points.first()?;
        let mut rect = Rect::new(first.x, first.y, first.x, first.y);
        for p in &points[1..] {
            rect.left = rect.left.min(p.x);
            rect.top = rect.top.min(p.y);
            rect.right = rect.right.max(p.x);
            rect.bottom = rect.bottom.max(p.y);
        }
        Some(rect)
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Center point
    pub fn center(&self) -> Point {
        Point::new(
            self.left + self.width() / 2.0,
            self.top + self.height() / 2.0,
        )
    }

    /// Corners in clockwise order starting at top-left
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.left, self.top),
            Point::new(self.right, self.top),
            Point::new(self.right, self.bottom),
            Point::new(self.left, self.bottom),
        ]
    }

    /// Finite edges with `right >= left` and `bottom >= top`
    pub fn is_well_formed(&self) -> bool {
        let finite = self.left.is_finite()
            && self.top.is_finite()
            && self.right.is_finite()
            && self.bottom.is_finite();
        finite && self.right >= self.left && self.bottom >= self.top
    }

    /// Translate by (dx, dy)
    pub fn offset(&self, dx: f32, dy: f32) -> Rect {
        Rect::new(self.left + dx, self.top + dy, self.right + dx, self.bottom + dy)
    }

    /// Multiply every edge by `factor`
    pub fn scale(&self, factor: f32) -> Rect {
        Rect::new(
            self.left * factor,
            self.top * factor,
            self.right * factor,
            self.bottom * factor,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_center_and_size() {
        let rect = Rect::new(100.0, 50.0, 300.0, 150.0);
        assert_eq!(rect.width(), 200.0);
        assert_eq!(rect.height(), 100.0);
        assert_eq!(rect.center(), Point::new(200.0, 100.0));
    }

    #[test]
    fn test_bounding_of_rotated_corners() {
        let points = [
            Point::new(10.0, -5.0),
            Point::new(-3.0, 7.0),
            Point::new(4.0, 2.0),
        ];
        let rect = Rect::bounding(&points).unwrap();
        assert_eq!(rect, Rect::new(-3.0, -5.0, 10.0, 7.0));
        assert!(Rect::bounding(&[]).is_none());
    }

    #[test]
    fn test_well_formed() {
        assert!(Rect::new(0.0, 0.0, 0.0, 0.0).is_well_formed());
        assert!(!Rect::new(10.0, 0.0, 5.0, 10.0).is_well_formed());
        assert!(!Rect::new(0.0, 10.0, 5.0, 0.0).is_well_formed());
        assert!(!Rect::new(0.0, 0.0, f32::NAN, 10.0).is_well_formed());
        assert!(!Rect::new(0.0, 0.0, f32::INFINITY, 10.0).is_well_formed());
    }

    #[test]
    fn test_distance_to() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_relative_eq!(a.distance_to(&b), 5.0);
        assert_relative_eq!(b.distance_to(&a), 5.0);
        assert_eq!(a.distance_to(&a), 0.0);
    }
}
