//! Field geometry: points and axis-aligned bounding boxes.
//!
//! Coordinates are battlefield units with the origin in a corner of the
//! field. Items and combatants are both collided through [`BoundingBox`].

use serde::{Deserialize, Serialize};

/// A location on the battlefield.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared euclidean distance (avoids sqrt for comparisons).
    #[must_use]
    pub fn distance_squared(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// True when the two points are closer than `spacing` on either axis.
    ///
    /// This is the placement overlap rule: items sharing a row or a column
    /// band are considered crowded even when far apart diagonally.
    #[must_use]
    pub fn crowds(self, other: Self, spacing: f64) -> bool {
        (self.x - other.x).abs() < spacing || (self.y - other.y).abs() < spacing
    }
}

impl std::ops::Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl std::ops::Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

/// Axis-aligned rectangle, stored as its minimum corner plus extent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Minimum X.
    pub x: f64,
    /// Minimum Y.
    pub y: f64,
    /// Extent along X.
    pub width: f64,
    /// Extent along Y.
    pub height: f64,
}

impl BoundingBox {
    /// Create a box from its minimum corner and extent.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a box of the given extent centered on `center`.
    #[must_use]
    pub fn centered(center: Point, width: f64, height: f64) -> Self {
        Self::new(
            center.x - width / 2.0,
            center.y - height / 2.0,
            width,
            height,
        )
    }

    /// Center of the box.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// True when both boxes have area and their interiors overlap.
    ///
    /// Touching edges do not count as an intersection.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        if self.width <= 0.0 || self.height <= 0.0 || other.width <= 0.0 || other.height <= 0.0 {
            return false;
        }
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_distance_squared() {
        let a = Point::new(3.0, 0.0);
        let b = Point::new(0.0, 4.0);
        assert_eq!(a.distance_squared(b), 25.0);
    }

    #[test]
    fn test_point_crowds_on_either_axis() {
        let a = Point::new(100.0, 100.0);
        assert!(a.crowds(Point::new(120.0, 500.0), 36.0));
        assert!(a.crowds(Point::new(500.0, 90.0), 36.0));
        assert!(!a.crowds(Point::new(200.0, 200.0), 36.0));
    }

    #[test]
    fn test_box_centered() {
        let b = BoundingBox::centered(Point::new(50.0, 60.0), 36.0, 36.0);
        assert_eq!(b, BoundingBox::new(32.0, 42.0, 36.0, 36.0));
        assert_eq!(b.center(), Point::new(50.0, 60.0));
    }

    #[test]
    fn test_box_intersects() {
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&BoundingBox::new(5.0, 5.0, 10.0, 10.0)));
        assert!(a.intersects(&BoundingBox::new(2.0, 2.0, 1.0, 1.0)));
        assert!(!a.intersects(&BoundingBox::new(20.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn test_box_touching_edges_do_not_intersect() {
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&BoundingBox::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.intersects(&BoundingBox::new(0.0, 10.0, 10.0, 10.0)));
    }

    #[test]
    fn test_empty_box_never_intersects() {
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&BoundingBox::new(5.0, 5.0, 0.0, 4.0)));
    }
}
