// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Plan-space primitives: points, polygons, wall segments and readings

use serde::{Deserialize, Serialize};

/// A coordinate in a floor's local plan space (plan pixels)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: &Point2D) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<(f64, f64)> for Point2D {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Closed polygon in plan space
///
/// The last point connects back to the first. The expected orientation is
/// counter-clockwise with plan x along world +X and plan y along world +Z;
/// the geometry builder triangulates the points exactly as given, so callers
/// that supply clockwise rings get faces pointing the other way.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polygon {
    pub points: Vec<Point2D>,
}

impl Polygon {
    pub fn new(points: Vec<Point2D>) -> Self {
        Self { points }
    }

    /// Axis-aligned rectangle with one corner at `(x, y)`
    pub fn rectangle(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(vec![
            Point2D::new(x, y),
            Point2D::new(x + width, y),
            Point2D::new(x + width, y + height),
            Point2D::new(x, y + height),
        ])
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// At least three points are needed to produce a solid
    pub fn is_renderable(&self) -> bool {
        self.points.len() >= 3
    }

    /// Shoelace area, positive for counter-clockwise rings
    pub fn signed_area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let mut sum = 0.0;
        for i in 0..n {
            let a = &self.points[i];
            let b = &self.points[(i + 1) % n];
            sum += a.x * b.y - b.x * a.y;
        }
        sum * 0.5
    }

    pub fn is_counter_clockwise(&self) -> bool {
        self.signed_area() > 0.0
    }

    /// Same ring with the opposite orientation
    pub fn reversed(&self) -> Self {
        let mut points = self.points.clone();
        points.reverse();
        Self { points }
    }

    /// Total edge length including the closing edge
    pub fn perimeter(&self) -> f64 {
        let n = self.points.len();
        if n < 2 {
            return 0.0;
        }
        (0..n)
            .map(|i| self.points[i].distance(&self.points[(i + 1) % n]))
            .sum()
    }
}

impl From<Vec<Point2D>> for Polygon {
    fn from(points: Vec<Point2D>) -> Self {
        Self { points }
    }
}

/// Straight wall produced by the floor-plan editor
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WallSegment {
    pub start: Point2D,
    pub end: Point2D,
}

impl WallSegment {
    pub const fn new(start: Point2D, end: Point2D) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance(&self.end)
    }
}

/// One timeseries sample for a zone metric
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub value: f64,
    /// Trust in the value, in [0, 1]
    pub confidence: f64,
}

impl Reading {
    pub const fn new(value: f64, confidence: f64) -> Self {
        Self { value, confidence }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_area_orientation() {
        let square = Polygon::rectangle(0.0, 0.0, 2.0, 3.0);
        assert_eq!(square.signed_area(), 6.0);
        assert!(square.is_counter_clockwise());
        assert!(!square.reversed().is_counter_clockwise());
    }

    #[test]
    fn test_renderable_needs_three_points() {
        let line = Polygon::new(vec![Point2D::new(0.0, 0.0), Point2D::new(1.0, 0.0)]);
        assert!(!line.is_renderable());
        assert_eq!(line.signed_area(), 0.0);
    }

    #[test]
    fn test_perimeter_includes_closing_edge() {
        let square = Polygon::rectangle(0.0, 0.0, 1.0, 1.0);
        assert!((square.perimeter() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_polygon_serializes_as_point_list() {
        let tri = Polygon::new(vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(1.0, 0.0),
            Point2D::new(0.0, 1.0),
        ]);
        let json = serde_json::to_string(&tri).unwrap();
        assert!(json.starts_with('['));
        let back: Polygon = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tri);
    }
}
