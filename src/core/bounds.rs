use crate::core::geo::Point;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in projected (Web Mercator meter) coordinates.
///
/// `max.y` is the northern edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    /// Creates new bounds from two points
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Creates bounds from individual coordinates
    pub fn from_coords(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self::new(Point::new(min_x, min_y), Point::new(max_x, max_y))
    }

    /// Gets the width of the bounds
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Gets the height of the bounds
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Gets the center point of the bounds
    pub fn center(&self) -> Point {
        Point::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    /// Checks if the bounds contain a point (edges inclusive)
    pub fn contains(&self, point: &Point) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Checks if the bounds are valid (min <= max)
    pub fn is_valid(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y
    }

    /// Position of `point` relative to the bounds as `(u, v)`.
    ///
    /// `u` runs west to east and `v` north to south, both 0..1 inside the
    /// bounds, matching the row order of raster tile data.
    pub fn normalized(&self, point: &Point) -> (f64, f64) {
        (
            (point.x - self.min.x) / self.width(),
            (self.max.y - point.y) / self.height(),
        )
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(Point::new(0.0, 0.0), Point::new(0.0, 0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_creation() {
        let bounds = Bounds::from_coords(10.0, 20.0, 30.0, 40.0);
        assert_eq!(bounds.width(), 20.0);
        assert_eq!(bounds.height(), 20.0);
        assert_eq!(bounds.center(), Point::new(20.0, 30.0));
        assert!(bounds.is_valid());
    }

    #[test]
    fn test_bounds_contains() {
        let bounds = Bounds::from_coords(10.0, 20.0, 30.0, 40.0);
        assert!(bounds.contains(&Point::new(15.0, 25.0)));
        assert!(bounds.contains(&Point::new(10.0, 40.0)));
        assert!(!bounds.contains(&Point::new(5.0, 25.0)));
    }

    #[test]
    fn test_normalized_corners() {
        let bounds = Bounds::from_coords(0.0, 0.0, 100.0, 50.0);

        // North-west corner is the raster origin
        assert_eq!(bounds.normalized(&Point::new(0.0, 50.0)), (0.0, 0.0));
        assert_eq!(bounds.normalized(&Point::new(100.0, 0.0)), (1.0, 1.0));
        assert_eq!(bounds.normalized(&bounds.center()), (0.5, 0.5));
    }
}
