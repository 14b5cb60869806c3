use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Point – one row of the traverse file
// ---------------------------------------------------------------------------

/// A single surveyed point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    /// Point number from the first column. Not guaranteed unique.
    pub id: i64,
    pub easting: f64,
    pub northing: f64,
}

impl Point {
    pub fn new(id: i64, easting: f64, northing: f64) -> Self {
        Self {
            id,
            easting,
            northing,
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {:?}, {:?})", self.id, self.easting, self.northing)
    }
}

// ---------------------------------------------------------------------------
// TraverseSet – the complete loaded point sequence
// ---------------------------------------------------------------------------

/// All points of one load, in file row order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TraverseSet {
    points: Vec<Point>,
}

impl TraverseSet {
    pub fn from_points(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// First point carrying `id`, in file order.
    pub fn find(&self, id: i64) -> Option<&Point> {
        self.points.iter().find(|p| p.id == id)
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_returns_first_duplicate() {
        let set = TraverseSet::from_points(vec![
            Point::new(1, 0.0, 0.0),
            Point::new(2, 5.0, 5.0),
            Point::new(1, 9.0, 9.0),
        ]);

        let found = set.find(1).unwrap();
        assert_eq!(found.easting, 0.0);
        assert!(set.find(3).is_none());
    }

    #[test]
    fn test_point_display() {
        let p = Point::new(7, 150.25, 210.5);
        assert_eq!(p.to_string(), "(7, 150.25, 210.5)");
        assert_eq!(Point::new(1, 100.0, 100.0005).to_string(), "(1, 100.0, 100.0005)");
    }
}
