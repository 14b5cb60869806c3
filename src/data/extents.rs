use serde::Serialize;

use super::model::Point;

// ---------------------------------------------------------------------------
// Coordinate extents of a point set
// ---------------------------------------------------------------------------

/// Point count and coordinate bounds of a traverse.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Extents {
    pub count: usize,
    pub min_easting: f64,
    pub max_easting: f64,
    pub min_northing: f64,
    pub max_northing: f64,
}

/// Compute extents in a single pass. `None` when there is no data.
pub fn extents(points: &[Point]) -> Option<Extents> {
    let (first, rest) = points.split_first()?;

    let mut ext = Extents {
        count: points.len(),
        min_easting: first.easting,
        max_easting: first.easting,
        min_northing: first.northing,
        max_northing: first.northing,
    };

    for p in rest {
        ext.min_easting = ext.min_easting.min(p.easting);
        ext.max_easting = ext.max_easting.max(p.easting);
        ext.min_northing = ext.min_northing.min(p.northing);
        ext.max_northing = ext.max_northing.max(p.northing);
    }

    Some(ext)
}
