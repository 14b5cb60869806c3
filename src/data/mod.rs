/// Data layer: point types, loading, and aggregation.
///
/// Architecture:
/// ```text
///  traverse_data.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  validate header, parse rows → TraverseSet + row warnings
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ TraverseSet   │  Vec<Point> in file order
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ extents   │  count, min/max easting and northing
///   └──────────┘
/// ```

pub mod extents;
pub mod loader;
pub mod model;
