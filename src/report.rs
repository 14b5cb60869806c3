use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::data::extents::Extents;
use crate::data::model::Point;
use crate::geometry::{format_bearing, AngleStyle, Measurement};

// ---------------------------------------------------------------------------
// Text output
// ---------------------------------------------------------------------------

/// Print the point list followed by the extents block.
pub fn write_summary(out: &mut dyn Write, points: &[Point], extents: &Extents) -> io::Result<()> {
    writeln!(out, "Traverse data successfully read:")?;
    for point in points {
        writeln!(out, "{point}")?;
    }

    writeln!(out)?;
    writeln!(out, "Total number of points: {}", extents.count)?;
    writeln!(out, "Minimum Easting: {:?}", extents.min_easting)?;
    writeln!(out, "Maximum Easting: {:?}", extents.max_easting)?;
    writeln!(out, "Minimum Northing: {:?}", extents.min_northing)?;
    writeln!(out, "Maximum Northing: {:?}", extents.max_northing)?;
    Ok(())
}

pub fn write_measurement(
    out: &mut dyn Write,
    measurement: &Measurement,
    style: AngleStyle,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "Distance between point {} and point {}: {:?}",
        measurement.from, measurement.to, measurement.distance
    )?;
    writeln!(
        out,
        "Bearing between point {} and point {}: {}",
        measurement.from,
        measurement.to,
        format_bearing(measurement.bearing, style)
    )?;
    Ok(())
}

// ---------------------------------------------------------------------------
// JSON output
// ---------------------------------------------------------------------------

/// Everything one session computed, for `--json`.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub source: &'a Path,
    pub points: &'a [Point],
    pub extents: Option<Extents>,
    pub skipped_rows: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measurement: Option<Measurement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn write_json(out: &mut dyn Write, report: &Report<'_>) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, report).context("serializing report")?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::extents::extents;

    #[test]
    fn test_summary_text() {
        let points = [Point::new(1, 100.0, 200.0), Point::new(2, 150.25, 210.5)];
        let ext = extents(&points).unwrap();

        let mut out = Vec::new();
        write_summary(&mut out, &points, &ext).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("Traverse data successfully read:\n(1, 100.0, 200.0)\n"));
        assert!(text.contains("Total number of points: 2\n"));
        assert!(text.contains("Maximum Easting: 150.25\n"));
        assert!(text.contains("Minimum Northing: 200.0\n"));
    }

    #[test]
    fn test_measurement_text_with_undefined_bearing() {
        let m = Measurement {
            from: 3,
            to: 3,
            distance: 0.0,
            bearing: None,
        };

        let mut out = Vec::new();
        write_measurement(&mut out, &m, AngleStyle::Decimal).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Distance between point 3 and point 3: 0.0\n"));
        assert!(text.contains("Bearing between point 3 and point 3: undefined\n"));
    }

    #[test]
    fn test_json_report() {
        let points = [Point::new(1, 0.0, 0.0), Point::new(2, 10.0, 0.0)];
        let report = Report {
            source: Path::new("traverse_data.csv"),
            points: &points,
            extents: extents(&points),
            skipped_rows: Vec::new(),
            measurement: Some(Measurement {
                from: 1,
                to: 2,
                distance: 10.0,
                bearing: Some(90.0),
            }),
            error: None,
        };

        let mut out = Vec::new();
        write_json(&mut out, &report).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(value["source"], "traverse_data.csv");
        assert_eq!(value["points"][1]["easting"], 10.0);
        assert_eq!(value["extents"]["count"], 2);
        assert_eq!(value["measurement"]["bearing"], 90.0);
        assert!(value.get("error").is_none());
    }
}
