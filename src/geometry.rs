//! Planar distance and compass bearing between traverse points.

use serde::Serialize;
use thiserror::Error;

use crate::data::model::{Point, TraverseSet};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SurveyError {
    #[error("one or both point numbers are invalid: no point {}", join_ids(.missing))]
    LookupMiss { missing: Vec<i64> },

    #[error("bearing from point {from} to point {to} is undefined")]
    UndefinedBearing { from: i64, to: i64 },
}

fn join_ids(ids: &[i64]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

// ---------------------------------------------------------------------------
// Measurement
// ---------------------------------------------------------------------------

/// Distance and bearing from one point to another.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Measurement {
    pub from: i64,
    pub to: i64,
    pub distance: f64,
    /// Degrees clockwise from north in [0, 360). `None` for coincident points
    /// or when the coordinate deltas overflow.
    pub bearing: Option<f64>,
}

impl Measurement {
    pub fn require_bearing(&self) -> Result<f64, SurveyError> {
        self.bearing.ok_or(SurveyError::UndefinedBearing {
            from: self.from,
            to: self.to,
        })
    }
}

/// Measure from `from` to `to`. Order matters for the bearing.
pub fn distance_and_bearing(from: &Point, to: &Point) -> Measurement {
    let delta_easting = to.easting - from.easting;
    let delta_northing = to.northing - from.northing;

    Measurement {
        from: from.id,
        to: to.id,
        distance: delta_easting.hypot(delta_northing),
        bearing: bearing(delta_easting, delta_northing),
    }
}

/// Quadrant bearing of a coordinate delta.
///
/// A zero easting delta groups with the positive side, so due north is 0°
/// and due south is 180°.
pub fn bearing(delta_easting: f64, delta_northing: f64) -> Option<f64> {
    if delta_northing == 0.0 {
        return if delta_easting > 0.0 {
            Some(90.0)
        } else if delta_easting < 0.0 {
            Some(270.0)
        } else {
            None
        };
    }

    let angle = (delta_easting / delta_northing).abs().atan().to_degrees();
    let bearing = match (delta_easting >= 0.0, delta_northing > 0.0) {
        (true, true) => angle,
        (true, false) => 180.0 - angle,
        (false, false) => 180.0 + angle,
        (false, true) => 360.0 - angle,
    };

    if !bearing.is_finite() {
        return None;
    }
    // 360 - angle rounds to 360 when the easting delta is negligible.
    Some(if bearing >= 360.0 { bearing - 360.0 } else { bearing })
}

/// Resolve both ids (first match wins), reporting every id that is missing.
pub fn lookup_pair(
    set: &TraverseSet,
    from: i64,
    to: i64,
) -> Result<(&Point, &Point), SurveyError> {
    match (set.find(from), set.find(to)) {
        (Some(a), Some(b)) => Ok((a, b)),
        (a, b) => {
            let mut missing = Vec::new();
            if a.is_none() {
                missing.push(from);
            }
            if b.is_none() && !(from == to && a.is_none()) {
                missing.push(to);
            }
            Err(SurveyError::LookupMiss { missing })
        }
    }
}

/// Look up two points by id and measure between them.
pub fn measure_pair(set: &TraverseSet, from: i64, to: i64) -> Result<Measurement, SurveyError> {
    let (a, b) = lookup_pair(set, from, to)?;
    Ok(distance_and_bearing(a, b))
}

// ---------------------------------------------------------------------------
// Angle formatting
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AngleStyle {
    #[default]
    Decimal,
    /// Degrees, minutes and seconds to a tenth of a second.
    Dms,
}

pub fn format_bearing(bearing: Option<f64>, style: AngleStyle) -> String {
    let Some(degrees) = bearing else {
        return "undefined".to_string();
    };

    match style {
        AngleStyle::Decimal => format!("{degrees:?} degrees"),
        AngleStyle::Dms => {
            let tenths = (degrees * 36_000.0).round() as u64 % (360 * 36_000);
            let deg = tenths / 36_000;
            let min = (tenths / 600) % 60;
            let sec = (tenths % 600) as f64 / 10.0;
            format!("{deg:03}°{min:02}'{sec:04.1}\"")
        }
    }
}
