//! One command-line run: load, summarize, optionally measure and plot.
//!
//! The prompt for point numbers and the plot window are collaborators passed in
//! by the caller, so the whole flow runs against in-memory readers and writers.

use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use log::{error, info, warn};

use crate::data::extents::extents;
use crate::data::loader::load_file;
use crate::data::model::TraverseSet;
use crate::geometry::{measure_pair, AngleStyle};
use crate::report::{self, Report};

// ---------------------------------------------------------------------------
// Collaborators
// ---------------------------------------------------------------------------

/// Supplies the two point numbers to measure between, if any.
pub trait PairSource {
    fn next_pair(&mut self) -> Result<Option<(i64, i64)>>;
}

/// Renders the loaded traverse.
pub trait Visualizer {
    fn show(&mut self, points: &TraverseSet, source: &Path) -> Result<()>;
}

/// No measurement requested.
pub struct NoPair;

impl PairSource for NoPair {
    fn next_pair(&mut self) -> Result<Option<(i64, i64)>> {
        Ok(None)
    }
}

/// A pair given up front, e.g. on the command line.
pub struct FixedPair(pub i64, pub i64);

impl PairSource for FixedPair {
    fn next_pair(&mut self) -> Result<Option<(i64, i64)>> {
        Ok(Some((self.0, self.1)))
    }
}

/// Asks for both point numbers, one per line.
pub struct PromptPair<R, W> {
    input: R,
    prompt: W,
}

impl<R: BufRead, W: Write> PromptPair<R, W> {
    pub fn new(input: R, prompt: W) -> Self {
        Self { input, prompt }
    }

    fn ask(&mut self, which: &str) -> Result<i64> {
        write!(self.prompt, "Enter the Point for the {which} point: ")?;
        self.prompt.flush()?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("reading point number")?;
        if read == 0 {
            bail!("no point number entered for the {which} point");
        }

        let text = line.trim();
        text.parse::<i64>()
            .with_context(|| format!("{text:?} is not a valid point number"))
    }
}

impl<R: BufRead, W: Write> PairSource for PromptPair<R, W> {
    fn next_pair(&mut self) -> Result<Option<(i64, i64)>> {
        let first = self.ask("first")?;
        let second = self.ask("second")?;
        Ok(Some((first, second)))
    }
}

/// Plotting disabled.
pub struct NoPlot;

impl Visualizer for NoPlot {
    fn show(&mut self, _points: &TraverseSet, _source: &Path) -> Result<()> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default)]
pub struct SessionOptions {
    pub angle_style: AngleStyle,
    pub json: bool,
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Data loaded and every requested computation was reported.
    Reported,
    /// Missing file, bad header, or no valid rows.
    NoData,
    /// Data loaded but the requested pair could not be measured.
    Unresolved,
}

/// Run one session against `path`. Only output failures are returned as
/// errors; data problems are reported and reflected in the [`Outcome`].
pub fn run_session(
    path: &Path,
    options: &SessionOptions,
    pairs: &mut dyn PairSource,
    visualizer: &mut dyn Visualizer,
    out: &mut dyn Write,
) -> Result<Outcome> {
    let loaded = match load_file(path) {
        Ok(loaded) => loaded,
        Err(e) => {
            error!("{e}");
            if options.json {
                let report = Report {
                    source: path,
                    points: &[],
                    extents: None,
                    skipped_rows: Vec::new(),
                    measurement: None,
                    error: Some(e.to_string()),
                };
                report::write_json(out, &report)?;
            } else {
                writeln!(out, "No valid data found.")?;
            }
            return Ok(Outcome::NoData);
        }
    };

    let points = &loaded.points;
    let skipped_rows: Vec<String> = loaded.warnings.iter().map(|w| w.to_string()).collect();

    let Some(ext) = extents(points.points()) else {
        warn!("{} contains no valid rows", path.display());
        if options.json {
            let report = Report {
                source: path,
                points: &[],
                extents: None,
                skipped_rows,
                measurement: None,
                error: Some("no valid data found".to_string()),
            };
            report::write_json(out, &report)?;
        } else {
            writeln!(out, "No valid data found.")?;
        }
        return Ok(Outcome::NoData);
    };

    if !options.json {
        report::write_summary(out, points.points(), &ext)?;
    }

    let mut outcome = Outcome::Reported;
    let mut measurement = None;
    let mut failure = None;

    match pairs.next_pair() {
        Ok(Some((from, to))) => match measure_pair(points, from, to) {
            Ok(m) => {
                match m.require_bearing() {
                    Ok(b) => info!("Point {from} to point {to}: {:.3} at {b:.4}°", m.distance),
                    Err(e) => warn!("{e}"),
                }
                if !options.json {
                    report::write_measurement(out, &m, options.angle_style)?;
                }
                measurement = Some(m);
            }
            Err(e) => {
                outcome = Outcome::Unresolved;
                failure = Some(e.to_string());
            }
        },
        Ok(None) => {}
        Err(e) => {
            outcome = Outcome::Unresolved;
            failure = Some(format!("{e:#}"));
        }
    }

    if let Some(message) = &failure {
        error!("{message}");
        if !options.json {
            writeln!(out)?;
            writeln!(out, "Error: {message}")?;
        }
    }

    if options.json {
        let report = Report {
            source: path,
            points: points.points(),
            extents: Some(ext),
            skipped_rows,
            measurement,
            error: failure,
        };
        report::write_json(out, &report)?;
    }

    if let Err(e) = visualizer.show(points, path) {
        error!("Failed to show traverse plot: {e:#}");
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::NamedTempFile;

    fn traverse_file(rows: &[&str]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Point,Easting,Northing").unwrap();
        for row in rows {
            writeln!(file, "{row}").unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[derive(Default)]
    struct RecordingPlot {
        shown: Vec<usize>,
    }

    impl Visualizer for RecordingPlot {
        fn show(&mut self, points: &TraverseSet, _source: &Path) -> Result<()> {
            self.shown.push(points.len());
            Ok(())
        }
    }

    fn run(
        path: &Path,
        options: SessionOptions,
        pairs: &mut dyn PairSource,
    ) -> (Outcome, String, RecordingPlot) {
        let mut plot = RecordingPlot::default();
        let mut out = Vec::new();
        let outcome = run_session(path, &options, pairs, &mut plot, &mut out).unwrap();
        (outcome, String::from_utf8(out).unwrap(), plot)
    }

    #[test]
    fn test_summary_only() {
        let file = traverse_file(&["1,0,0", "2,10,0", "bad,row,here"]);
        let (outcome, text, plot) = run(file.path(), SessionOptions::default(), &mut NoPair);

        assert_eq!(outcome, Outcome::Reported);
        assert!(text.contains("Total number of points: 2"));
        assert!(!text.contains("Distance"));
        assert_eq!(plot.shown, vec![2]);
    }

    #[test]
    fn test_fixed_pair_measurement() {
        let file = traverse_file(&["1,0,0", "2,-10,-10"]);
        let (outcome, text, _) = run(file.path(), SessionOptions::default(), &mut FixedPair(1, 2));

        assert_eq!(outcome, Outcome::Reported);
        assert!(text.contains("Distance between point 1 and point 2: 14.1421356"), "{text}");
        assert!(text.contains("Bearing between point 1 and point 2: 225"), "{text}");
    }

    #[test]
    fn test_prompted_pair() {
        let file = traverse_file(&["1,0,0", "2,0,-10"]);
        let mut prompt_out = Vec::new();
        let mut pairs = PromptPair::new(Cursor::new("1\n 2 \n"), &mut prompt_out);
        let (outcome, text, _) = run(file.path(), SessionOptions::default(), &mut pairs);
        drop(pairs);

        assert_eq!(outcome, Outcome::Reported);
        assert!(text.contains("Bearing between point 1 and point 2: 180.0 degrees"), "{text}");

        let prompts = String::from_utf8(prompt_out).unwrap();
        assert_eq!(
            prompts,
            "Enter the Point for the first point: Enter the Point for the second point: "
        );
    }

    #[test]
    fn test_prompt_rejects_non_integer() {
        let file = traverse_file(&["1,0,0", "2,0,-10"]);
        let mut pairs = PromptPair::new(Cursor::new("one\n2\n"), Vec::new());
        let (outcome, text, plot) = run(file.path(), SessionOptions::default(), &mut pairs);

        assert_eq!(outcome, Outcome::Unresolved);
        assert!(text.contains("Error: \"one\" is not a valid point number"), "{text}");
        assert!(!text.contains("Distance"));
        assert_eq!(plot.shown, vec![2]);
    }

    #[test]
    fn test_prompt_end_of_input() {
        let file = traverse_file(&["1,0,0"]);
        let mut pairs = PromptPair::new(Cursor::new("1\n"), Vec::new());
        let (outcome, text, _) = run(file.path(), SessionOptions::default(), &mut pairs);

        assert_eq!(outcome, Outcome::Unresolved);
        assert!(text.contains("no point number entered for the second point"), "{text}");
    }

    #[test]
    fn test_lookup_miss_is_reported() {
        let file = traverse_file(&["1,0,0", "2,10,0"]);
        let (outcome, text, _) = run(file.path(), SessionOptions::default(), &mut FixedPair(1, 42));

        assert_eq!(outcome, Outcome::Unresolved);
        assert!(text.contains("Error: one or both point numbers are invalid: no point 42"));
        assert!(!text.contains("Distance"));
    }

    #[test]
    fn test_missing_file_reports_no_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("traverse_data.csv");
        let (outcome, text, plot) = run(&path, SessionOptions::default(), &mut FixedPair(1, 2));

        assert_eq!(outcome, Outcome::NoData);
        assert_eq!(text, "No valid data found.\n");
        assert!(plot.shown.is_empty());
    }

    #[test]
    fn test_only_malformed_rows_reports_no_data() {
        let file = traverse_file(&["x,1,2", "3,y,4"]);
        let (outcome, text, plot) = run(file.path(), SessionOptions::default(), &mut NoPair);

        assert_eq!(outcome, Outcome::NoData);
        assert_eq!(text, "No valid data found.\n");
        assert!(plot.shown.is_empty());
    }

    #[test]
    fn test_json_session() {
        let file = traverse_file(&["1,0,0", "2,10,0", "3,oops,1"]);
        let options = SessionOptions {
            json: true,
            ..Default::default()
        };
        let (outcome, text, _) = run(file.path(), options, &mut FixedPair(2, 1));

        assert_eq!(outcome, Outcome::Reported);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["extents"]["max_easting"], 10.0);
        assert_eq!(value["measurement"]["bearing"], 270.0);
        assert_eq!(value["skipped_rows"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_json_schema_mismatch() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Id,X,Y").unwrap();
        file.flush().unwrap();
        let options = SessionOptions {
            json: true,
            ..Default::default()
        };
        let (outcome, text, _) = run(file.path(), options, &mut NoPair);

        assert_eq!(outcome, Outcome::NoData);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert!(value["error"].as_str().unwrap().contains("CSV file format is incorrect"));
    }
}
