use std::io::{self, Read};
use std::path::{Path, PathBuf};

use csv::{ByteRecord, ReaderBuilder};
use log::{debug, info, warn};
use thiserror::Error;

use super::model::{Point, TraverseSet};

/// The only accepted header row, compared literally.
pub const EXPECTED_HEADER: [&str; 3] = ["Point", "Easting", "Northing"];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failures that yield no points at all.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("the file {} does not exist", .0.display())]
    NotFound(PathBuf),

    #[error(
        "CSV file format is incorrect. Expected columns: 'Point', 'Easting', 'Northing', found {found:?}"
    )]
    SchemaMismatch { found: Vec<String> },

    #[error("an error occurred while reading the file: {0}")]
    Io(#[from] io::Error),

    #[error("an error occurred while reading the file: {0}")]
    Csv(#[from] csv::Error),
}

/// Why a single data row was skipped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowFault {
    #[error("expected 3 columns, found {0}")]
    ColumnCount(usize),

    #[error("point number {0:?} is not an integer")]
    BadId(String),

    #[error("{column} {value:?} is not a number")]
    BadCoordinate { column: &'static str, value: String },

    #[error("{column} {value:?} is not finite")]
    NonFinite { column: &'static str, value: String },

    #[error("row is not valid UTF-8")]
    Encoding,
}

/// A skipped row, with its raw content for the diagnostic.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid data format in row {line}: [{raw}]: {reason}")]
pub struct RowParseError {
    /// 1-based line number in the source.
    pub line: u64,
    pub raw: String,
    pub reason: RowFault,
}

// ---------------------------------------------------------------------------
// Load result
// ---------------------------------------------------------------------------

/// Points that parsed, plus one warning per skipped row.
#[derive(Debug, Clone, Default)]
pub struct Loaded {
    pub points: TraverseSet,
    pub warnings: Vec<RowParseError>,
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a traverse file. The file is read completely and closed before parsing.
pub fn load_file(path: &Path) -> Result<Loaded, LoadError> {
    if !path.is_file() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }

    let bytes = std::fs::read(path)?;
    let loaded = parse_bytes(&bytes)?;

    info!(
        "Loaded {} points from {} ({} rows skipped)",
        loaded.points.len(),
        path.display(),
        loaded.warnings.len()
    );
    Ok(loaded)
}

/// Parse traverse CSV from any byte stream.
///
/// The stream is drained before parsing starts, so a read error fails the
/// whole load and no partial point set is returned.
pub fn load_reader<R: Read>(mut source: R) -> Result<Loaded, LoadError> {
    let mut bytes = Vec::new();
    source.read_to_end(&mut bytes)?;
    parse_bytes(&bytes)
}

/// Layout: a literal `Point,Easting,Northing` header, then one
/// `integer,float,float` row per point. Malformed rows, blank lines
/// included, are skipped and reported; only a bad header aborts the load.
fn parse_bytes(bytes: &[u8]) -> Result<Loaded, LoadError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);
    let mut lines = LineTracker::new(bytes);
    let mut record = ByteRecord::new();

    let leading_blanks = lines.skip_blank_lines();
    if !reader.read_byte_record(&mut record)? || !leading_blanks.is_empty() {
        return Err(LoadError::SchemaMismatch { found: Vec::new() });
    }
    check_header(&record)?;

    let mut points = Vec::new();
    let mut warnings = Vec::new();

    loop {
        lines.advance_to(reader.position().byte() as usize);

        // The csv reader drops empty lines; each one is still a bad row.
        for line in lines.skip_blank_lines() {
            let warning = RowParseError {
                line,
                raw: String::new(),
                reason: RowFault::ColumnCount(0),
            };
            warn!("{warning}");
            warnings.push(warning);
        }

        let line = lines.line;
        if !reader.read_byte_record(&mut record)? {
            break;
        }

        match parse_row(&record) {
            Ok(point) => points.push(point),
            Err(reason) => {
                let warning = RowParseError {
                    line,
                    raw: raw_row(&record),
                    reason,
                };
                warn!("{warning}");
                warnings.push(warning);
            }
        }
    }

    debug!("Parsed {} rows, skipped {}", points.len(), warnings.len());

    Ok(Loaded {
        points: TraverseSet::from_points(points),
        warnings,
    })
}

// ---------------------------------------------------------------------------
// Line tracking
// ---------------------------------------------------------------------------

/// Counts line breaks (`\n`, `\r\n` or a lone `\r`) up to a byte offset.
struct LineTracker<'a> {
    bytes: &'a [u8],
    offset: usize,
    /// 1-based line number at `offset`.
    line: u64,
}

impl<'a> LineTracker<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            offset: 0,
            line: 1,
        }
    }

    fn advance_to(&mut self, target: usize) {
        let target = target.min(self.bytes.len());
        while self.offset < target {
            match self.bytes[self.offset] {
                b'\n' => self.line += 1,
                b'\r' if self.bytes.get(self.offset + 1) != Some(&b'\n') => self.line += 1,
                _ => {}
            }
            self.offset += 1;
        }
    }

    /// Step over empty lines at the current offset, returning their numbers.
    fn skip_blank_lines(&mut self) -> Vec<u64> {
        // A record ended by `\r\n` can leave the `\n` unconsumed.
        if self.offset > 0
            && self.bytes.get(self.offset) == Some(&b'\n')
            && self.bytes[self.offset - 1] == b'\r'
        {
            self.advance_to(self.offset + 1);
        }

        let mut blanks = Vec::new();
        loop {
            let end = match self.bytes.get(self.offset).copied() {
                Some(b'\n') => self.offset + 1,
                Some(b'\r') if self.bytes.get(self.offset + 1) == Some(&b'\n') => self.offset + 2,
                Some(b'\r') => self.offset + 1,
                _ => break,
            };
            blanks.push(self.line);
            self.advance_to(end);
        }
        blanks
    }
}

// ---------------------------------------------------------------------------
// Row helpers
// ---------------------------------------------------------------------------

fn check_header(header: &ByteRecord) -> Result<(), LoadError> {
    let found: Vec<String> = header
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let text = String::from_utf8_lossy(field);
            if i == 0 {
                text.trim_start_matches('\u{feff}').to_string()
            } else {
                text.into_owned()
            }
        })
        .collect();

    if found.len() == EXPECTED_HEADER.len()
        && found.iter().zip(EXPECTED_HEADER).all(|(f, e)| f == e)
    {
        Ok(())
    } else {
        Err(LoadError::SchemaMismatch { found })
    }
}

fn parse_row(record: &ByteRecord) -> Result<Point, RowFault> {
    if record.len() != EXPECTED_HEADER.len() {
        return Err(RowFault::ColumnCount(record.len()));
    }

    let id_text = field(record, 0)?;
    let id = id_text
        .parse::<i64>()
        .map_err(|_| RowFault::BadId(id_text.to_string()))?;
    let easting = parse_coordinate(field(record, 1)?, "Easting")?;
    let northing = parse_coordinate(field(record, 2)?, "Northing")?;

    Ok(Point::new(id, easting, northing))
}

fn field(record: &ByteRecord, index: usize) -> Result<&str, RowFault> {
    std::str::from_utf8(&record[index])
        .map(str::trim)
        .map_err(|_| RowFault::Encoding)
}

fn parse_coordinate(text: &str, column: &'static str) -> Result<f64, RowFault> {
    let value = text.parse::<f64>().map_err(|_| RowFault::BadCoordinate {
        column,
        value: text.to_string(),
    })?;
    if !value.is_finite() {
        return Err(RowFault::NonFinite {
            column,
            value: text.to_string(),
        });
    }
    Ok(value)
}

fn raw_row(record: &ByteRecord) -> String {
    record
        .iter()
        .map(|f| String::from_utf8_lossy(f).into_owned())
        .collect::<Vec<_>>()
        .join(",")
}
