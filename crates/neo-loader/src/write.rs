//! CSV and JSON output for query results.
//!
//! Each output record carries the approach's own fields plus the fields of
//! its linked object. Approaches without an object get an empty designation
//! and name, an unknown diameter and a false hazard flag.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::query::LinkedApproach;
use crate::types::{NeoError, NeoResult};

/// CSV header row, in column order.
pub const CSV_FIELDS: &[&str] = &[
    "datetime_utc",
    "distance_au",
    "velocity_km_s",
    "designation",
    "name",
    "diameter_km",
    "potentially_hazardous",
];

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    datetime_utc: String,
    distance_au: f64,
    velocity_km_s: f64,
    designation: &'a str,
    name: &'a str,
    diameter_km: String,
    potentially_hazardous: &'static str,
}

impl<'a> From<&LinkedApproach<'a>> for CsvRow<'a> {
    fn from(approach: &LinkedApproach<'a>) -> Self {
        let neo = approach.neo();
        let diameter = neo.map_or(f64::NAN, |n| n.diameter);

        CsvRow {
            datetime_utc: approach.time_str(),
            distance_au: approach.distance,
            velocity_km_s: approach.velocity,
            designation: neo.map_or("", |n| n.designation.as_str()),
            name: neo.and_then(|n| n.name.as_deref()).unwrap_or(""),
            diameter_km: if diameter.is_nan() {
                "nan".to_string()
            } else {
                // Debug keeps the trailing `.0` the other float columns get.
                format!("{diameter:?}")
            },
            potentially_hazardous: if neo.is_some_and(|n| n.hazardous) {
                "True"
            } else {
                "False"
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct JsonNeo<'a> {
    designation: &'a str,
    name: &'a str,
    /// `null` when unknown.
    diameter_km: Option<f64>,
    potentially_hazardous: bool,
}

#[derive(Debug, Serialize)]
struct JsonRow<'a> {
    datetime_utc: String,
    distance_au: f64,
    velocity_km_s: f64,
    neo: JsonNeo<'a>,
}

impl<'a> From<&LinkedApproach<'a>> for JsonRow<'a> {
    fn from(approach: &LinkedApproach<'a>) -> Self {
        let neo = approach.neo();

        JsonRow {
            datetime_utc: approach.time_str(),
            distance_au: approach.distance,
            velocity_km_s: approach.velocity,
            neo: JsonNeo {
                designation: neo.map_or("", |n| n.designation.as_str()),
                name: neo.and_then(|n| n.name.as_deref()).unwrap_or(""),
                diameter_km: neo.and_then(|n| n.known_diameter()),
                potentially_hazardous: neo.is_some_and(|n| n.hazardous),
            },
        }
    }
}

/// Output format, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Flat rows with a header.
    Csv,
    /// Array of nested objects.
    Json,
}

impl OutputFormat {
    /// Picks the format from a `.csv` or `.json` extension (case-insensitive).
    pub fn from_path(path: &Path) -> NeoResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        match ext.as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(NeoError::UnsupportedOutput {
                path: path.display().to_string(),
            }),
        }
    }
}

/// Writes results as CSV. The header is written even when there are no rows.
///
/// Returns the number of rows written.
pub fn write_csv<'a, W, I>(writer: W, results: I) -> NeoResult<usize>
where
    W: Write,
    I: IntoIterator<Item = LinkedApproach<'a>>,
{
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(CSV_FIELDS)?;

    let mut count = 0;
    for approach in results {
        csv_writer.serialize(CsvRow::from(&approach))?;
        count += 1;
    }

    csv_writer.flush()?;
    Ok(count)
}

/// Writes results as a pretty-printed JSON array.
///
/// Returns the number of records written.
pub fn write_json<'a, W, I>(mut writer: W, results: I) -> NeoResult<usize>
where
    W: Write,
    I: IntoIterator<Item = LinkedApproach<'a>>,
{
    let rows: Vec<JsonRow<'a>> = results
        .into_iter()
        .map(|approach| JsonRow::from(&approach))
        .collect();

    serde_json::to_writer_pretty(&mut writer, &rows)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(rows.len())
}

/// Writes results to `path`, choosing CSV or JSON from its extension.
///
/// Missing parent directories are created. Returns the number of records written.
pub fn write_to_path<'a, I>(path: &Path, results: I) -> NeoResult<usize>
where
    I: IntoIterator<Item = LinkedApproach<'a>>,
{
    let format = OutputFormat::from_path(path)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = BufWriter::new(File::create(path)?);

    let count = match format {
        OutputFormat::Csv => write_csv(file, results)?,
        OutputFormat::Json => write_json(file, results)?,
    };
    tracing::debug!("wrote {} results to {}", count, path.display());
    Ok(count)
}
