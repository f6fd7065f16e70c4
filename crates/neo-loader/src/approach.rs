//! Close-approach data parser.
//!
//! Parses `cad.json`, the close-approach API payload:
//!
//! ```json
//! {
//!   "signature": {"source": "NASA/JPL SBDB Close Approach Data API", "version": "1.1"},
//!   "count": "2",
//!   "fields": ["des", "orbit_id", "jd", "cd", "dist", "dist_min", "dist_max",
//!              "v_rel", "v_inf", "t_sigma_f", "h"],
//!   "data": [["170903", "105", "2415020.507669610", "1900-Jan-01 00:11", ...], ...]
//! }
//! ```

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use neo_types::CloseApproach;
use serde::Deserialize;
use serde_json::Value;

use crate::parser::parse;
use crate::types::{LoadConfig, NeoError, NeoResult, ParseStats};

/// Raw payload; only `fields` and `data` are read.
#[derive(Debug, Deserialize)]
struct CadPayload {
    #[serde(default)]
    fields: Option<Vec<String>>,
    data: Vec<Vec<Value>>,
}

/// Positions of the four columns we need within each data row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CadColumns {
    designation: usize,
    time: usize,
    distance: usize,
    velocity: usize,
}

impl Default for CadColumns {
    fn default() -> Self {
        Self {
            designation: 0,
            time: 3,
            distance: 4,
            velocity: 7,
        }
    }
}

impl CadColumns {
    fn resolve(fields: Option<&[String]>) -> NeoResult<Self> {
        let Some(fields) = fields else {
            return Ok(Self::default());
        };

        let find = |name: &str| {
            fields
                .iter()
                .position(|f| f == name)
                .ok_or_else(|| NeoError::MissingColumn {
                    column: name.to_string(),
                })
        };

        Ok(Self {
            designation: find("des")?,
            time: find("cd")?,
            distance: find("dist")?,
            velocity: find("v_rel")?,
        })
    }

    fn convert(&self, row: &[Value]) -> NeoResult<CloseApproach> {
        let designation = field(row, self.designation)?;
        let time = parse::approach_time(&field(row, self.time)?)?;
        let distance = parse::float(&field(row, self.distance)?)?;
        let velocity = parse::float(&field(row, self.velocity)?)?;

        Ok(CloseApproach::new(designation.trim(), time, distance, velocity))
    }
}

/// Reads a cell as text. The API emits strings, but numbers are tolerated.
fn field(row: &[Value], index: usize) -> NeoResult<String> {
    match row.get(index) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(other) => Err(NeoError::Parse(format!(
            "unexpected value {other} in column {index}"
        ))),
        None => Err(NeoError::Parse(format!(
            "row has {} columns, expected at least {}",
            row.len(),
            index + 1
        ))),
    }
}

/// Keeps converted rows, skipping failures when the config allows it.
fn collect_rows(
    converted: Vec<NeoResult<CloseApproach>>,
    config: &LoadConfig,
) -> NeoResult<Vec<CloseApproach>> {
    let mut stats = ParseStats {
        total_records: converted.len(),
        ..Default::default()
    };
    let mut approaches = Vec::with_capacity(converted.len());

    for (row, result) in converted.into_iter().enumerate() {
        match result {
            Ok(approach) => approaches.push(approach),
            Err(e) if config.skip_invalid => {
                stats.skipped_records += 1;
                tracing::warn!("skipping approach row {}: {}", row, e);
            }
            Err(e) => return Err(e),
        }
    }

    stats.loaded_records = approaches.len();
    tracing::debug!(
        total = stats.total_records,
        loaded = stats.loaded_records,
        skipped = stats.skipped_records,
        "parsed close-approach rows"
    );
    Ok(approaches)
}

fn read_payload<R: Read>(reader: R) -> NeoResult<(CadPayload, CadColumns)> {
    let payload: CadPayload = serde_json::from_reader(reader)?;
    let columns = CadColumns::resolve(payload.fields.as_deref())?;
    Ok((payload, columns))
}

fn open<P: AsRef<Path>>(path: P) -> NeoResult<BufReader<File>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(NeoError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    Ok(BufReader::new(File::open(path)?))
}

/// Parses close approaches from a JSON reader, in payload order.
pub fn approaches_from_reader<R: Read>(
    reader: R,
    config: &LoadConfig,
) -> NeoResult<Vec<CloseApproach>> {
    let (payload, columns) = read_payload(reader)?;
    let converted = payload
        .data
        .iter()
        .map(|row| columns.convert(row))
        .collect();
    collect_rows(converted, config)
}

/// Loads every close approach from a JSON file, in payload order.
pub fn load_approaches<P: AsRef<Path>>(
    path: P,
    config: &LoadConfig,
) -> NeoResult<Vec<CloseApproach>> {
    approaches_from_reader(open(path)?, config)
}

/// Loads close approaches, converting rows in parallel.
///
/// Row order is preserved, so the result is identical to [`load_approaches`].
#[cfg(feature = "parallel")]
pub fn load_approaches_parallel<P: AsRef<Path>>(
    path: P,
    config: &LoadConfig,
) -> NeoResult<Vec<CloseApproach>> {
    let (payload, columns) = read_payload(open(path)?)?;
    let converted = payload
        .data
        .par_iter()
        .map(|row| columns.convert(row))
        .collect();
    collect_rows(converted, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "signature": {"source": "NASA/JPL SBDB Close Approach Data API", "version": "1.1"},
        "count": "3",
        "fields": ["des", "orbit_id", "jd", "cd", "dist", "dist_min", "dist_max",
                   "v_rel", "v_inf", "t_sigma_f", "h"],
        "data": [
            ["170903", "105", "2415020.507669610", "1900-Jan-01 00:11", "0.0921795123769547",
             "0.0912006569517418", "0.0931589328621254", "16.7523040362574",
             "16.7505784933163", "01:00", "18.1"],
            ["2020 FK ", "6", "2458849.020833333", "2020-Jan-01 12:30", "0.25",
             "0.24", "0.26", "56.78", "56.77", "< 00:01", null],
            ["1999 XX", "9", "2458640.000000000", "2019-Jun-05 00:00", "0.10",
             "0.09", "0.11", "10.0", "9.9", "00:02", "20.0"]
        ]
    }"#;

    #[test]
    fn test_parse_sample_payload() {
        let approaches =
            approaches_from_reader(SAMPLE.as_bytes(), &LoadConfig::default()).unwrap();
        assert_eq!(approaches.len(), 3);

        let first = &approaches[0];
        assert_eq!(first.designation, "170903");
        assert_eq!(first.time_str(), "1900-01-01 00:11");
        assert!((first.distance - 0.0921795123769547).abs() < 1e-12);
        assert!((first.velocity - 16.7523040362574).abs() < 1e-12);
        assert!(first.neo.is_none());

        // designation is trimmed
        assert_eq!(approaches[1].designation, "2020 FK");
        assert_eq!(approaches[2].designation, "1999 XX");
    }

    #[test]
    fn test_fields_reordered() {
        let data = r#"{"fields": ["v_rel", "dist", "cd", "des"],
                       "data": [["5.5", "0.3", "2001-Feb-03 04:05", "433"]]}"#;
        let approaches = approaches_from_reader(data.as_bytes(), &LoadConfig::default()).unwrap();
        assert_eq!(approaches[0].designation, "433");
        assert_eq!(approaches[0].velocity, 5.5);
        assert_eq!(approaches[0].distance, 0.3);
    }

    #[test]
    fn test_positional_without_fields() {
        let data = r#"{"data": [["433", "x", "x", "2001-Feb-03 04:05", "0.3", "x", "x", "5.5"]]}"#;
        let approaches = approaches_from_reader(data.as_bytes(), &LoadConfig::default()).unwrap();
        assert_eq!(approaches.len(), 1);
        assert_eq!(approaches[0].velocity, 5.5);
    }

    #[test]
    fn test_missing_field_name() {
        let data = r#"{"fields": ["des", "cd", "dist"], "data": []}"#;
        let result = approaches_from_reader(data.as_bytes(), &LoadConfig::default());
        assert!(matches!(result, Err(NeoError::MissingColumn { ref column }) if column == "v_rel"));
    }

    #[test]
    fn test_bad_rows() {
        let data = r#"{"data": [
            ["433", "x", "x", "2001-02-03 04:05", "0.3", "x", "x", "5.5"],
            ["434", "x", "x"],
            ["435", "x", "x", "2001-Feb-03 04:05", "0.3", "x", "x", "5.5"]
        ]}"#;

        let strict = approaches_from_reader(data.as_bytes(), &LoadConfig::default());
        assert!(matches!(strict, Err(NeoError::InvalidDate { .. })));

        let lenient = approaches_from_reader(data.as_bytes(), &LoadConfig::lenient()).unwrap();
        assert_eq!(lenient.len(), 1);
        assert_eq!(lenient[0].designation, "435");
    }

    #[test]
    fn test_invalid_json() {
        let result = approaches_from_reader("not json".as_bytes(), &LoadConfig::default());
        assert!(matches!(result, Err(NeoError::Json(_))));
    }
}
