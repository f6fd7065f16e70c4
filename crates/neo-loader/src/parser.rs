//! Generic CSV record parser.
//!
//! Provides a streaming parser for comma-separated catalogue files whose
//! columns are located by header name.

use std::fs::File;
use std::io::{BufReader, Read};
use std::marker::PhantomData;
use std::path::Path;

use csv::{Reader, ReaderBuilder, StringRecord};

use crate::types::{LoadConfig, NeoError, NeoResult, ParseStats};

/// Trait for types that can be parsed from CSV records.
pub trait CsvRecord: Sized {
    /// Header names this record type reads, in the order `from_record` expects them.
    const REQUIRED_COLUMNS: &'static [&'static str];

    /// Parse a record using the resolved column positions.
    fn from_record(record: &StringRecord, columns: &ColumnIndex) -> NeoResult<Self>;
}

/// Positions of the required columns within a file's header row.
#[derive(Debug, Clone)]
pub struct ColumnIndex {
    positions: Vec<usize>,
}

impl ColumnIndex {
    /// Resolves each required column name against the header row.
    pub fn resolve(headers: &StringRecord, required: &[&str]) -> NeoResult<Self> {
        let names: Vec<&str> = headers
            .iter()
            // Handle UTF-8 BOM at start of file
            .map(|h| h.trim_start_matches('\u{feff}').trim())
            .collect();

        let positions = required
            .iter()
            .map(|column| {
                names
                    .iter()
                    .position(|name| name == column)
                    .ok_or_else(|| NeoError::MissingColumn {
                        column: column.to_string(),
                    })
            })
            .collect::<NeoResult<Vec<_>>>()?;

        Ok(Self { positions })
    }

    /// Returns the field for the `column`-th required column, or `""` if the row is short.
    pub fn field<'r>(&self, record: &'r StringRecord, column: usize) -> &'r str {
        self.positions
            .get(column)
            .and_then(|&pos| record.get(pos))
            .unwrap_or("")
    }
}

/// A streaming parser for CSV catalogue files.
///
/// Records are parsed one at a time; nothing but the current row is held
/// in memory.
pub struct CsvParser<R: Read, T: CsvRecord> {
    reader: Reader<R>,
    columns: ColumnIndex,
    config: LoadConfig,
    stats: ParseStats,
    _marker: PhantomData<T>,
}

impl<T: CsvRecord> CsvParser<BufReader<File>, T> {
    /// Creates a new parser from a file path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or lacks a required column.
    pub fn from_path<P: AsRef<Path>>(path: P, config: LoadConfig) -> NeoResult<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(NeoError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file), config)
    }
}

impl<R: Read, T: CsvRecord> CsvParser<R, T> {
    /// Creates a new parser from a reader.
    pub fn from_reader(reader: R, config: LoadConfig) -> NeoResult<Self> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::None)
            .from_reader(reader);

        let columns = ColumnIndex::resolve(csv_reader.headers()?, T::REQUIRED_COLUMNS)?;

        Ok(Self {
            reader: csv_reader,
            columns,
            config,
            stats: ParseStats::default(),
            _marker: PhantomData,
        })
    }

    /// Returns counters for the records read so far.
    pub fn stats(&self) -> &ParseStats {
        &self.stats
    }

    /// Parses all records into a Vec.
    ///
    /// The first bad row aborts the load unless the config skips invalid rows.
    pub fn parse_all(mut self) -> NeoResult<Vec<T>> {
        let mut results = Vec::new();
        for record in self.by_ref() {
            results.push(record?);
        }
        tracing::debug!(
            total = self.stats.total_records,
            loaded = self.stats.loaded_records,
            skipped = self.stats.skipped_records,
            load_rate = self.stats.load_rate(),
            "parsed CSV records"
        );
        Ok(results)
    }
}

impl<R: Read, T: CsvRecord> Iterator for CsvParser<R, T> {
    type Item = NeoResult<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let mut record = StringRecord::new();
            match self.reader.read_record(&mut record) {
                Ok(true) => {
                    // Skip empty records
                    if record.iter().all(|f| f.trim().is_empty()) {
                        continue;
                    }
                    self.stats.total_records += 1;

                    match T::from_record(&record, &self.columns) {
                        Ok(parsed) => {
                            self.stats.loaded_records += 1;
                            return Some(Ok(parsed));
                        }
                        Err(e) if self.config.skip_invalid => {
                            self.stats.skipped_records += 1;
                            tracing::warn!("skipping CSV row {}: {}", self.stats.total_records, e);
                            continue;
                        }
                        Err(e) => return Some(Err(e)),
                    }
                }
                Ok(false) => return None, // End of file
                Err(e) => return Some(Err(e.into())),
            }
        }
    }
}

/// Helper functions for parsing field values.
pub mod parse {
    use chrono::NaiveDateTime;
    use neo_types::time::parse_approach_time;

    use super::{NeoError, NeoResult};

    /// Parses a required float.
    pub fn float(value: &str) -> NeoResult<f64> {
        value
            .trim()
            .parse::<f64>()
            .map_err(|_| NeoError::InvalidFloat {
                value: value.to_string(),
            })
    }

    /// Parses a float where an empty field means unknown (`NaN`).
    pub fn float_or_nan(value: &str) -> NeoResult<f64> {
        if value.trim().is_empty() {
            Ok(f64::NAN)
        } else {
            float(value)
        }
    }

    /// Parses a `Y`/`N` flag; anything other than `Y` is false.
    pub fn flag(value: &str) -> bool {
        value.trim() == "Y"
    }

    /// Parses an approach time such as `2020-Jan-01 12:30`.
    pub fn approach_time(value: &str) -> NeoResult<NaiveDateTime> {
        parse_approach_time(value).map_err(|_| NeoError::InvalidDate {
            value: value.to_string(),
        })
    }
}
