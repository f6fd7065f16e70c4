//! Loader-specific types: errors, configuration and statistics.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading or writing NEO data.
#[derive(Error, Debug)]
pub enum NeoError {
    /// I/O error reading or writing a data file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing or writing error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON parsing or writing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File not found.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Directory not found.
    #[error("Directory not found: {path}")]
    DirectoryNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Missing required column in a data file.
    #[error("Missing required column: {column}")]
    MissingColumn {
        /// The name of the missing column.
        column: String,
    },

    /// Invalid floating-point value.
    #[error("Invalid number: {value}")]
    InvalidFloat {
        /// The invalid value.
        value: String,
    },

    /// Invalid approach time or calendar date.
    #[error("Invalid date format: {value}")]
    InvalidDate {
        /// The invalid date value.
        value: String,
    },

    /// Output path has an extension we cannot write.
    #[error("Unsupported output file: {path} (expected .csv or .json)")]
    UnsupportedOutput {
        /// The rejected output path.
        path: String,
    },

    /// Generic parse error.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Result type for loader operations.
pub type NeoResult<T> = Result<T, NeoError>;

/// Configuration for record loading.
#[derive(Debug, Clone, Default)]
pub struct LoadConfig {
    /// Skip rows that fail to parse instead of failing the whole load.
    pub skip_invalid: bool,
}

impl LoadConfig {
    /// Creates a config that skips malformed rows.
    pub fn lenient() -> Self {
        Self { skip_invalid: true }
    }
}

/// Statistics from loading a data file.
#[derive(Debug, Clone, Default)]
pub struct ParseStats {
    /// Total records read from the file.
    pub total_records: usize,
    /// Records successfully converted.
    pub loaded_records: usize,
    /// Records skipped because they failed to parse.
    pub skipped_records: usize,
}

impl ParseStats {
    /// Returns the percentage of records that loaded.
    pub fn load_rate(&self) -> f64 {
        if self.total_records == 0 {
            0.0
        } else {
            (self.loaded_records as f64 / self.total_records as f64) * 100.0
        }
    }
}

/// Default location of the NEO catalogue.
pub const DEFAULT_NEO_FILE: &str = "data/neos.csv";
/// Default location of the close-approach data.
pub const DEFAULT_CAD_FILE: &str = "data/cad.json";

/// Locations of the two input files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFiles {
    /// Path to the NEO catalogue CSV.
    pub neos_file: PathBuf,
    /// Path to the close-approach JSON.
    pub approaches_file: PathBuf,
}

impl Default for DataFiles {
    fn default() -> Self {
        Self {
            neos_file: PathBuf::from(DEFAULT_NEO_FILE),
            approaches_file: PathBuf::from(DEFAULT_CAD_FILE),
        }
    }
}

impl DataFiles {
    /// Creates a file set from explicit paths.
    pub fn new(neos_file: impl AsRef<Path>, approaches_file: impl AsRef<Path>) -> Self {
        Self {
            neos_file: neos_file.as_ref().to_path_buf(),
            approaches_file: approaches_file.as_ref().to_path_buf(),
        }
    }

    /// Returns the names of files that do not exist on disk.
    pub fn missing_files(&self) -> Vec<&Path> {
        [self.neos_file.as_path(), self.approaches_file.as_path()]
            .into_iter()
            .filter(|p| !p.exists())
            .collect()
    }
}
