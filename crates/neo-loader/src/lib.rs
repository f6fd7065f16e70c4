//! # neo-loader
//!
//! Loads near-Earth object and close-approach data, links the two, and
//! answers filtered queries over the approaches.
//!
//! ```ignore
//! use neo_loader::{create_filters, limit, FilterCriteria, DataFiles, LoadConfig, NeoDatabase};
//!
//! let db = NeoDatabase::from_files(&DataFiles::default(), &LoadConfig::default())?;
//!
//! let filters = create_filters(&FilterCriteria {
//!     distance_max: Some(0.05),
//!     hazardous: Some(true),
//!     ..Default::default()
//! });
//! for approach in limit(db.query(&filters), Some(10)) {
//!     println!("{approach}");
//! }
//! ```
//!
//! ## Features
//!
//! - `parallel` (default): converts close-approach rows in parallel via rayon.

#![warn(missing_docs)]

mod approach;
mod database;
pub mod filters;
mod loader;
mod neo;
pub mod parser;
pub mod query;
pub mod types;
pub mod write;

pub use approach::{approaches_from_reader, load_approaches};
#[cfg(feature = "parallel")]
pub use approach::load_approaches_parallel;
pub use database::NeoDatabase;
pub use filters::{create_filters, limit, AttributeFilter, Comparison, FilterCriteria};
pub use loader::{discover_data_files, CAD_FILE_NAME, NEO_FILE_NAME};
pub use neo::load_neos;
pub use parser::{CsvParser, CsvRecord};
pub use query::{ApproachFilter, LinkedApproach, Query};
pub use types::{DataFiles, LoadConfig, NeoError, NeoResult, ParseStats};
pub use write::{write_csv, write_json, write_to_path, OutputFormat};

// Re-export neo-types for convenience
pub use neo_types;
