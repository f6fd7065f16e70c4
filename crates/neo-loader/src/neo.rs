//! NEO catalogue parser.
//!
//! Parses `neos.csv`, the small-body database export with one row per object.

use std::path::Path;

use csv::StringRecord;
use neo_types::NearEarthObject;

use crate::parser::{parse, ColumnIndex, CsvParser, CsvRecord};
use crate::types::{LoadConfig, NeoResult};

/// Columns read from the catalogue: designation, name, diameter, hazard flag.
const NEO_COLUMNS: &[&str] = &["pdes", "name", "diameter", "pha"];

impl CsvRecord for NearEarthObject {
    const REQUIRED_COLUMNS: &'static [&'static str] = NEO_COLUMNS;

    fn from_record(record: &StringRecord, columns: &ColumnIndex) -> NeoResult<Self> {
        let designation = columns.field(record, 0).trim();
        let name = columns.field(record, 1);

        Ok(NearEarthObject::new(
            designation,
            Some(name),
            parse::float_or_nan(columns.field(record, 2))?,
            parse::flag(columns.field(record, 3)),
        ))
    }
}

/// Loads every object from a catalogue CSV file, in file order.
pub fn load_neos<P: AsRef<Path>>(path: P, config: &LoadConfig) -> NeoResult<Vec<NearEarthObject>> {
    let neos = CsvParser::<_, NearEarthObject>::from_path(path, config.clone())?.parse_all()?;
    tracing::debug!("loaded {} near-Earth objects", neos.len());
    Ok(neos)
}
