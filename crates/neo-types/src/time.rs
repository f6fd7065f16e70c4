//! Calendar helpers for close-approach timestamps.
//!
//! Source data carries times like `2020-Jan-01 12:30`: minute precision, no
//! seconds, always UTC. Output renders them as `2020-01-01 12:30`.

use chrono::{NaiveDate, NaiveDateTime, ParseError};

/// Layout of approach times in the source data.
pub const SOURCE_FORMAT: &str = "%Y-%b-%d %H:%M";

/// Layout used when displaying or serializing approach times.
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Layout of calendar dates given on the command line.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a source timestamp such as `2020-Jan-01 12:30`.
///
/// # Examples
///
/// ```
/// use neo_types::time::parse_approach_time;
///
/// let time = parse_approach_time("2020-Jan-01 12:30").unwrap();
/// assert_eq!(time.to_string(), "2020-01-01 12:30:00");
/// ```
pub fn parse_approach_time(value: &str) -> Result<NaiveDateTime, ParseError> {
    NaiveDateTime::parse_from_str(value.trim(), SOURCE_FORMAT)
}

/// Formats a timestamp without seconds, e.g. `2020-01-01 12:30`.
pub fn format_approach_time(time: &NaiveDateTime) -> String {
    time.format(DISPLAY_FORMAT).to_string()
}

/// Parses a `YYYY-MM-DD` calendar date.
pub fn parse_date(value: &str) -> Result<NaiveDate, ParseError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
}
