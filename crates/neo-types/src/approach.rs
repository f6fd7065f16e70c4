//! Close approach type.
//!
//! This module provides the `CloseApproach` struct representing a single
//! recorded pass of a near-Earth object by Earth.

use chrono::{NaiveDate, NaiveDateTime};

use crate::time::format_approach_time;
use crate::NeoId;

/// A close approach to Earth by a near-Earth object.
///
/// `designation` is the raw reference from the source record. `neo` is the
/// resolved, non-owning link into the database's object collection; it is
/// `None` until linking and stays `None` when no object matches.
///
/// # Examples
///
/// ```
/// use neo_types::CloseApproach;
/// use neo_types::time::parse_approach_time;
///
/// let time = parse_approach_time("2020-Jan-01 12:30").unwrap();
/// let approach = CloseApproach::new("2020 FK", time, 0.25, 56.78);
///
/// assert_eq!(approach.time_str(), "2020-01-01 12:30");
/// assert!(!approach.is_linked());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CloseApproach {
    /// Designation of the approaching object, as found in the source record.
    pub designation: String,
    /// Time of closest approach, UTC, minute precision.
    pub time: NaiveDateTime,
    /// Nominal approach distance in astronomical units.
    pub distance: f64,
    /// Velocity relative to Earth in km/s.
    pub velocity: f64,
    /// Linked object, set by the database.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing))]
    pub neo: Option<NeoId>,
}

impl CloseApproach {
    /// Creates an unlinked close approach.
    pub fn new(
        designation: impl Into<String>,
        time: NaiveDateTime,
        distance: f64,
        velocity: f64,
    ) -> Self {
        Self {
            designation: designation.into(),
            time,
            distance,
            velocity,
            neo: None,
        }
    }

    /// Returns the approach time formatted as `YYYY-MM-DD HH:MM`.
    pub fn time_str(&self) -> String {
        format_approach_time(&self.time)
    }

    /// Returns the calendar date of the approach.
    pub fn date(&self) -> NaiveDate {
        self.time.date()
    }

    /// Returns true once the approach has been linked to an object.
    pub fn is_linked(&self) -> bool {
        self.neo.is_some()
    }
}
