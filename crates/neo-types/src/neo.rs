//! Near-Earth object type.
//!
//! This module provides the `NearEarthObject` struct representing a row
//! from the NEO catalogue.

use std::fmt;

use crate::ApproachId;

/// A near-Earth object from the NEO catalogue.
///
/// The primary designation is the object's identity. Names are optional and
/// a blank name is stored as `None`. An unknown diameter is stored as
/// `f64::NAN` so the field is always a plain float.
///
/// `approaches` starts empty and is filled in when a database links the
/// catalogue against its close approaches.
///
/// # Examples
///
/// ```
/// use neo_types::NearEarthObject;
///
/// let neo = NearEarthObject::new("433", Some("Eros"), 16.84, false);
/// assert_eq!(neo.fullname(), "433 (Eros)");
///
/// let unnamed = NearEarthObject::new("2020 FK", Some("  "), f64::NAN, true);
/// assert_eq!(unnamed.name, None);
/// assert!(!unnamed.has_known_diameter());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NearEarthObject {
    /// Primary designation, unique across the catalogue.
    pub designation: String,
    /// IAU name, if the object has one.
    #[cfg_attr(feature = "serde", serde(default, deserialize_with = "blank_as_none"))]
    pub name: Option<String>,
    /// Diameter in kilometres, `NaN` when unknown.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "nan_if_null"))]
    pub diameter: f64,
    /// Whether the object is flagged as potentially hazardous.
    pub hazardous: bool,
    /// Close approaches linked to this object, in load order.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing))]
    pub approaches: Vec<ApproachId>,
}

impl NearEarthObject {
    /// Creates an unlinked object, normalizing a blank name to `None`.
    pub fn new(
        designation: impl Into<String>,
        name: Option<&str>,
        diameter: f64,
        hazardous: bool,
    ) -> Self {
        Self {
            designation: designation.into(),
            name: normalize_name(name),
            diameter,
            hazardous,
            approaches: Vec::new(),
        }
    }

    /// Returns `"<designation> (<name>)"`, or just the designation when unnamed.
    pub fn fullname(&self) -> String {
        match &self.name {
            Some(name) => format!("{} ({})", self.designation, name),
            None => self.designation.clone(),
        }
    }

    /// Returns true unless the diameter is the unknown sentinel.
    pub fn has_known_diameter(&self) -> bool {
        !self.diameter.is_nan()
    }

    /// Returns the diameter, or `None` when it is unknown.
    pub fn known_diameter(&self) -> Option<f64> {
        self.has_known_diameter().then_some(self.diameter)
    }
}

fn normalize_name(name: Option<&str>) -> Option<String> {
    name.map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
}

#[cfg(feature = "serde")]
fn blank_as_none<'de, D: serde::Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    use serde::Deserialize;
    Ok(normalize_name(Option::<String>::deserialize(deserializer)?.as_deref()))
}

/// JSON has no NaN; serde_json writes it as `null`, so read `null` back as NaN.
#[cfg(feature = "serde")]
fn nan_if_null<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    use serde::Deserialize;
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

// Unknown (NaN) diameters compare equal to each other.
impl PartialEq for NearEarthObject {
    fn eq(&self, other: &Self) -> bool {
        self.designation == other.designation
            && self.name == other.name
            && self.hazardous == other.hazardous
            && (self.diameter == other.diameter
                || (self.diameter.is_nan() && other.diameter.is_nan()))
    }
}

impl fmt::Display for NearEarthObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.hazardous { "is" } else { "is not" };
        write!(
            f,
            "NEO {} has a diameter of {:.3} km and {} potentially hazardous.",
            self.fullname(),
            self.diameter,
            status
        )
    }
}
