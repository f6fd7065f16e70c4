//! Attribute filters and result limiting.
//!
//! [`create_filters`] turns user criteria into a list of [`AttributeFilter`]s
//! for [`NeoDatabase::query`](crate::NeoDatabase::query); [`limit`] caps the
//! resulting stream without forcing it.

use std::fmt;

use chrono::NaiveDate;

use crate::query::{ApproachFilter, LinkedApproach};

/// How an attribute is compared against the reference value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// Attribute equals the reference value.
    Eq,
    /// Attribute is greater than or equal to the reference value.
    Ge,
    /// Attribute is less than or equal to the reference value.
    Le,
}

impl Comparison {
    /// Applies the comparison. Unordered values (`NaN`) never match.
    pub fn compare<T: PartialOrd>(self, attribute: T, reference: T) -> bool {
        match self {
            Comparison::Eq => attribute == reference,
            Comparison::Ge => attribute >= reference,
            Comparison::Le => attribute <= reference,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            Comparison::Eq => "==",
            Comparison::Ge => ">=",
            Comparison::Le => "<=",
        }
    }
}

/// A filter on one attribute of an approach or of its linked object.
///
/// Diameter and hazard filters read the linked object; an approach with no
/// object never matches them. An unknown diameter never matches either.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeFilter {
    /// Calendar date of the approach.
    Date(Comparison, NaiveDate),
    /// Approach distance in au.
    Distance(Comparison, f64),
    /// Relative velocity in km/s.
    Velocity(Comparison, f64),
    /// Diameter of the object in km.
    Diameter(Comparison, f64),
    /// Whether the object is potentially hazardous.
    Hazardous(bool),
}

impl ApproachFilter for AttributeFilter {
    fn matches(&self, approach: &LinkedApproach<'_>) -> bool {
        match *self {
            AttributeFilter::Date(op, date) => op.compare(approach.date(), date),
            AttributeFilter::Distance(op, value) => op.compare(approach.distance, value),
            AttributeFilter::Velocity(op, value) => op.compare(approach.velocity, value),
            AttributeFilter::Diameter(op, value) => approach
                .neo()
                .and_then(|neo| neo.known_diameter())
                .is_some_and(|diameter| op.compare(diameter, value)),
            AttributeFilter::Hazardous(wanted) => approach
                .neo()
                .is_some_and(|neo| neo.hazardous == wanted),
        }
    }
}

impl fmt::Display for AttributeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeFilter::Date(op, date) => write!(f, "date {} {}", op.symbol(), date),
            AttributeFilter::Distance(op, v) => write!(f, "distance {} {}", op.symbol(), v),
            AttributeFilter::Velocity(op, v) => write!(f, "velocity {} {}", op.symbol(), v),
            AttributeFilter::Diameter(op, v) => write!(f, "diameter {} {}", op.symbol(), v),
            AttributeFilter::Hazardous(h) => write!(f, "hazardous == {}", h),
        }
    }
}

/// User-supplied query criteria. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    /// Exact approach date.
    pub date: Option<NaiveDate>,
    /// Earliest approach date, inclusive.
    pub start_date: Option<NaiveDate>,
    /// Latest approach date, inclusive.
    pub end_date: Option<NaiveDate>,
    /// Minimum distance in au.
    pub distance_min: Option<f64>,
    /// Maximum distance in au.
    pub distance_max: Option<f64>,
    /// Minimum velocity in km/s.
    pub velocity_min: Option<f64>,
    /// Maximum velocity in km/s.
    pub velocity_max: Option<f64>,
    /// Minimum diameter in km.
    pub diameter_min: Option<f64>,
    /// Maximum diameter in km.
    pub diameter_max: Option<f64>,
    /// Required hazard flag.
    pub hazardous: Option<bool>,
}

/// Builds one filter per supplied criterion, in declaration order.
pub fn create_filters(criteria: &FilterCriteria) -> Vec<AttributeFilter> {
    use AttributeFilter::*;
    use Comparison::*;

    let candidates = [
        criteria.date.map(|d| Date(Eq, d)),
        criteria.start_date.map(|d| Date(Ge, d)),
        criteria.end_date.map(|d| Date(Le, d)),
        criteria.distance_min.map(|v| Distance(Ge, v)),
        criteria.distance_max.map(|v| Distance(Le, v)),
        criteria.velocity_min.map(|v| Velocity(Ge, v)),
        criteria.velocity_max.map(|v| Velocity(Le, v)),
        criteria.diameter_min.map(|v| Diameter(Ge, v)),
        criteria.diameter_max.map(|v| Diameter(Le, v)),
        criteria.hazardous.map(Hazardous),
    ];

    candidates.into_iter().flatten().collect()
}

/// Caps a stream at `n` items. `None` or `Some(0)` leaves it unbounded.
///
/// The stream is consumed lazily, so upstream filters stop running once the
/// cap is reached.
pub fn limit<I: Iterator>(iter: I, n: Option<usize>) -> std::iter::Take<I> {
    match n {
        Some(n) if n > 0 => iter.take(n),
        _ => iter.take(usize::MAX),
    }
}
