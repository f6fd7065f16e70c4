//! Arena identifiers.
//!
//! A database stores every near-Earth object and every close approach in a
//! flat collection. These identifiers are stable positions in those
//! collections and are how the two record kinds refer to each other.

use std::fmt;

/// Position of a [`NearEarthObject`](crate::NearEarthObject) in its database.
///
/// # Examples
///
/// ```
/// use neo_types::NeoId;
///
/// let id = NeoId::new(3);
/// assert_eq!(id.index(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NeoId(usize);

impl NeoId {
    /// Wraps a raw collection index.
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the raw collection index.
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NeoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "neo#{}", self.0)
    }
}

/// Position of a [`CloseApproach`](crate::CloseApproach) in its database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ApproachId(usize);

impl ApproachId {
    /// Wraps a raw collection index.
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the raw collection index.
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ApproachId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "approach#{}", self.0)
    }
}
