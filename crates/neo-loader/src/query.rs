//! Lazy query engine over linked close approaches.
//!
//! A query walks the database's approaches in load order and yields each one
//! that every filter accepts. Nothing is evaluated until the caller pulls the
//! next item, so a consumer that stops early (for example [`limit`]) never
//! pays for the rest of the collection.
//!
//! [`limit`]: crate::filters::limit

use std::fmt;
use std::iter::FusedIterator;
use std::ops::Deref;
use std::slice;

use neo_types::{CloseApproach, NearEarthObject};

/// A close approach paired with the object it was linked to.
///
/// Derefs to [`CloseApproach`], so approach fields are available directly.
#[derive(Debug, Clone, Copy)]
pub struct LinkedApproach<'a> {
    approach: &'a CloseApproach,
    neo: Option<&'a NearEarthObject>,
}

impl<'a> LinkedApproach<'a> {
    /// Resolves the approach's link against the object collection.
    pub(crate) fn resolve(approach: &'a CloseApproach, neos: &'a [NearEarthObject]) -> Self {
        let neo = approach.neo.and_then(|id| neos.get(id.index()));
        Self { approach, neo }
    }

    /// Returns the underlying approach.
    pub fn approach(&self) -> &'a CloseApproach {
        self.approach
    }

    /// Returns the linked object, if any.
    pub fn neo(&self) -> Option<&'a NearEarthObject> {
        self.neo
    }

    /// Returns the linked object's full name, or the raw designation when unlinked.
    pub fn fullname(&self) -> String {
        match self.neo {
            Some(neo) => neo.fullname(),
            None => self.approach.designation.clone(),
        }
    }
}

impl Deref for LinkedApproach<'_> {
    type Target = CloseApproach;

    fn deref(&self) -> &CloseApproach {
        self.approach
    }
}

impl PartialEq for LinkedApproach<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.approach, other.approach)
    }
}

impl fmt::Display for LinkedApproach<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "At {}, '{}' approaches Earth at a distance of {:.2} au and a velocity of {:.2} km/s.",
            self.approach.time_str(),
            self.fullname(),
            self.approach.distance,
            self.approach.velocity
        )
    }
}

/// A predicate over a single linked close approach.
///
/// Implementations must be pure: the same approach always gives the same
/// answer, so a filter set can be reused across queries.
pub trait ApproachFilter {
    /// Returns true if the approach should be kept.
    fn matches(&self, approach: &LinkedApproach<'_>) -> bool;
}

impl<F> ApproachFilter for F
where
    F: Fn(&LinkedApproach<'_>) -> bool,
{
    fn matches(&self, approach: &LinkedApproach<'_>) -> bool {
        self(approach)
    }
}

/// Iterator returned by [`NeoDatabase::query`](crate::NeoDatabase::query).
///
/// Filters run in the order given and stop at the first rejection.
pub struct Query<'db, 'f, F> {
    approaches: slice::Iter<'db, CloseApproach>,
    neos: &'db [NearEarthObject],
    filters: &'f [F],
}

impl<'db, 'f, F: ApproachFilter> Query<'db, 'f, F> {
    pub(crate) fn new(
        approaches: &'db [CloseApproach],
        neos: &'db [NearEarthObject],
        filters: &'f [F],
    ) -> Self {
        Self {
            approaches: approaches.iter(),
            neos,
            filters,
        }
    }
}

impl<'db, F: ApproachFilter> Iterator for Query<'db, '_, F> {
    type Item = LinkedApproach<'db>;

    fn next(&mut self) -> Option<Self::Item> {
        for approach in self.approaches.by_ref() {
            let linked = LinkedApproach::resolve(approach, self.neos);
            if self.filters.iter().all(|f| f.matches(&linked)) {
                return Some(linked);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.approaches.len();
        if self.filters.is_empty() {
            (remaining, Some(remaining))
        } else {
            (0, Some(remaining))
        }
    }
}

impl<F: ApproachFilter> FusedIterator for Query<'_, '_, F> {}

impl<F> fmt::Debug for Query<'_, '_, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("remaining", &self.approaches.len())
            .field("filters", &self.filters.len())
            .finish()
    }
}
