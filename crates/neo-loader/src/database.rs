//! In-memory NEO database.
//!
//! Owns the object and approach collections, indexes objects by designation
//! and by name, and links every approach to its object exactly once, at
//! construction.
//!
//! Objects live in one arena and approaches in another. An object lists the
//! [`ApproachId`]s it owns; an approach points back at its object through a
//! [`NeoId`]. Neither side holds a reference into the other, and after
//! construction the database only hands out shared references, so it can be
//! read from any number of threads.
//!
//! ```ignore
//! let db = NeoDatabase::new(load_neos(&files.neos_file, &config)?, load_approaches(&files.approaches_file, &config)?);
//!
//! if let Some(neo) = db.get_neo_by_name("Halley") {
//!     for approach in db.approaches_for(neo) {
//!         println!("{}", approach.time_str());
//!     }
//! }
//! ```

use std::collections::HashMap;

use neo_types::{ApproachId, CloseApproach, NearEarthObject, NeoId};

#[cfg(not(feature = "parallel"))]
use crate::approach::load_approaches;
#[cfg(feature = "parallel")]
use crate::approach::load_approaches_parallel;
use crate::neo::load_neos;
use crate::query::{ApproachFilter, LinkedApproach, Query};
use crate::types::{DataFiles, LoadConfig, NeoError, NeoResult};

/// Linked, indexed collection of near-Earth objects and close approaches.
pub struct NeoDatabase {
    /// All objects, in load order.
    neos: Vec<NearEarthObject>,
    /// All approaches, in load order.
    approaches: Vec<CloseApproach>,
    /// Designation → object. Covers every object; last duplicate wins.
    by_designation: HashMap<String, NeoId>,
    /// Name → object. Only named objects; last duplicate wins.
    by_name: HashMap<String, NeoId>,
}

impl std::fmt::Debug for NeoDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NeoDatabase")
            .field("neos", &self.neos.len())
            .field("approaches", &self.approaches.len())
            .field("by_designation", &self.by_designation.len())
            .field("by_name", &self.by_name.len())
            .finish()
    }
}

impl NeoDatabase {
    /// Builds the indices and links the two collections.
    ///
    /// Any links already present on the inputs are discarded first. An
    /// approach whose designation matches no object stays unlinked; this is
    /// not an error. When two objects share a designation or a name, the
    /// later one owns that index entry.
    pub fn new(mut neos: Vec<NearEarthObject>, mut approaches: Vec<CloseApproach>) -> Self {
        let mut by_designation = HashMap::with_capacity(neos.len());
        let mut by_name = HashMap::new();
        let mut duplicate_designations = 0usize;
        let mut duplicate_names = 0usize;

        for (index, neo) in neos.iter_mut().enumerate() {
            let id = NeoId::new(index);
            neo.approaches.clear();

            if by_designation.insert(neo.designation.clone(), id).is_some() {
                duplicate_designations += 1;
            }
            if let Some(name) = neo.name.as_deref().filter(|n| !n.trim().is_empty()) {
                if by_name.insert(name.to_string(), id).is_some() {
                    duplicate_names += 1;
                }
            }
        }

        let mut unlinked = 0usize;
        for (index, approach) in approaches.iter_mut().enumerate() {
            approach.neo = by_designation.get(&approach.designation).copied();
            match approach.neo {
                Some(id) => neos[id.index()].approaches.push(ApproachId::new(index)),
                None => unlinked += 1,
            }
        }

        tracing::debug!(
            neos = neos.len(),
            approaches = approaches.len(),
            unlinked,
            duplicate_designations,
            duplicate_names,
            "linked NEO database"
        );

        Self {
            neos,
            approaches,
            by_designation,
            by_name,
        }
    }

    /// Loads both data files and links them.
    ///
    /// Fails with [`NeoError::FileNotFound`] before reading anything if
    /// either file is missing.
    pub fn from_files(files: &DataFiles, config: &LoadConfig) -> NeoResult<Self> {
        if let Some(missing) = files.missing_files().first() {
            return Err(NeoError::FileNotFound {
                path: missing.display().to_string(),
            });
        }

        let neos = load_neos(&files.neos_file, config)?;

        #[cfg(feature = "parallel")]
        let approaches = load_approaches_parallel(&files.approaches_file, config)?;
        #[cfg(not(feature = "parallel"))]
        let approaches = load_approaches(&files.approaches_file, config)?;

        Ok(Self::new(neos, approaches))
    }

    // Lookups

    /// Finds an object by primary designation. Exact, case-sensitive match.
    pub fn get_neo_by_designation(&self, designation: &str) -> Option<&NearEarthObject> {
        self.by_designation
            .get(designation)
            .map(|id| &self.neos[id.index()])
    }

    /// Finds an object by name. Exact match; a blank name never matches.
    pub fn get_neo_by_name(&self, name: &str) -> Option<&NearEarthObject> {
        self.by_name.get(name).map(|id| &self.neos[id.index()])
    }

    /// Returns the object stored at `id`.
    pub fn neo(&self, id: NeoId) -> Option<&NearEarthObject> {
        self.neos.get(id.index())
    }

    /// Returns the approach stored at `id`.
    pub fn approach(&self, id: ApproachId) -> Option<&CloseApproach> {
        self.approaches.get(id.index())
    }

    /// Returns the object an approach was linked to.
    pub fn neo_for(&self, approach: &CloseApproach) -> Option<&NearEarthObject> {
        approach.neo.and_then(|id| self.neo(id))
    }

    /// Returns the approaches linked to `neo`, in load order.
    pub fn approaches_for<'a>(
        &'a self,
        neo: &'a NearEarthObject,
    ) -> impl Iterator<Item = LinkedApproach<'a>> + 'a {
        neo.approaches
            .iter()
            .filter_map(move |&id| self.approach(id))
            .map(move |approach| LinkedApproach::resolve(approach, &self.neos))
    }

    // Queries

    /// Lazily yields the approaches accepted by every filter, in load order.
    ///
    /// An empty filter slice yields every approach. Filters are evaluated
    /// in the given order and evaluation stops at the first rejection.
    pub fn query<'db, 'f, F: ApproachFilter>(&'db self, filters: &'f [F]) -> Query<'db, 'f, F> {
        Query::new(&self.approaches, &self.neos, filters)
    }

    // Statistics

    /// Returns all objects, in load order.
    pub fn neos(&self) -> &[NearEarthObject] {
        &self.neos
    }

    /// Returns all approaches, in load order.
    pub fn approaches(&self) -> &[CloseApproach] {
        &self.approaches
    }

    /// Returns the number of objects.
    pub fn neo_count(&self) -> usize {
        self.neos.len()
    }

    /// Returns the number of approaches.
    pub fn approach_count(&self) -> usize {
        self.approaches.len()
    }

    /// Returns the number of approaches that matched no object.
    pub fn unlinked_count(&self) -> usize {
        self.approaches.iter().filter(|a| a.neo.is_none()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neo_types::time::parse_approach_time;

    type Predicate = fn(&LinkedApproach<'_>) -> bool;

    const NO_FILTERS: [Predicate; 0] = [];

    fn make_approach(designation: &str, time: &str, distance: f64, velocity: f64) -> CloseApproach {
        CloseApproach::new(designation, parse_approach_time(time).unwrap(), distance, velocity)
    }

    /// The two-approach example: one linked to Alice, one orphan.
    fn example_db() -> NeoDatabase {
        let neos = vec![NearEarthObject::new("2020 FK", Some("Alice"), f64::NAN, true)];
        let approaches = vec![
            make_approach("2020 FK", "2020-Jan-01 12:30", 0.25, 56.78),
            make_approach("1999 XX", "2019-Jun-05 00:00", 0.10, 10.0),
        ];
        NeoDatabase::new(neos, approaches)
    }

    fn larger_db() -> NeoDatabase {
        let neos = vec![
            NearEarthObject::new("433", Some("Eros"), 16.84, false),
            NearEarthObject::new("719", Some("Albert"), f64::NAN, false),
            NearEarthObject::new("2020 FK", None, 0.1, true),
        ];
        let approaches = vec![
            make_approach("433", "1900-Jan-01 00:11", 0.3, 5.0),
            make_approach("2020 FK", "1901-Feb-02 01:00", 0.05, 20.0),
            make_approach("nope", "1902-Mar-03 02:00", 0.01, 30.0),
            make_approach("433", "1903-Apr-04 03:00", 0.2, 6.0),
            make_approach("2020 FK", "1904-May-05 04:00", 0.4, 21.0),
            make_approach("433", "1905-Jun-06 05:00", 0.15, 7.0),
        ];
        NeoDatabase::new(neos, approaches)
    }

    fn distances<'a>(iter: impl Iterator<Item = LinkedApproach<'a>>) -> Vec<f64> {
        iter.map(|a| a.distance).collect()
    }

    #[test]
    fn test_example_database() {
        let db = example_db();

        let alice = db.get_neo_by_designation("2020 FK").unwrap();
        assert_eq!(alice.name.as_deref(), Some("Alice"));
        assert_eq!(alice.approaches.len(), 1);
        assert!(db.get_neo_by_name("Alice").is_some());

        let orphan = &db.approaches()[1];
        assert_eq!(orphan.designation, "1999 XX");
        assert!(orphan.neo.is_none());
        assert_eq!(db.unlinked_count(), 1);

        let all: Vec<_> = db.query(&NO_FILTERS).map(|a| a.designation.clone()).collect();
        assert_eq!(all, vec!["2020 FK", "1999 XX"]);

        let close: [Predicate; 1] = [|a| a.distance < 0.2];
        let results: Vec<_> = db.query(&close).collect();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].designation, "1999 XX");
        assert!(results[0].neo().is_none());
    }

    #[test]
    fn test_lookup_by_designation_covers_every_neo() {
        let db = larger_db();
        for neo in db.neos() {
            let found = db.get_neo_by_designation(&neo.designation).unwrap();
            assert!(std::ptr::eq(found, neo));
        }
        assert!(db.get_neo_by_designation("2020 fk").is_none());
        assert!(db.get_neo_by_designation(" 433").is_none());
        assert!(db.get_neo_by_designation("").is_none());
    }

    #[test]
    fn test_lookup_by_name() {
        let db = larger_db();
        assert_eq!(db.get_neo_by_name("Eros").unwrap().designation, "433");
        assert_eq!(db.get_neo_by_name("Albert").unwrap().designation, "719");
        assert!(db.get_neo_by_name("eros").is_none());
        assert!(db.get_neo_by_name("").is_none());
    }

    #[test]
    fn test_blank_name_never_indexed() {
        let mut empty = NearEarthObject::new("1", None, 1.0, false);
        empty.name = Some(String::new());
        let mut spaces = NearEarthObject::new("2", None, 1.0, false);
        spaces.name = Some("   ".to_string());

        let db = NeoDatabase::new(vec![empty, spaces], vec![]);
        assert!(db.get_neo_by_name("").is_none());
        assert!(db.get_neo_by_name("   ").is_none());
        assert!(db.get_neo_by_designation("1").is_some());
        assert!(db.get_neo_by_designation("2").is_some());
    }

    #[test]
    fn test_deserialized_blank_names_are_unnamed() {
        let neos: Vec<NearEarthObject> = serde_json::from_str(
            r#"[
                {"designation":"1","name":"   ","diameter":1.0,"hazardous":false},
                {"designation":"2","name":"","diameter":null,"hazardous":false}
            ]"#,
        )
        .unwrap();

        let db = NeoDatabase::new(neos, vec![]);
        assert!(db.get_neo_by_name("   ").is_none());
        assert!(db.get_neo_by_name("").is_none());
        assert_eq!(db.get_neo_by_designation("1").unwrap().name, None);
        assert_eq!(db.get_neo_by_designation("2").unwrap().fullname(), "2");
    }

    #[test]
    fn test_links_are_bidirectional_and_ordered() {
        let db = larger_db();

        let eros = db.get_neo_by_designation("433").unwrap();
        let ids: Vec<usize> = eros.approaches.iter().map(|id| id.index()).collect();
        assert_eq!(ids, vec![0, 3, 5]);
        assert_eq!(distances(db.approaches_for(eros)), vec![0.3, 0.2, 0.15]);

        for (index, approach) in db.approaches().iter().enumerate() {
            match db.neo_for(approach) {
                Some(neo) => {
                    assert_eq!(neo.designation, approach.designation);
                    let owned = neo
                        .approaches
                        .iter()
                        .filter(|id| id.index() == index)
                        .count();
                    assert_eq!(owned, 1);
                }
                None => {
                    assert!(db
                        .neos()
                        .iter()
                        .all(|n| n.approaches.iter().all(|id| id.index() != index)));
                }
            }
        }

        let albert = db.get_neo_by_name("Albert").unwrap();
        assert!(albert.approaches.is_empty());
    }

    #[test]
    fn test_existing_links_are_replaced() {
        let mut neo = NearEarthObject::new("433", None, 1.0, false);
        neo.approaches.push(ApproachId::new(42));
        let mut approach = make_approach("missing", "2000-Jan-01 00:00", 0.1, 1.0);
        approach.neo = Some(NeoId::new(0));

        let db = NeoDatabase::new(vec![neo], vec![approach]);
        assert!(db.neos()[0].approaches.is_empty());
        assert!(db.approaches()[0].neo.is_none());
    }

    #[test]
    fn test_duplicate_keys_last_wins() {
        let neos = vec![
            NearEarthObject::new("1", Some("Twin"), 1.0, false),
            NearEarthObject::new("1", Some("First"), 2.0, false),
            NearEarthObject::new("2", Some("Twin"), 3.0, true),
        ];
        let approaches = vec![make_approach("1", "2000-Jan-01 00:00", 0.1, 1.0)];
        let db = NeoDatabase::new(neos, approaches);

        assert_eq!(db.get_neo_by_designation("1").unwrap().diameter, 2.0);
        assert_eq!(db.get_neo_by_name("Twin").unwrap().designation, "2");
        assert_eq!(db.get_neo_by_name("First").unwrap().diameter, 2.0);
        assert_eq!(db.neo_count(), 3);

        // approaches link to the object the designation index resolves to
        assert!(db.neos()[0].approaches.is_empty());
        assert_eq!(db.neos()[1].approaches.len(), 1);
    }

    #[test]
    fn test_query_without_filters_yields_everything_in_order() {
        let db = larger_db();
        let results: Vec<_> = db.query(&NO_FILTERS).collect();
        assert_eq!(results.len(), db.approach_count());
        for (linked, stored) in results.iter().zip(db.approaches()) {
            assert!(std::ptr::eq(linked.approach(), stored));
        }
    }

    #[test]
    fn test_query_rejecting_everything() {
        let db = larger_db();
        let never: [Predicate; 1] = [|_| false];
        assert_eq!(db.query(&never).count(), 0);
    }

    #[test]
    fn test_query_is_intersection() {
        let db = larger_db();
        let close: [Predicate; 1] = [|a| a.distance < 0.25];
        let fast: [Predicate; 1] = [|a| a.velocity > 6.5];
        let both: [Predicate; 2] = [close[0], fast[0]];

        let close_hits: Vec<_> = db.query(&close).collect();
        let fast_hits: Vec<_> = db.query(&fast).collect();
        let expected: Vec<_> = close_hits
            .iter()
            .filter(|a| fast_hits.contains(a))
            .copied()
            .collect();

        let combined: Vec<_> = db.query(&both).collect();
        assert_eq!(combined, expected);
        assert_eq!(distances(combined.into_iter()), vec![0.05, 0.01, 0.15]);
    }

    #[test]
    fn test_query_is_idempotent() {
        let db = larger_db();
        let filters: [Predicate; 1] = [|a| a.neo().is_some_and(|n| n.hazardous)];

        let first: Vec<_> = db.query(&filters).collect();
        let second: Vec<_> = db.query(&filters).collect();
        assert_eq!(first, second);
        assert_eq!(distances(first.into_iter()), vec![0.05, 0.4]);
    }

    #[test]
    fn test_query_can_stop_early() {
        let db = larger_db();
        let mut query = db.query(&NO_FILTERS);
        assert_eq!(query.next().map(|a| a.distance), Some(0.3));
        drop(query);
        assert_eq!(db.query(&NO_FILTERS).take(2).count(), 2);
    }

    #[test]
    fn test_from_files() {
        let dir = std::env::temp_dir().join(format!("neo-database-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let files = DataFiles::new(dir.join("neos.csv"), dir.join("cad.json"));
        std::fs::write(
            &files.neos_file,
            "pdes,name,diameter,pha\n433,Eros,16.84,N\n2020 FK,,,Y\n",
        )
        .unwrap();

        let err = NeoDatabase::from_files(&files, &LoadConfig::default()).unwrap_err();
        assert!(matches!(err, NeoError::FileNotFound { ref path } if path.ends_with("cad.json")));

        std::fs::write(
            &files.approaches_file,
            r#"{"fields": ["des", "cd", "dist", "v_rel"],
                "data": [["433", "1900-Jan-01 00:11", "0.3", "5.0"],
                         ["2020 FK", "1901-Feb-02 01:00", "0.05", "20.0"],
                         ["433", "1903-Apr-04 03:00", "0.2", "6.0"]]}"#,
        )
        .unwrap();

        let db = NeoDatabase::from_files(&files, &LoadConfig::default()).unwrap();
        assert_eq!(db.neo_count(), 2);
        assert_eq!(db.approach_count(), 3);
        assert_eq!(db.unlinked_count(), 0);
        assert_eq!(db.get_neo_by_name("Eros").unwrap().approaches.len(), 2);
        assert_eq!(distances(db.query(&NO_FILTERS)), vec![0.3, 0.05, 0.2]);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_database_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<NeoDatabase>();
    }
}
