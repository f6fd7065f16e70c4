//! # neo-types
//!
//! Type definitions for near-Earth objects (NEOs) and their close approaches
//! to Earth.
//!
//! Objects and approaches are plain records. A database owns both
//! collections and links them through the arena identifiers [`NeoId`] and
//! [`ApproachId`]: an object lists the approaches it owns, and an approach
//! points back at its object without owning it.
//!
//! ## Features
//!
//! - `serde` (default): Enables serialization/deserialization support via serde.
//!
//! ## Usage
//!
//! ```rust
//! use neo_types::{CloseApproach, NearEarthObject};
//! use neo_types::time::parse_approach_time;
//!
//! let neo = NearEarthObject::new("2020 FK", Some("One REALLY BIG fake asteroid"), 12.345, true);
//! assert!(neo.hazardous);
//!
//! let time = parse_approach_time("2020-Jan-01 12:30").unwrap();
//! let approach = CloseApproach::new("2020 FK", time, 0.25, 56.78);
//! assert_eq!(approach.designation, neo.designation);
//! ```

#![warn(missing_docs)]

mod approach;
mod ids;
mod neo;
pub mod time;

// Re-export all public types at crate root
pub use approach::CloseApproach;
pub use ids::{ApproachId, NeoId};
pub use neo::NearEarthObject;
