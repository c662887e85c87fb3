//! SchoolFinder library entry points.
//!
//! This crate owns the school record model, input validation, the SQLite
//! backed record store and the haversine distance ranking. Higher-level
//! consumers (the HTTP service) should only depend on the functions exported
//! here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod error;
pub mod geo;
pub mod ranking;
pub mod school;
pub mod store;

pub use error::{Error, Result};
pub use geo::{distance_km, Coordinates, EARTH_RADIUS_KM};
pub use ranking::{rank_by_distance, schools_near, RankedSchool};
pub use school::{parse_coordinate, register_school, NewSchool, School, SchoolId};
pub use store::{SchoolStore, SqliteSchoolStore};
