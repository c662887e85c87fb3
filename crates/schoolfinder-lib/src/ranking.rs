//! Proximity ranking of school records.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::geo::{distance_km, Coordinates};
use crate::school::School;
use crate::store::SchoolStore;

/// A school decorated with its distance from a query origin.
///
/// Serializes as the school's own fields plus `distance` (kilometres).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedSchool {
    #[serde(flatten)]
    pub school: School,
    pub distance: f64,
}

/// Decorate each record with its distance from `origin` and sort ascending.
///
/// The sort is stable, so records at equal distance keep their input order.
pub fn rank_by_distance(origin: Coordinates, schools: Vec<School>) -> Vec<RankedSchool> {
    let mut ranked: Vec<RankedSchool> = schools
        .into_iter()
        .map(|school| {
            let (latitude, longitude) = school.position();
            let distance = distance_km(origin.latitude(), origin.longitude(), latitude, longitude);
            RankedSchool { school, distance }
        })
        .collect();

    ranked.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    ranked
}

/// Load every school from `store` and rank it by distance from `origin`.
pub fn schools_near(store: &dyn SchoolStore, origin: Coordinates) -> Result<Vec<RankedSchool>> {
    let schools = store.list_schools()?;
    let ranked = rank_by_distance(origin, schools);
    debug!(
        latitude = origin.latitude(),
        longitude = origin.longitude(),
        count = ranked.len(),
        "schools ranked by distance"
    );
    Ok(ranked)
}
