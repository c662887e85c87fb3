//! Geographic coordinates and great-circle distance.

use serde::Serialize;

use crate::error::{Error, Result};

/// Mean Earth radius used by the haversine formula, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

const LATITUDE_LIMIT: f64 = 90.0;
const LONGITUDE_LIMIT: f64 = 180.0;

/// A validated latitude/longitude pair in decimal degrees.
///
/// Construct through [`Coordinates::new`], which guarantees both values are
/// finite and within `[-90, 90]` and `[-180, 180]` respectively.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    /// Validate and build a coordinate pair.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        Ok(Self {
            latitude: check_range("latitude", latitude, LATITUDE_LIMIT)?,
            longitude: check_range("longitude", longitude, LONGITUDE_LIMIT)?,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to another point, in kilometres.
    pub fn distance_to(&self, other: &Self) -> f64 {
        distance_km(self.latitude, self.longitude, other.latitude, other.longitude)
    }
}

fn check_range(field: &'static str, value: f64, limit: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(Error::invalid(field, "must be a finite number"));
    }
    if !(-limit..=limit).contains(&value) {
        return Err(Error::invalid(
            field,
            format!("must be between -{limit} and {limit}"),
        ));
    }
    Ok(value)
}

/// Haversine distance between two points given in decimal degrees.
///
/// Treats the Earth as a sphere of radius [`EARTH_RADIUS_KM`]. The result is
/// symmetric in its two points and zero when they coincide.
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    // rounding can push `a` a hair past 1 for antipodal points
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}
