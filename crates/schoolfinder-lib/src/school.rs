//! School record types and input validation.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::geo::Coordinates;
use crate::store::SchoolStore;

/// Store-generated identifier for a school record.
pub type SchoolId = i64;

/// A persisted school record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct School {
    pub id: SchoolId,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl School {
    /// Raw position of the record.
    ///
    /// Rows are validated on the way in, so the pair is not re-checked here.
    pub fn position(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }
}

/// A validated school that has not been persisted yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSchool {
    name: String,
    address: String,
    location: Coordinates,
}

impl NewSchool {
    /// Validate the raw fields of a school.
    ///
    /// `name` and `address` are trimmed and must not be empty afterwards;
    /// the coordinates must be finite and inside their geographic ranges.
    pub fn new(name: &str, address: &str, latitude: f64, longitude: f64) -> Result<Self> {
        let name = required_text("name", name)?;
        let address = required_text("address", address)?;
        let location = Coordinates::new(latitude, longitude)?;
        Ok(Self {
            name,
            address,
            location,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn location(&self) -> Coordinates {
        self.location
    }
}

fn required_text(field: &'static str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::invalid(field, "is required and cannot be empty"));
    }
    Ok(trimmed.to_string())
}

/// Parse a textual coordinate component.
///
/// Leading and trailing whitespace is ignored. Empty or non-numeric text is
/// rejected; range checks happen in [`Coordinates::new`].
pub fn parse_coordinate(field: &'static str, raw: &str) -> Result<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(Error::invalid(field, "is required and cannot be empty"));
    }
    trimmed
        .parse::<f64>()
        .map_err(|_| Error::invalid(field, format!("'{trimmed}' is not a number")))
}

/// Persist a validated school, returning its generated identifier.
///
/// Validation happens when the [`NewSchool`] is built, so a value that reaches
/// this point is always written.
pub fn register_school(store: &dyn SchoolStore, school: &NewSchool) -> Result<SchoolId> {
    let id = store.add_school(school)?;
    debug!(id, name = %school.name(), "school registered");
    Ok(id)
}
