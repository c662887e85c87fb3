//! Request types and validation for HTTP endpoints.

use serde::{Deserialize, Serialize};

use schoolfinder_lib::{parse_coordinate, Coordinates, NewSchool};

use crate::ApiError;

/// Validation trait for request types.
///
/// Implementations turn loosely typed wire input into the library's
/// validated types, or an `ApiError` describing the first bad field.
pub trait Validate {
    /// Validated form of the request.
    type Output;

    /// Validate the request, returning an error if invalid.
    ///
    /// The `request_id` is used to populate the `instance` field of any
    /// returned `ApiError`.
    ///
    /// Returns a boxed `ApiError` to avoid large `Result::Err` variants.
    fn validate(&self, request_id: &str) -> Result<Self::Output, Box<ApiError>>;
}

/// API operations, used for error mapping and metric labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    AddSchool,
    ListSchools,
}

impl Endpoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::AddSchool => "add_school",
            Endpoint::ListSchools => "list_schools",
        }
    }

    /// Build the 400 response for this endpoint.
    pub fn rejection(&self, detail: impl Into<String>, request_id: &str) -> ApiError {
        match self {
            Endpoint::AddSchool => ApiError::invalid_input(detail, request_id),
            Endpoint::ListSchools => ApiError::invalid_coordinates(detail, request_id),
        }
    }
}

/// A coordinate as it may appear in a JSON body: a number or numeric text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CoordinateInput {
    Number(f64),
    Text(String),
}

impl CoordinateInput {
    fn resolve(&self, field: &'static str) -> schoolfinder_lib::Result<f64> {
        match self {
            CoordinateInput::Number(value) => Ok(*value),
            CoordinateInput::Text(raw) => parse_coordinate(field, raw),
        }
    }
}

/// Body of `POST /api/schools`.
///
/// Every field is optional at the wire level so that missing fields are
/// reported through [`Validate`] rather than as a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddSchoolRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<CoordinateInput>,
    pub longitude: Option<CoordinateInput>,
}

impl Validate for AddSchoolRequest {
    type Output = NewSchool;

    fn validate(&self, request_id: &str) -> Result<NewSchool, Box<ApiError>> {
        let endpoint = Endpoint::AddSchool;
        let name = required(self.name.as_deref(), "name", endpoint, request_id)?;
        let address = required(self.address.as_deref(), "address", endpoint, request_id)?;
        let latitude = coordinate(self.latitude.as_ref(), "latitude", endpoint, request_id)?;
        let longitude = coordinate(self.longitude.as_ref(), "longitude", endpoint, request_id)?;

        NewSchool::new(name, address, latitude, longitude)
            .map_err(|e| Box::new(ApiError::from_lib_error(&e, endpoint, request_id)))
    }
}

/// Query string of `GET /api/schools`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListSchoolsQuery {
    pub latitude: Option<String>,
    pub longitude: Option<String>,
}

impl Validate for ListSchoolsQuery {
    type Output = Coordinates;

    fn validate(&self, request_id: &str) -> Result<Coordinates, Box<ApiError>> {
        let endpoint = Endpoint::ListSchools;
        let latitude = required(self.latitude.as_deref(), "latitude", endpoint, request_id)?;
        let longitude = required(self.longitude.as_deref(), "longitude", endpoint, request_id)?;

        let parse = || -> schoolfinder_lib::Result<Coordinates> {
            let lat = parse_coordinate("latitude", latitude)?;
            let lon = parse_coordinate("longitude", longitude)?;
            Coordinates::new(lat, lon)
        };
        parse().map_err(|e| Box::new(ApiError::from_lib_error(&e, endpoint, request_id)))
    }
}

fn required<'a>(
    value: Option<&'a str>,
    field: &str,
    endpoint: Endpoint,
    request_id: &str,
) -> Result<&'a str, Box<ApiError>> {
    value.ok_or_else(|| {
        Box::new(endpoint.rejection(
            format!("The '{}' field is required", field),
            request_id,
        ))
    })
}

fn coordinate(
    value: Option<&CoordinateInput>,
    field: &'static str,
    endpoint: Endpoint,
    request_id: &str,
) -> Result<f64, Box<ApiError>> {
    let value = value.ok_or_else(|| {
        Box::new(endpoint.rejection(
            format!("The '{}' field is required", field),
            request_id,
        ))
    })?;
    value
        .resolve(field)
        .map_err(|e| Box::new(ApiError::from_lib_error(&e, endpoint, request_id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{MESSAGE_INVALID_COORDINATES, MESSAGE_INVALID_INPUT};

    fn add_request(json: &str) -> AddSchoolRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_add_request_valid_numbers() {
        let req = add_request(
            r#"{"name":"A","address":"1 Main St","latitude":0,"longitude":-12.5}"#,
        );
        let school = req.validate("test").unwrap();
        assert_eq!(school.name(), "A");
        assert_eq!(school.location().longitude(), -12.5);
    }

    #[test]
    fn test_add_request_accepts_numeric_text() {
        let req = add_request(
            r#"{"name":"A","address":"B","latitude":" 45.5 ","longitude":"-3"}"#,
        );
        let school = req.validate("test").unwrap();
        assert_eq!(school.location().latitude(), 45.5);
        assert_eq!(school.location().longitude(), -3.0);
    }

    #[test]
    fn test_add_request_rejects_text_latitude() {
        let req = add_request(r#"{"name":"A","address":"B","latitude":"abc","longitude":0}"#);
        let err = req.validate("test").unwrap_err();
        assert_eq!(err.message, MESSAGE_INVALID_INPUT);
        assert!(err.detail.as_deref().unwrap().contains("latitude"));
    }

    #[test]
    fn test_add_request_missing_name() {
        let req = add_request(r#"{"address":"B","latitude":1,"longitude":2}"#);
        let err = req.validate("test").unwrap_err();
        assert!(err.detail.as_deref().unwrap().contains("'name'"));
    }

    #[test]
    fn test_add_request_blank_address() {
        let req = add_request(r#"{"name":"A","address":"  ","latitude":1,"longitude":2}"#);
        let err = req.validate("test").unwrap_err();
        assert_eq!(err.message, MESSAGE_INVALID_INPUT);
        assert!(err.detail.as_deref().unwrap().contains("address"));
    }

    #[test]
    fn test_add_request_null_longitude() {
        let req = add_request(r#"{"name":"A","address":"B","latitude":1,"longitude":null}"#);
        let err = req.validate("test").unwrap_err();
        assert!(err.detail.as_deref().unwrap().contains("'longitude'"));
    }

    #[test]
    fn test_add_request_out_of_range() {
        let req = add_request(r#"{"name":"A","address":"B","latitude":1,"longitude":181}"#);
        assert!(req.validate("test").is_err());
    }

    #[test]
    fn test_add_request_rejects_boolean_coordinate_at_parse() {
        let result: Result<AddSchoolRequest, _> =
            serde_json::from_str(r#"{"name":"A","address":"B","latitude":true,"longitude":1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_list_query_valid() {
        let query = ListSchoolsQuery {
            latitude: Some("12.97".to_string()),
            longitude: Some("77.59".to_string()),
        };
        let origin = query.validate("test").unwrap();
        assert_eq!(origin.latitude(), 12.97);
        assert_eq!(origin.longitude(), 77.59);
    }

    #[test]
    fn test_list_query_missing_longitude() {
        let query = ListSchoolsQuery {
            latitude: Some("0".to_string()),
            longitude: None,
        };
        let err = query.validate("test").unwrap_err();
        assert_eq!(err.message, MESSAGE_INVALID_COORDINATES);
        assert!(err.detail.as_deref().unwrap().contains("'longitude'"));
    }

    #[test]
    fn test_list_query_non_numeric() {
        let query = ListSchoolsQuery {
            latitude: Some("north".to_string()),
            longitude: Some("1".to_string()),
        };
        let err = query.validate("test").unwrap_err();
        assert_eq!(err.message, MESSAGE_INVALID_COORDINATES);
    }

    #[test]
    fn test_list_query_out_of_range() {
        let query = ListSchoolsQuery {
            latitude: Some("-91".to_string()),
            longitude: Some("0".to_string()),
        };
        let err = query.validate("test").unwrap_err();
        assert_eq!(err.message, MESSAGE_INVALID_COORDINATES);
    }

    #[test]
    fn test_endpoint_labels() {
        assert_eq!(Endpoint::AddSchool.as_str(), "add_school");
        assert_eq!(Endpoint::ListSchools.as_str(), "list_schools");
    }
}
