//! Test utilities for handler testing.
//!
//! This module provides in-memory state, a store that always fails, and
//! helpers for seeding schools.

use std::sync::Arc;

use schoolfinder_lib::{
    Error as LibError, NewSchool, Result as LibResult, School, SchoolId, SchoolStore,
    SqliteSchoolStore,
};

use crate::state::AppState;

/// A store whose every operation fails with a storage error.
#[derive(Debug, Default)]
pub struct FailingStore;

impl SchoolStore for FailingStore {
    fn add_school(&self, _school: &NewSchool) -> LibResult<SchoolId> {
        Err(LibError::StorageUnavailable("insert refused".to_string()))
    }

    fn list_schools(&self) -> LibResult<Vec<School>> {
        Err(LibError::StorageUnavailable("select refused".to_string()))
    }

    fn count_schools(&self) -> LibResult<usize> {
        Err(LibError::StorageUnavailable("count refused".to_string()))
    }
}

/// Fresh state backed by an empty in-memory SQLite store.
///
/// # Panics
///
/// Panics if SQLite cannot open an in-memory database.
pub fn memory_state() -> AppState {
    let store = SqliteSchoolStore::open_in_memory()
        .unwrap_or_else(|e| panic!("failed to open in-memory store: {}", e));
    AppState::from_store(Arc::new(store))
}

/// State whose store rejects every call.
pub fn failing_state() -> AppState {
    AppState::from_store(Arc::new(FailingStore))
}

/// In-memory state pre-populated with `(name, latitude, longitude)` entries.
///
/// Addresses are derived from the names.
pub fn seeded_state(schools: &[(&str, f64, f64)]) -> AppState {
    let state = memory_state();
    for (name, latitude, longitude) in schools {
        let school = NewSchool::new(name, &format!("{} address", name), *latitude, *longitude)
            .unwrap_or_else(|e| panic!("invalid seed school {}: {}", name, e));
        state
            .store()
            .add_school(&school)
            .unwrap_or_else(|e| panic!("failed to seed {}: {}", name, e));
    }
    state
}

/// Generate a unique request ID for testing.
pub fn test_request_id() -> String {
    format!("test-{}", uuid::Uuid::now_v7())
}
