//! Record store contract and its SQLite implementation.
//!
//! The store trusts its caller: [`NewSchool`] values are validated on
//! construction, so inserts perform no further checks. Reads return rows in
//! insertion order (`ORDER BY id`), which callers must not rely on beyond
//! tie-breaking.

use std::fmt;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use rusqlite::{params, Connection, Row};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::school::{NewSchool, School, SchoolId};

const CREATE_SCHOOLS_TABLE: &str = "CREATE TABLE IF NOT EXISTS schools (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    name      TEXT    NOT NULL,
    address   TEXT    NOT NULL,
    latitude  REAL    NOT NULL,
    longitude REAL    NOT NULL
)";

const INSERT_SCHOOL: &str =
    "INSERT INTO schools (name, address, latitude, longitude) VALUES (?1, ?2, ?3, ?4)";

const SELECT_SCHOOLS: &str =
    "SELECT id, name, address, latitude, longitude FROM schools ORDER BY id";

/// Persistence interface for school records.
///
/// Implementations must be shareable across request handlers; any locking
/// they need is their own concern.
pub trait SchoolStore: Send + Sync {
    /// Persist a validated school and return its generated identifier.
    fn add_school(&self, school: &NewSchool) -> Result<SchoolId>;

    /// Return every persisted school. Ordering is not part of the contract.
    fn list_schools(&self) -> Result<Vec<School>>;

    /// Number of persisted schools.
    fn count_schools(&self) -> Result<usize>;
}

/// SQLite-backed school store over a single connection.
pub struct SqliteSchoolStore {
    conn: Mutex<Connection>,
}

impl SqliteSchoolStore {
    /// Open (or create) a database file and make sure the `schools` table exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|source| Error::DatabaseOpen {
            path: path.to_path_buf(),
            source,
        })?;
        conn.execute_batch(CREATE_SCHOOLS_TABLE)
            .map_err(|source| Error::DatabaseOpen {
                path: path.to_path_buf(),
                source,
            })?;
        info!(path = %path.display(), "school database opened");
        Ok(Self::from_connection(conn))
    }

    /// Open an ephemeral in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(CREATE_SCHOOLS_TABLE)?;
        debug!("in-memory school database opened");
        Ok(Self::from_connection(conn))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Lock the connection, taking over a lock poisoned by a panicked holder.
    /// The connection stays usable; statements it had open were dropped.
    fn connection(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|poisoned| {
            warn!("school database lock was poisoned, recovering connection");
            self.conn.clear_poison();
            PoisonError::into_inner(poisoned)
        })
    }
}

impl SchoolStore for SqliteSchoolStore {
    fn add_school(&self, school: &NewSchool) -> Result<SchoolId> {
        let conn = self.connection();
        let location = school.location();
        conn.execute(
            INSERT_SCHOOL,
            params![
                school.name(),
                school.address(),
                location.latitude(),
                location.longitude()
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn list_schools(&self) -> Result<Vec<School>> {
        let conn = self.connection();
        let mut stmt = conn.prepare_cached(SELECT_SCHOOLS)?;
        let rows = stmt.query_map([], school_from_row)?;
        let schools = rows.collect::<std::result::Result<Vec<_>, _>>()?;
        debug!(count = schools.len(), "schools loaded");
        Ok(schools)
    }

    fn count_schools(&self) -> Result<usize> {
        let conn = self.connection();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM schools", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or(0))
    }
}

impl fmt::Debug for SqliteSchoolStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteSchoolStore").finish_non_exhaustive()
    }
}

fn school_from_row(row: &Row<'_>) -> rusqlite::Result<School> {
    Ok(School {
        id: row.get(0)?,
        name: row.get(1)?,
        address: row.get(2)?,
        latitude: row.get(3)?,
        longitude: row.get(4)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn school(name: &str, lat: f64, lon: f64) -> NewSchool {
        NewSchool::new(name, "1 Main St", lat, lon).unwrap()
    }

    #[test]
    fn insert_returns_increasing_ids() {
        let store = SqliteSchoolStore::open_in_memory().unwrap();
        let first = store.add_school(&school("A", 0.0, 0.0)).unwrap();
        let second = store.add_school(&school("B", 1.0, 1.0)).unwrap();
        assert!(second > first);
    }

    #[test]
    fn list_returns_inserted_rows() {
        let store = SqliteSchoolStore::open_in_memory().unwrap();
        let id = store.add_school(&school("A", 12.5, -7.25)).unwrap();

        let schools = store.list_schools().unwrap();
        assert_eq!(
            schools,
            vec![School {
                id,
                name: "A".to_string(),
                address: "1 Main St".to_string(),
                latitude: 12.5,
                longitude: -7.25,
            }]
        );
    }

    #[test]
    fn empty_store_lists_nothing() {
        let store = SqliteSchoolStore::open_in_memory().unwrap();
        assert!(store.list_schools().unwrap().is_empty());
        assert_eq!(store.count_schools().unwrap(), 0);
    }

    #[test]
    fn count_tracks_inserts() {
        let store = SqliteSchoolStore::open_in_memory().unwrap();
        store.add_school(&school("A", 0.0, 0.0)).unwrap();
        store.add_school(&school("B", 0.0, 0.0)).unwrap();
        assert_eq!(store.count_schools().unwrap(), 2);
    }

    #[test]
    fn open_missing_directory_fails() {
        let err = SqliteSchoolStore::open("/nonexistent/dir/schools.db").unwrap_err();
        assert!(matches!(err, Error::DatabaseOpen { .. }));
        assert!(err.is_storage());
        assert!(err.to_string().contains("/nonexistent/dir/schools.db"));
    }

    #[test]
    fn panicked_writer_does_not_disable_store() {
        let store = SqliteSchoolStore::open_in_memory().unwrap();
        store.add_school(&school("Before", 0.0, 0.0)).unwrap();

        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = store.conn.lock().unwrap();
            panic!("writer panicked while holding the connection");
        }));
        assert!(outcome.is_err());
        assert!(store.conn.is_poisoned());

        store.add_school(&school("After", 1.0, 1.0)).unwrap();
        let names: Vec<String> = store
            .list_schools()
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Before", "After"]);
        assert_eq!(store.count_schools().unwrap(), 2);
        assert!(!store.conn.is_poisoned());
    }

    #[test]
    fn debug_output_hides_connection() {
        let store = SqliteSchoolStore::open_in_memory().unwrap();
        assert!(format!("{:?}", store).contains("SqliteSchoolStore"));
    }
}
