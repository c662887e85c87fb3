//! Application state for the HTTP service.
//!
//! This module provides the shared state structure that axum handlers use to
//! reach the injected school store.

use std::path::Path;
use std::sync::Arc;

use schoolfinder_lib::{Error as LibError, Result as LibResult, SchoolStore, SqliteSchoolStore};

/// Database path that selects an ephemeral in-memory store.
pub const IN_MEMORY_DATABASE: &str = ":memory:";

/// Error during application state initialization.
#[derive(Debug)]
pub enum AppStateError {
    /// Failed to open or bootstrap the school database.
    StoreOpen(LibError),
}

impl std::fmt::Display for AppStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StoreOpen(e) => write!(f, "failed to open school store: {}", e),
        }
    }
}

impl std::error::Error for AppStateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::StoreOpen(e) => Some(e),
        }
    }
}

impl From<LibError> for AppStateError {
    fn from(err: LibError) -> Self {
        Self::StoreOpen(err)
    }
}

/// Shared application state for all axum handlers.
///
/// This struct is cheaply cloneable (using `Arc` internally) and should be
/// shared via axum's `State` extractor.
///
/// # Example
///
/// ```ignore
/// use axum::{Router, routing::get, extract::State};
/// use schoolfinder_service_shared::AppState;
///
/// async fn handler(State(state): State<AppState>) {
///     let count = state.with_store(|store| store.count_schools()).await;
/// }
///
/// let state = AppState::open("schools.db").unwrap();
/// let app = Router::new()
///     .route("/api/schools", get(handler))
///     .with_state(state);
/// ```
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Arc<dyn SchoolStore>,
}

impl AppState {
    /// Open the SQLite store at `db_path`.
    ///
    /// The special path `:memory:` opens an in-memory database instead of a
    /// file. A missing file is created along with its `schools` table.
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self, AppStateError> {
        let db_path = db_path.as_ref();

        let store = if db_path.as_os_str() == IN_MEMORY_DATABASE {
            tracing::info!("opening in-memory school store");
            SqliteSchoolStore::open_in_memory()?
        } else {
            tracing::info!(path = %db_path.display(), "opening school store");
            SqliteSchoolStore::open(db_path)?
        };

        Ok(Self::from_store(Arc::new(store)))
    }

    /// Create application state around an already constructed store.
    ///
    /// This is useful for testing or for alternative store implementations.
    pub fn from_store(store: Arc<dyn SchoolStore>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { store }),
        }
    }

    /// Access the injected store.
    pub fn store(&self) -> &dyn SchoolStore {
        self.inner.store.as_ref()
    }

    /// Run a store operation on the blocking thread pool.
    ///
    /// Store calls perform synchronous SQLite I/O, so handlers route them
    /// through here instead of calling [`AppState::store`] on the runtime.
    pub async fn with_store<T, F>(&self, op: F) -> LibResult<T>
    where
        F: FnOnce(&dyn SchoolStore) -> LibResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.inner.store);
        tokio::task::spawn_blocking(move || op(store.as_ref()))
            .await
            .map_err(|e| LibError::StorageUnavailable(format!("store task failed: {}", e)))?
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
