//! SQLite storage for build logs and projects
//!
//! ## Tables
//!
//! - `build_logs` - journal entries written by `POST /api/log` (insert only)
//! - `projects` - project cards shown by the hub (read only, maintained by
//!   external tools against the same file)

pub mod build_logs;
pub mod projects;
pub mod schema;

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;
use tracing::{debug, info};

use crate::error::StorageError;
use crate::models::{BuildLogEntry, NewBuildLog, Project};

/// SQLite database behind the hub
pub struct HubDb {
    conn: Mutex<Connection>,
}

impl HubDb {
    /// Open or create the database file, creating parent directories.
    pub fn open(db_path: &Path) -> Result<Self, StorageError> {
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        info!(path = %db_path.display(), "Opening SQLite database");

        let conn = Connection::open(db_path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

        Self::with_schema(conn)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self, StorageError> {
        debug!("Opening in-memory SQLite database");
        Self::with_schema(Connection::open_in_memory()?)
    }

    fn with_schema(conn: Connection) -> Result<Self, StorageError> {
        schema::init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run `f` with exclusive access to the connection.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|e| StorageError::Internal(format!("Lock poisoned: {}", e)))?;
        f(&conn)
    }

    pub fn insert_build_log(&self, log: &NewBuildLog) -> Result<i64, StorageError> {
        self.with_conn(|conn| build_logs::insert(conn, log))
    }

    pub fn recent_build_logs(&self, limit: u32) -> Result<Vec<BuildLogEntry>, StorageError> {
        self.with_conn(|conn| build_logs::recent(conn, limit))
    }

    pub fn list_projects(&self) -> Result<Vec<Project>, StorageError> {
        self.with_conn(projects::list)
    }

    pub fn get_project(&self, id: &str) -> Result<Option<Project>, StorageError> {
        self.with_conn(|conn| projects::get(conn, id))
    }
}
