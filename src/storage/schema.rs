//! Database schema definitions

use rusqlite::Connection;
use tracing::info;

use crate::error::StorageError;

/// Current schema version for migrations
pub const SCHEMA_VERSION: i32 = 1;

/// Initialize the database schema
pub fn init_schema(conn: &Connection) -> Result<(), StorageError> {
    let current_version = get_schema_version(conn)?;

    if current_version == 0 {
        info!("Creating new database schema v{}", SCHEMA_VERSION);
        conn.execute_batch(BUILD_LOGS_SCHEMA)?;
        conn.execute_batch(PROJECTS_SCHEMA)?;
        set_schema_version(conn, SCHEMA_VERSION)?;
    } else {
        info!("Database schema is up to date (v{})", current_version);
    }

    Ok(())
}

/// Get current schema version (0 if not initialized)
fn get_schema_version(conn: &Connection) -> Result<i32, StorageError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL)",
        [],
    )?;

    let version = conn
        .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| row.get(0))
        .unwrap_or(0);

    Ok(version)
}

fn set_schema_version(conn: &Connection, version: i32) -> Result<(), StorageError> {
    conn.execute("DELETE FROM schema_version", [])?;
    conn.execute("INSERT INTO schema_version (version) VALUES (?)", [version])?;
    Ok(())
}

const BUILD_LOGS_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS build_logs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    project TEXT NOT NULL,
    stage TEXT NOT NULL CHECK (stage IN ('planning', 'dev', 'experiment', 'deploy')),
    summary TEXT NOT NULL,
    energy_level INTEGER CHECK (energy_level BETWEEN 1 AND 5),
    leverage_score INTEGER CHECK (leverage_score BETWEEN 1 AND 5),
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_build_logs_project ON build_logs(project);
"#;

// Created here so a fresh database works out of the box; rows come from
// whatever tool owns the project list.
const PROJECTS_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS projects (
    id TEXT PRIMARY KEY NOT NULL,
    title TEXT,
    status TEXT,
    progress REAL,
    laptop_path TEXT,
    desktop_path TEXT,
    doc_url TEXT
);
"#;
