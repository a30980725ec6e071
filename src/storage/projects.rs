//! `projects` table access (read only)

use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::StorageError;
use crate::models::Project;

// id is cast so rows written with integer ids still load
const SELECT_PROJECT: &str = "SELECT CAST(id AS TEXT) AS id, title, status, progress, \
     laptop_path, desktop_path, doc_url FROM projects";

fn from_row(row: &Row) -> Result<Project, rusqlite::Error> {
    Ok(Project {
        id: row.get("id")?,
        title: row.get("title")?,
        status: row.get("status")?,
        progress: row.get("progress")?,
        laptop_path: row.get("laptop_path")?,
        desktop_path: row.get("desktop_path")?,
        doc_url: row.get("doc_url")?,
    })
}

/// All projects ordered by title (NULL titles sort first).
pub fn list(conn: &Connection) -> Result<Vec<Project>, StorageError> {
    let mut stmt = conn.prepare(&format!("{SELECT_PROJECT} ORDER BY title ASC"))?;
    let rows = stmt.query_map([], from_row)?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

pub fn get(conn: &Connection, id: &str) -> Result<Option<Project>, StorageError> {
    let mut stmt = conn.prepare(&format!("{SELECT_PROJECT} WHERE id = ?1"))?;
    Ok(stmt.query_row(params![id], from_row).optional()?)
}
