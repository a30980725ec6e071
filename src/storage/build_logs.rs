//! `build_logs` table access

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, Row};
use tracing::debug;

use crate::error::StorageError;
use crate::models::{BuildLogEntry, NewBuildLog, Stage};

/// Insert a validated entry and return its row id.
pub fn insert(conn: &Connection, log: &NewBuildLog) -> Result<i64, StorageError> {
    let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    conn.execute(
        "INSERT INTO build_logs (project, stage, summary, energy_level, leverage_score, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            log.project,
            log.stage.as_str(),
            log.summary,
            log.energy_level,
            log.leverage_score,
            created_at,
        ],
    )?;
    let id = conn.last_insert_rowid();
    debug!(id, project = %log.project, stage = %log.stage, "Inserted build log");
    Ok(id)
}

/// Most recent entries first.
pub fn recent(conn: &Connection, limit: u32) -> Result<Vec<BuildLogEntry>, StorageError> {
    let mut stmt = conn.prepare(
        "SELECT id, project, stage, summary, energy_level, leverage_score, created_at
         FROM build_logs ORDER BY id DESC LIMIT ?1",
    )?;
    let rows = stmt.query_map(params![limit], RawLog::from_row)?;

    rows.map(|row| row?.into_entry()).collect()
}

struct RawLog {
    id: i64,
    project: String,
    stage: String,
    summary: String,
    energy_level: Option<u8>,
    leverage_score: Option<u8>,
    created_at: String,
}

impl RawLog {
    fn from_row(row: &Row) -> Result<Self, rusqlite::Error> {
        Ok(Self {
            id: row.get("id")?,
            project: row.get("project")?,
            stage: row.get("stage")?,
            summary: row.get("summary")?,
            energy_level: row.get("energy_level")?,
            leverage_score: row.get("leverage_score")?,
            created_at: row.get("created_at")?,
        })
    }

    fn into_entry(self) -> Result<BuildLogEntry, StorageError> {
        let stage = Stage::parse(&self.stage)
            .ok_or_else(|| StorageError::InvalidRow(format!("unknown stage '{}'", self.stage)))?;
        let created_at = DateTime::parse_from_rfc3339(&self.created_at)
            .map_err(|e| StorageError::InvalidRow(format!("created_at: {}", e)))?
            .with_timezone(&Utc);

        Ok(BuildLogEntry {
            id: self.id,
            project: self.project,
            stage,
            summary: self.summary,
            energy_level: self.energy_level,
            leverage_score: self.leverage_score,
            created_at,
        })
    }
}
