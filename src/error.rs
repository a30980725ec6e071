//! Error types for builder-hub

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage is not configured")]
    NotConfigured,

    #[error("{0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Invalid stored value: {0}")]
    InvalidRow(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// A request that failed validation. The message is shown to the user as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid request body")]
    InvalidBody,

    #[error("project is required")]
    ProjectRequired,

    #[error("stage must be one of: planning, dev, experiment, deploy")]
    InvalidStage,

    #[error("summary is required")]
    SummaryRequired,

    #[error("path required")]
    PathRequired,
}
