//! builder-hub: personal build journal and project hub
//!
//! A small local web service that records build-journal entries in SQLite,
//! lists tracked projects with their docs and progress, and opens a
//! project's folder in the configured editor.

pub mod client;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod forms;
pub mod intake;
pub mod launcher;
pub mod models;
pub mod server;
pub mod storage;
pub mod views;

pub use config::Config;
pub use error::{StorageError, ValidationError};
