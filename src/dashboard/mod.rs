//! Dashboard - HTTP surface of the hub
//!
//! Provides:
//! - Project hub list and detail pages
//! - Quick log page
//! - JSON API for build logs, projects and editor launches

pub mod api;
pub mod routes;

use std::path::Path;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::error::StorageError;
use crate::launcher::Launcher;
use crate::models::DeviceType;
use crate::storage::HubDb;

/// State shared across handlers
pub struct AppState {
    /// `None` when no database is configured
    pub db: Option<Arc<HubDb>>,
    pub device_type: DeviceType,
    pub launcher: Launcher,
}

impl AppState {
    pub fn new(db: Option<Arc<HubDb>>, device_type: DeviceType, launcher: Launcher) -> Self {
        Self {
            db,
            device_type,
            launcher,
        }
    }

    pub fn db(&self) -> Result<&HubDb, StorageError> {
        self.db.as_deref().ok_or(StorageError::NotConfigured)
    }
}

pub type SharedState = Arc<AppState>;

/// Create the dashboard router
pub fn create_router(state: SharedState, static_dir: &Path) -> Router {
    Router::new()
        // Pages
        .route("/", get(routes::index))
        .route("/hub", get(routes::hub_page))
        .route("/hub/:id", get(routes::project_page))
        .route("/quick-log", get(routes::quick_log_page))
        // Build log API
        .route("/api/log", post(api::api_log))
        .route("/api/logs", get(api::api_recent_logs))
        // Project API
        .route("/api/projects", get(api::api_list_projects))
        .route("/api/projects/:id", get(api::api_get_project))
        // Launch API
        .route("/api/launch-cursor", post(api::api_launch))
        .route("/api/launches", get(api::api_list_launches))
        .route("/api/launches/:id", get(api::api_get_launch))
        // Health check
        .route("/health", get(routes::health))
        // Static files
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
