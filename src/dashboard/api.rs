//! JSON API handlers
//!
//! Every failure answers with `{"error": "<message>"}` and a matching status.

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use uuid::Uuid;

use super::SharedState;
use crate::error::{StorageError, ValidationError};
use crate::intake;
use crate::launcher::{LaunchError, LaunchRecord, LaunchRequest};
use crate::models::{BuildLogEntry, Project};

const DEFAULT_LIST_LIMIT: usize = 20;
const MAX_LIST_LIMIT: usize = 200;

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<ValidationError> for ApiError {
    fn from(value: ValidationError) -> Self {
        Self::new(StatusCode::BAD_REQUEST, value.to_string())
    }
}

impl From<StorageError> for ApiError {
    fn from(value: StorageError) -> Self {
        if !matches!(value, StorageError::NotConfigured) {
            error!(error = %value, "Storage operation failed");
        }
        Self::internal(value.to_string())
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { error: &self.message })).into_response()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OkResponse {
    pub ok: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LaunchResponse {
    pub ok: bool,
    pub launch_id: Uuid,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub limit: Option<usize>,
}

impl ListParams {
    fn limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_LIST_LIMIT).clamp(1, MAX_LIST_LIMIT)
    }
}

// === Build logs ===

/// POST /api/log
pub async fn api_log(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<Json<OkResponse>, ApiError> {
    let log = intake::validate_body(&body)?;
    let id = state.db()?.insert_build_log(&log)?;

    info!(id, project = %log.project, stage = %log.stage, "Build log saved");
    Ok(Json(OkResponse { ok: true }))
}

/// GET /api/logs
pub async fn api_recent_logs(
    State(state): State<SharedState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<BuildLogEntry>>, ApiError> {
    let limit = params.limit() as u32;
    Ok(Json(state.db()?.recent_build_logs(limit)?))
}

// === Projects ===

/// GET /api/projects
pub async fn api_list_projects(
    State(state): State<SharedState>,
) -> Result<Json<Vec<Project>>, ApiError> {
    Ok(Json(state.db()?.list_projects()?))
}

/// GET /api/projects/:id
pub async fn api_get_project(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Project>, ApiError> {
    state
        .db()?
        .get_project(&id)?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("project not found"))
}

// === Launches ===

/// POST /api/launch-cursor
pub async fn api_launch(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<Json<LaunchResponse>, ApiError> {
    let request = LaunchRequest::from_body(&body).map_err(|e| {
        warn!(error = %e, "Unreadable launch request");
        ApiError::internal("Launch failed")
    })?;
    let path = request.validate()?;

    let launch_id = state.launcher.submit(&path).await.map_err(|e| match e {
        LaunchError::QueueFull => {
            ApiError::new(StatusCode::SERVICE_UNAVAILABLE, LaunchError::QueueFull.to_string())
        }
        other => {
            error!(error = %other, "Launch could not be queued");
            ApiError::internal("Launch failed")
        }
    })?;

    Ok(Json(LaunchResponse { ok: true, launch_id }))
}

/// GET /api/launches
pub async fn api_list_launches(
    State(state): State<SharedState>,
    Query(params): Query<ListParams>,
) -> Json<Vec<LaunchRecord>> {
    Json(state.launcher.recent(params.limit()).await)
}

/// GET /api/launches/:id
pub async fn api_get_launch(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<LaunchRecord>, ApiError> {
    let not_found = || ApiError::not_found("launch not found");
    let id = Uuid::parse_str(&id).map_err(|_| not_found())?;
    state.launcher.get(id).await.map(Json).ok_or_else(not_found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::config::LauncherConfig;
    use crate::dashboard::AppState;
    use crate::launcher::{LaunchCommand, Launcher, ProcessSpawner};
    use crate::models::DeviceType;
    use crate::storage::HubDb;

    struct NoopSpawner;

    #[async_trait::async_trait]
    impl ProcessSpawner for NoopSpawner {
        async fn run(&self, _command: &LaunchCommand) -> Result<(), LaunchError> {
            Ok(())
        }
    }

    fn state(with_db: bool) -> SharedState {
        let db = with_db.then(|| Arc::new(HubDb::open_in_memory().unwrap()));
        let launcher = Launcher::start(LauncherConfig::default(), Arc::new(NoopSpawner));
        Arc::new(AppState::new(db, DeviceType::Desktop, launcher))
    }

    fn body(json: &str) -> Bytes {
        Bytes::from(json.to_string())
    }

    #[tokio::test]
    async fn test_log_saved() {
        let state = state(true);
        let Json(resp) = api_log(
            State(state.clone()),
            body(r#"{"project":"Acme","stage":"dev","summary":"did X","energy_level":4}"#),
        )
        .await
        .unwrap();
        assert!(resp.ok);

        let logs = state.db().unwrap().recent_build_logs(10).unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].energy_level, Some(4));
        assert_eq!(logs[0].leverage_score, None);
    }

    #[tokio::test]
    async fn test_log_validation_is_bad_request() {
        let state = state(true);
        let err = api_log(State(state.clone()), body(r#"{"project":"Acme","stage":"ship","summary":"x"}"#))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "stage must be one of: planning, dev, experiment, deploy");
        assert!(state.db().unwrap().recent_build_logs(10).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_log_without_storage() {
        let err = api_log(State(state(false)), body(r#"{"project":"A","stage":"dev","summary":"x"}"#))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "storage is not configured");
    }

    #[tokio::test]
    async fn test_validation_runs_before_storage_check() {
        let err = api_log(State(state(false)), body("null")).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "Invalid request body");
    }

    #[tokio::test]
    async fn test_unknown_project() {
        let err = api_get_project(State(state(true)), Path("nope".to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.message(), "project not found");
    }

    #[tokio::test]
    async fn test_launch_responses() {
        let state = state(false);

        let Json(resp) = api_launch(State(state.clone()), body(r#"{"path":"/srv/app"}"#))
            .await
            .unwrap();
        assert!(resp.ok);
        let Json(record) = api_get_launch(State(state.clone()), Path(resp.launch_id.to_string()))
            .await
            .unwrap();
        assert_eq!(record.path, "/srv/app");

        let err = api_launch(State(state.clone()), body(r#"{"path":"  "}"#)).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "path required");

        let err = api_launch(State(state.clone()), body("{nope")).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "Launch failed");
    }

    #[tokio::test]
    async fn test_unknown_launch() {
        let err = api_get_launch(State(state(false)), Path("not-a-uuid".to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_list_limit_is_clamped() {
        assert_eq!(ListParams::default().limit(), DEFAULT_LIST_LIMIT);
        assert_eq!(ListParams { limit: Some(0) }.limit(), 1);
        assert_eq!(ListParams { limit: Some(10_000) }.limit(), MAX_LIST_LIMIT);
    }
}
