//! Page handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use tracing::{error, warn};

use super::SharedState;
use crate::views::{self, hub::HubListing};

pub async fn index() -> Redirect {
    Redirect::to("/hub")
}

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    "OK"
}

pub async fn quick_log_page() -> Html<String> {
    Html(views::quick_log::render())
}

/// Project list
pub async fn hub_page(State(state): State<SharedState>) -> Html<String> {
    let listing = match state.db() {
        Err(_) => HubListing::Unconfigured,
        Ok(db) => match db.list_projects() {
            Ok(projects) => HubListing::Projects(projects),
            Err(e) => {
                // Shown as an empty hub rather than an error page
                error!(error = %e, "Failed to load projects");
                HubListing::Projects(Vec::new())
            }
        },
    };

    Html(views::hub::render(&listing, state.device_type))
}

/// Single project with its embedded doc
pub async fn project_page(State(state): State<SharedState>, Path(id): Path<String>) -> Response {
    let db = match state.db() {
        Ok(db) => db,
        Err(_) => {
            warn!(project_id = %id, "Project page requested without storage");
            return not_found();
        }
    };

    match db.get_project(&id) {
        Ok(Some(project)) => Html(views::detail::render(&project, state.device_type)).into_response(),
        Ok(None) => not_found(),
        Err(e) => {
            error!(project_id = %id, error = %e, "Failed to load project");
            not_found()
        }
    }
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Html(views::not_found())).into_response()
}
