use axum::extract::State;
use axum::http::StatusCode;

use super::views::ProjectData;
use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn list_projects(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<ProjectData>>, ApiError> {
    let projects = state.project_service.list_projects().await?;

    if projects.is_empty() {
        return Err(ApiError::NotFound("No projects found".to_string()));
    }

    Ok(ApiSuccess::new(
        StatusCode::OK,
        projects.iter().map(ProjectData::from).collect(),
    ))
}
