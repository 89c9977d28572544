use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::views::TaskData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::project::models::ProjectId;
use crate::inbound::http::router::AppState;
use crate::project::errors::ProjectError;

pub async fn get_project(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> Result<ApiSuccess<ProjectDetailData>, ApiError> {
    let project_id = ProjectId::from_string(&project_id).map_err(ProjectError::from)?;

    let project = state.project_service.get_project(&project_id).await?;
    let tasks = state.task_service.get_tasks_by_ids(&project.tasks).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        ProjectDetailData {
            id: project.id.to_string(),
            name: project.name.as_str().to_string(),
            description: project.description,
            status: project.status.as_str().to_string(),
            tasks: tasks.iter().map(TaskData::from).collect(),
            created_at: project.created_at,
            updated_at: project.updated_at,
        },
    ))
}

/// Project with its tasks populated
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectDetailData {
    pub id: String,
    pub name: String,
    pub description: String,
    pub status: String,
    pub tasks: Vec<TaskData>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
