use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::views::MemberData;
use super::views::ProjectData;
use super::views::TeamData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::task::models::TaskId;
use crate::inbound::http::router::AppState;
use crate::task::errors::TaskError;

pub async fn get_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> Result<ApiSuccess<TaskDetailData>, ApiError> {
    let task_id = TaskId::from_string(&task_id).map_err(TaskError::from)?;

    let task = state.task_service.get_task(&task_id).await?;
    let project = state
        .project_service
        .get_projects_by_ids(&[task.project])
        .await?;
    let team = state.team_service.get_teams_by_ids(&[task.team]).await?;
    let owners = state.user_service.get_users_by_ids(&task.owners).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        TaskDetailData {
            id: task.id.to_string(),
            name: task.name.as_str().to_string(),
            project: project.first().map(ProjectData::from),
            team: team.first().map(TeamData::from),
            owners: owners.iter().map(MemberData::from).collect(),
            tags: task.tags,
            time_to_complete: task.time_to_complete.days(),
            status: task.status.as_str().to_string(),
            priority: task.priority.map(|p| p.as_str().to_string()),
            created_at: task.created_at,
            updated_at: task.updated_at,
        },
    ))
}

/// Task with project, team and owners populated
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskDetailData {
    pub id: String,
    pub name: String,
    pub project: Option<ProjectData>,
    pub team: Option<TeamData>,
    pub owners: Vec<MemberData>,
    pub tags: Vec<String>,
    pub time_to_complete: u32,
    pub status: String,
    pub priority: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
