use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::views::ProjectData;
use super::views::TaskData;
use super::views::TeamData;
use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// The caller's own record with its projects, tasks and teams populated.
pub async fn get_me(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<MeResponseData>, ApiError> {
    let user = state.user_service.get_user(&caller.user_id).await?;

    let projects = state
        .project_service
        .get_projects_by_ids(&user.projects)
        .await?;
    let tasks = state.task_service.get_tasks_by_ids(&user.tasks).await?;
    let teams = state.team_service.get_teams_by_ids(&user.teams).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        MeResponseData {
            id: user.id.to_string(),
            name: user.name.as_str().to_string(),
            username: user.username.as_str().to_string(),
            email: user.email.as_str().to_string(),
            phone: user.phone.as_str().to_string(),
            projects: projects.iter().map(ProjectData::from).collect(),
            tasks: tasks.iter().map(TaskData::from).collect(),
            teams: teams.iter().map(TeamData::from).collect(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeResponseData {
    pub id: String,
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub projects: Vec<ProjectData>,
    pub tasks: Vec<TaskData>,
    pub teams: Vec<TeamData>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
