use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::views::TaskData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::common::Name;
use crate::domain::common::WorkStatus;
use crate::domain::project::models::ProjectId;
use crate::domain::task::models::normalize_tags;
use crate::domain::task::models::CreateTaskCommand;
use crate::domain::task::models::Priority;
use crate::domain::task::models::TimeToComplete;
use crate::domain::team::models::TeamId;
use crate::domain::user::models::UserId;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::task::errors::TaskError;

pub async fn create_task(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Json(body): Json<CreateTaskRequest>,
) -> Result<ApiSuccess<TaskData>, ApiError> {
    state
        .task_service
        .create_task(&caller.user_id, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref task| ApiSuccess::new(StatusCode::CREATED, task.into()))
}

/// HTTP request body for creating a task (raw JSON)
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTaskRequest {
    name: String,
    project: String,
    team: String,
    #[serde(default)]
    owners: Vec<String>,
    #[serde(default)]
    tags: Vec<String>,
    time_to_complete: i64,
    status: Option<String>,
    priority: Option<String>,
}

impl CreateTaskRequest {
    fn try_into_command(self) -> Result<CreateTaskCommand, TaskError> {
        let owners = self
            .owners
            .iter()
            .map(|id| UserId::from_string(id))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CreateTaskCommand {
            name: Name::new(self.name)?,
            project: ProjectId::from_string(&self.project)?,
            team: TeamId::from_string(&self.team)?,
            owners,
            tags: normalize_tags(self.tags),
            time_to_complete: TimeToComplete::new(self.time_to_complete)?,
            status: self
                .status
                .map(|s| s.parse::<WorkStatus>())
                .transpose()?
                .unwrap_or_default(),
            priority: self.priority.map(|p| p.parse::<Priority>()).transpose()?,
        })
    }
}
