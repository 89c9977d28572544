use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::views::TaskData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::common::Name;
use crate::domain::common::WorkStatus;
use crate::domain::task::models::normalize_tags;
use crate::domain::task::models::Priority;
use crate::domain::task::models::TaskId;
use crate::domain::task::models::TimeToComplete;
use crate::domain::task::models::UpdateTaskCommand;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;
use crate::task::errors::TaskError;

/// HTTP request body for updating a task; absent fields stay unchanged.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTaskRequest {
    name: Option<String>,
    tags: Option<Vec<String>>,
    time_to_complete: Option<i64>,
    status: Option<String>,
    priority: Option<String>,
    owners: Option<Vec<String>>,
}

impl UpdateTaskRequest {
    fn try_into_command(self) -> Result<UpdateTaskCommand, TaskError> {
        let owners = self
            .owners
            .map(|owners| {
                owners
                    .iter()
                    .map(|id| UserId::from_string(id))
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;

        Ok(UpdateTaskCommand {
            name: self.name.map(Name::new).transpose()?,
            tags: self.tags.map(normalize_tags),
            time_to_complete: self.time_to_complete.map(TimeToComplete::new).transpose()?,
            status: self.status.map(|s| s.parse::<WorkStatus>()).transpose()?,
            priority: self.priority.map(|p| p.parse::<Priority>()).transpose()?,
            owners,
        })
    }
}

pub async fn update_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
    Json(body): Json<UpdateTaskRequest>,
) -> Result<ApiSuccess<TaskData>, ApiError> {
    let task_id = TaskId::from_string(&task_id).map_err(TaskError::from)?;
    let command = body.try_into_command()?;

    state
        .task_service
        .update_task(&task_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref task| ApiSuccess::new(StatusCode::OK, task.into()))
}
