use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;

use super::views::TaskData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::common::WorkStatus;
use crate::domain::project::models::ProjectId;
use crate::domain::task::models::TaskFilter;
use crate::domain::team::models::TeamId;
use crate::domain::user::models::UserId;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::task::errors::TaskError;

/// Query value of `owner` that stands for the caller.
const OWNER_SELF: &str = "me";

pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Query(query): Query<ListTasksQuery>,
) -> Result<ApiSuccess<Vec<TaskData>>, ApiError> {
    let filter = query.try_into_filter(&caller)?;

    state
        .task_service
        .list_tasks(filter)
        .await
        .map_err(ApiError::from)
        .map(|tasks| ApiSuccess::new(StatusCode::OK, tasks.iter().map(TaskData::from).collect()))
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListTasksQuery {
    project: Option<String>,
    team: Option<String>,
    owner: Option<String>,
    status: Option<String>,
    tag: Option<String>,
}

impl ListTasksQuery {
    fn try_into_filter(self, caller: &AuthenticatedUser) -> Result<TaskFilter, TaskError> {
        let owner = match self.owner.as_deref() {
            Some(OWNER_SELF) => Some(caller.user_id),
            Some(id) => Some(UserId::from_string(id)?),
            None => None,
        };

        Ok(TaskFilter {
            project: self
                .project
                .map(|id| ProjectId::from_string(&id))
                .transpose()?,
            team: self.team.map(|id| TeamId::from_string(&id)).transpose()?,
            owner,
            status: self.status.map(|s| s.parse::<WorkStatus>()).transpose()?,
            tag: self.tag,
        })
    }
}
