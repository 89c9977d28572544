use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::views::ProjectData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::common::Name;
use crate::domain::common::WorkStatus;
use crate::domain::project::models::CreateProjectCommand;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::project::errors::ProjectError;

/// Create one project or a batch.
///
/// The response mirrors the request: an object yields `{project}`, an array
/// yields `{projects}`.
pub async fn create_projects(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Json(body): Json<CreateProjectsRequest>,
) -> Result<ApiSuccess<CreateProjectsResponseData>, ApiError> {
    let (commands, batch) = match body {
        CreateProjectsRequest::Many(requests) => (
            requests
                .into_iter()
                .map(ProjectRequest::try_into_command)
                .collect::<Result<Vec<_>, _>>()?,
            true,
        ),
        CreateProjectsRequest::One(request) => (vec![request.try_into_command()?], false),
    };

    let projects = state
        .project_service
        .create_projects(&caller.user_id, commands)
        .await?;

    let data = match (batch, projects.first()) {
        (false, Some(project)) => CreateProjectsResponseData::One {
            project: project.into(),
        },
        _ => CreateProjectsResponseData::Many {
            projects: projects.iter().map(ProjectData::from).collect(),
        },
    };

    Ok(ApiSuccess::new(StatusCode::CREATED, data))
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CreateProjectsRequest {
    Many(Vec<ProjectRequest>),
    One(ProjectRequest),
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectRequest {
    name: String,
    #[serde(default)]
    description: String,
    status: Option<String>,
}

impl ProjectRequest {
    fn try_into_command(self) -> Result<CreateProjectCommand, ProjectError> {
        Ok(CreateProjectCommand {
            name: Name::new(self.name)?,
            description: self.description,
            status: self
                .status
                .map(|s| s.parse::<WorkStatus>())
                .transpose()?
                .unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CreateProjectsResponseData {
    One { project: ProjectData },
    Many { projects: Vec<ProjectData> },
}
