use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::views::TeamData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::common::Name;
use crate::domain::team::models::CreateTeamCommand;
use crate::domain::user::models::UserId;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::team::errors::TeamError;

pub async fn create_team(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Json(body): Json<CreateTeamRequest>,
) -> Result<ApiSuccess<TeamData>, ApiError> {
    state
        .team_service
        .create_team(&caller.user_id, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref team| ApiSuccess::new(StatusCode::CREATED, team.into()))
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTeamRequest {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    members: Vec<String>,
}

impl CreateTeamRequest {
    fn try_into_command(self) -> Result<CreateTeamCommand, TeamError> {
        let members = self
            .members
            .iter()
            .map(|id| UserId::from_string(id))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CreateTeamCommand {
            name: Name::new(self.name)?,
            description: self.description,
            members,
        })
    }
}
