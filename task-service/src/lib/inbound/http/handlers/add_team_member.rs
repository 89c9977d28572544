use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::views::TeamData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::team::models::TeamId;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;
use crate::team::errors::TeamError;

pub async fn add_team_member(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
    Json(body): Json<AddTeamMemberRequest>,
) -> Result<ApiSuccess<TeamData>, ApiError> {
    let team_id = TeamId::from_string(&team_id).map_err(TeamError::from)?;
    let user_id = UserId::from_string(&body.user_id).map_err(TeamError::from)?;

    state
        .team_service
        .add_member(&team_id, &user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref team| ApiSuccess::new(StatusCode::OK, team.into()))
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddTeamMemberRequest {
    user_id: String,
}
