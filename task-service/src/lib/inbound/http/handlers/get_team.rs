use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::views::MemberData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::team::models::TeamId;
use crate::inbound::http::router::AppState;
use crate::team::errors::TeamError;

pub async fn get_team(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
) -> Result<ApiSuccess<TeamDetailData>, ApiError> {
    let team_id = TeamId::from_string(&team_id).map_err(TeamError::from)?;

    let team = state.team_service.get_team(&team_id).await?;
    let members = state.user_service.get_users_by_ids(&team.members).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        TeamDetailData {
            id: team.id.to_string(),
            name: team.name.as_str().to_string(),
            description: team.description,
            members: members.iter().map(MemberData::from).collect(),
            created_at: team.created_at,
            updated_at: team.updated_at,
        },
    ))
}

/// Team with its members populated
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamDetailData {
    pub id: String,
    pub name: String,
    pub description: String,
    pub members: Vec<MemberData>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
