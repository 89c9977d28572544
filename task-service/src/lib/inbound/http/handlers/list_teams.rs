use axum::extract::State;
use axum::http::StatusCode;

use super::views::TeamData;
use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn list_teams(State(state): State<AppState>) -> Result<ApiSuccess<Vec<TeamData>>, ApiError> {
    state
        .team_service
        .list_teams()
        .await
        .map_err(ApiError::from)
        .map(|teams| ApiSuccess::new(StatusCode::OK, teams.iter().map(TeamData::from).collect()))
}
