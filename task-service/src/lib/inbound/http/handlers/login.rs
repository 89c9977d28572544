use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::views::UserData;
use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Exchange username and password for an access token.
///
/// Unknown usernames and wrong passwords produce the same 401 body.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequestBody>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let session = state
        .user_service
        .login(&body.username, &body.password)
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LoginResponseData {
            token: session.token,
            expires_at: session.expires_at,
            user: (&session.user).into(),
        },
    ))
}

#[derive(Clone, Deserialize)]
pub struct LoginRequestBody {
    username: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: UserData,
}
