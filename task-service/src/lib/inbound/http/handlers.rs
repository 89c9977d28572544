use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::project::errors::ProjectError;
use crate::task::errors::TaskError;
use crate::team::errors::TeamError;
use crate::user::errors::UserError;

pub mod add_team_member;
pub mod create_projects;
pub mod create_task;
pub mod create_team;
pub mod get_me;
pub mod get_project;
pub mod get_task;
pub mod get_team;
pub mod get_user;
pub mod list_projects;
pub mod list_tasks;
pub mod list_teams;
pub mod login;
pub mod signup;
pub mod update_task;
pub mod views;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    BadRequest(String),
    NotFound(String),
    Unauthorized(String),
    Forbidden(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => ApiError::NotFound(err.to_string()),
            UserError::UsernameAlreadyExists(_) | UserError::EmailAlreadyExists(_) => {
                ApiError::BadRequest(err.to_string())
            }
            UserError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            UserError::InvalidUserId(_)
            | UserError::InvalidUsername(_)
            | UserError::InvalidEmail(_)
            | UserError::InvalidPhone(_)
            | UserError::InvalidName(_) => ApiError::UnprocessableEntity(err.to_string()),
            UserError::Password(_) | UserError::Token(_) | UserError::DatabaseError(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<ProjectError> for ApiError {
    fn from(err: ProjectError) -> Self {
        match err {
            ProjectError::NotFound(_) | ProjectError::CreatorNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            ProjectError::InvalidProjectId(_)
            | ProjectError::InvalidName(_)
            | ProjectError::InvalidStatus(_)
            | ProjectError::EmptyBatch => ApiError::UnprocessableEntity(err.to_string()),
            ProjectError::User(err) => err.into(),
            ProjectError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<TeamError> for ApiError {
    fn from(err: TeamError) -> Self {
        match err {
            TeamError::NotFound(_) | TeamError::MemberNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            TeamError::InvalidTeamId(_)
            | TeamError::InvalidMemberId(_)
            | TeamError::InvalidName(_) => ApiError::UnprocessableEntity(err.to_string()),
            TeamError::User(err) => err.into(),
            TeamError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<TaskError> for ApiError {
    fn from(err: TaskError) -> Self {
        match err {
            TaskError::NotFound(_)
            | TaskError::ProjectNotFound(_)
            | TaskError::TeamNotFound(_)
            | TaskError::OwnerNotFound(_) => ApiError::NotFound(err.to_string()),
            TaskError::InvalidTaskId(_)
            | TaskError::InvalidProjectId(_)
            | TaskError::InvalidTeamId(_)
            | TaskError::InvalidOwnerId(_)
            | TaskError::InvalidName(_)
            | TaskError::InvalidStatus(_)
            | TaskError::InvalidPriority(_)
            | TaskError::InvalidTimeToComplete(_)
            | TaskError::EmptyOwners
            | TaskError::EmptyUpdate => ApiError::UnprocessableEntity(err.to_string()),
            TaskError::Project(err) => err.into(),
            TaskError::Team(err) => err.into(),
            TaskError::User(err) => err.into(),
            TaskError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_identity_is_bad_request() {
        let err: ApiError = UserError::UsernameAlreadyExists("alice".to_string()).into();
        assert_eq!(
            err,
            ApiError::BadRequest("Username already exists: alice".to_string())
        );
    }

    #[test]
    fn test_nested_errors_keep_their_status() {
        let err: ApiError =
            TaskError::User(UserError::DatabaseError("timeout".to_string())).into();
        assert!(matches!(err, ApiError::InternalServerError(_)));

        let err: ApiError =
            TaskError::Project(ProjectError::NotFound("p1".to_string())).into();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[test]
    fn test_internal_error_hides_details() {
        let response =
            ApiError::InternalServerError("connection refused".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
