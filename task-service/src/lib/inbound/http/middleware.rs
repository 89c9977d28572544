use auth::Admission;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Caller identity placed in request extensions by [`authenticate`].
///
/// Protected handlers take it as `Extension<AuthenticatedUser>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub name: String,
}

/// Gate for protected routes.
///
/// No bearer token: 401. A token that fails verification: 403. Either way the
/// request stops here.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let identity = match state.authenticator.admit(header) {
        Admission::Admitted(identity) => identity,
        Admission::Missing => {
            return ApiError::Unauthorized("Access token required".to_string()).into_response();
        }
        Admission::Rejected(reason) => {
            tracing::warn!(reason = %reason, uri = %req.uri(), "Access token rejected");
            return forbidden();
        }
    };

    let user_id = match UserId::from_string(&identity.subject) {
        Ok(user_id) => user_id,
        Err(e) => {
            tracing::warn!(error = %e, "Access token subject is not a user id");
            return forbidden();
        }
    };

    req.extensions_mut().insert(AuthenticatedUser {
        user_id,
        name: identity.name,
    });

    next.run(req).await
}

fn forbidden() -> Response {
    ApiError::Forbidden("Invalid or expired token".to_string()).into_response()
}
