use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::add_team_member::add_team_member;
use super::handlers::create_projects::create_projects;
use super::handlers::create_task::create_task;
use super::handlers::create_team::create_team;
use super::handlers::get_me::get_me;
use super::handlers::get_project::get_project;
use super::handlers::get_task::get_task;
use super::handlers::get_team::get_team;
use super::handlers::get_user::get_user;
use super::handlers::list_projects::list_projects;
use super::handlers::list_tasks::list_tasks;
use super::handlers::list_teams::list_teams;
use super::handlers::login::login;
use super::handlers::signup::signup;
use super::handlers::update_task::update_task;
use super::middleware::authenticate as auth_middleware;
use crate::domain::project::ports::ProjectRepository;
use crate::domain::project::ports::ProjectServicePort;
use crate::domain::project::service::ProjectService;
use crate::domain::task::ports::TaskRepository;
use crate::domain::task::ports::TaskServicePort;
use crate::domain::task::service::TaskService;
use crate::domain::team::ports::TeamRepository;
use crate::domain::team::ports::TeamServicePort;
use crate::domain::team::service::TeamService;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::ports::UserServicePort;
use crate::domain::user::service::UserService;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub project_service: Arc<dyn ProjectServicePort>,
    pub team_service: Arc<dyn TeamServicePort>,
    pub task_service: Arc<dyn TaskServicePort>,
    pub authenticator: Arc<Authenticator>,
}

impl AppState {
    /// Wire the domain services over one set of repositories.
    pub fn new<UR, PR, TM, TR>(
        users: Arc<UR>,
        projects: Arc<PR>,
        teams: Arc<TM>,
        tasks: Arc<TR>,
        authenticator: Arc<Authenticator>,
    ) -> Self
    where
        UR: UserRepository,
        PR: ProjectRepository,
        TM: TeamRepository,
        TR: TaskRepository,
    {
        Self {
            user_service: Arc::new(UserService::new(
                Arc::clone(&users),
                Arc::clone(&authenticator),
            )),
            project_service: Arc::new(ProjectService::new(
                Arc::clone(&projects),
                Arc::clone(&users),
            )),
            team_service: Arc::new(TeamService::new(Arc::clone(&teams), Arc::clone(&users))),
            task_service: Arc::new(TaskService::new(tasks, projects, teams, users)),
            authenticator,
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/api/auth/signup", post(signup))
        .route("/api/auth/login", post(login));

    let protected_routes = Router::new()
        .route("/api/users/me", get(get_me))
        .route("/api/users/:user_id", get(get_user))
        .route("/api/projects", get(list_projects).post(create_projects))
        .route("/api/projects/:project_id", get(get_project))
        .route("/api/teams", get(list_teams).post(create_team))
        .route("/api/teams/:team_id", get(get_team))
        .route("/api/teams/:team_id/members", post(add_team_member))
        .route("/api/tasks", get(list_tasks).post(create_task))
        .route("/api/tasks/:task_id", get(get_task).patch(update_task))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Headers stay out of the span: they carry the bearer token.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use auth::AuthSettings;
    use auth::HashCost;
    use axum::http::header::AUTHORIZATION;
    use axum::http::StatusCode;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;
    use crate::test_support::sample_user;
    use crate::test_support::MockTestProjectRepository;
    use crate::test_support::MockTestTaskRepository;
    use crate::test_support::MockTestTeamRepository;
    use crate::test_support::MockTestUserRepository;

    fn authenticator() -> Arc<Authenticator> {
        let settings = AuthSettings::new(
            Some("router-test-secret-with-enough-entropy"),
            chrono::Duration::hours(1),
            HashCost::minimal(),
        )
        .unwrap();
        Arc::new(Authenticator::new(settings).unwrap())
    }

    /// Router whose repositories panic on any call not set up on `users`.
    fn router(users: MockTestUserRepository, authenticator: Arc<Authenticator>) -> Router {
        create_router(AppState::new(
            Arc::new(users),
            Arc::new(MockTestProjectRepository::new()),
            Arc::new(MockTestTeamRepository::new()),
            Arc::new(MockTestTaskRepository::new()),
            authenticator,
        ))
    }

    async fn send(router: Router, uri: &str, authorization: Option<&str>) -> (StatusCode, serde_json::Value) {
        let mut request = Request::builder().uri(uri);
        if let Some(value) = authorization {
            request = request.header(AUTHORIZATION, value);
        }

        let response = router
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_missing_token_stops_before_data_access() {
        let mut users = MockTestUserRepository::new();
        users.expect_find_by_id().times(0);

        let (status, body) = send(router(users, authenticator()), "/api/users/me", None).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["status_code"], 401);
        assert_eq!(body["data"]["message"], "Access token required");
    }

    #[tokio::test]
    async fn test_non_bearer_scheme_counts_as_missing() {
        let (status, _) = send(
            router(MockTestUserRepository::new(), authenticator()),
            "/api/tasks",
            Some("Basic YWxpY2U6cHcxMjM="),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_invalid_token_is_forbidden() {
        let mut users = MockTestUserRepository::new();
        users.expect_find_by_id().times(0);

        let (status, body) = send(
            router(users, authenticator()),
            "/api/users/me",
            Some("Bearer not.a.jwt"),
        )
        .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["status_code"], 403);
    }

    #[tokio::test]
    async fn test_token_with_foreign_subject_is_forbidden() {
        let authenticator = authenticator();
        let issued = authenticator.issue_token("not-a-uuid", "Mallory").unwrap();

        let (status, _) = send(
            router(MockTestUserRepository::new(), Arc::clone(&authenticator)),
            "/api/projects",
            Some(&format!("Bearer {}", issued.access_token)),
        )
        .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_valid_token_reaches_handler() {
        let authenticator = authenticator();
        let alice = sample_user("alice");
        let alice_id = alice.id;
        let issued = authenticator.issue_token(alice_id, "Alice").unwrap();

        let mut users = MockTestUserRepository::new();
        users
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(alice.clone())));

        let (status, body) = send(
            router(users, Arc::clone(&authenticator)),
            &format!("/api/users/{}", alice_id),
            Some(&format!("Bearer {}", issued.access_token)),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["username"], "alice");
        assert!(body["data"].get("password_hash").is_none());
    }
}
