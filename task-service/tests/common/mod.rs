use std::sync::Arc;

use auth::AuthSettings;
use auth::Authenticator;
use auth::HashCost;
use serde_json::json;
use serde_json::Value;
use task_service::inbound::http::router::create_router;
use task_service::inbound::http::router::AppState;
use task_service::outbound::repositories::InMemoryStore;

pub const TEST_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server over the in-memory store
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
    pub authenticator: Arc<Authenticator>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let settings = AuthSettings::new(
            Some(TEST_SECRET),
            chrono::Duration::hours(1),
            HashCost::minimal(),
        )
        .expect("Failed to build auth settings");
        let authenticator =
            Arc::new(Authenticator::new(settings).expect("Failed to build authenticator"));

        let store = Arc::new(InMemoryStore::new());
        let state = AppState::new(
            Arc::clone(&store),
            Arc::clone(&store),
            Arc::clone(&store),
            store,
            Arc::clone(&authenticator),
        );
        let router = create_router(state);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            api_client: reqwest::Client::new(),
            authenticator,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PATCH request with Bearer token
    pub fn patch_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .patch(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Register a user whose phone, email and name derive from `username`.
    pub async fn signup(&self, username: &str, password: &str) -> reqwest::Response {
        self.post("/api/auth/signup")
            .json(&json!({
                "name": format!("{} Example", username),
                "username": username,
                "email": format!("{}@example.com", username),
                "phone": "+1 555 0100",
                "password": password,
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn login(&self, username: &str, password: &str) -> reqwest::Response {
        self.post("/api/auth/login")
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Sign up and log in, returning the access token and user id.
    pub async fn register_and_login(&self, username: &str) -> (String, String) {
        let response = self.signup(username, "pw123").await;
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: Value = self.login(username, "pw123").await.json().await.unwrap();
        (
            body["data"]["token"].as_str().unwrap().to_string(),
            body["data"]["user"]["id"].as_str().unwrap().to_string(),
        )
    }
}
