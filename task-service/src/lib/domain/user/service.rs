use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::Utc;
use tokio::task;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::PasswordHash;
use crate::domain::user::models::Session;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Owns registration and login; the authenticator supplies hashing and
/// token issuance. Argon2 work runs on the blocking pool.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hashing and token issuance
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: CreateUserCommand) -> Result<User, UserError> {
        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password;
        let password_hash = task::spawn_blocking(move || authenticator.hash_password(&password))
            .await
            .map_err(|e| UserError::Password(e.to_string()))?
            .map_err(|e| UserError::Password(e.to_string()))?;

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            name: command.name,
            username: command.username,
            email: command.email,
            phone: command.phone,
            password_hash: PasswordHash::new(password_hash),
            projects: Vec::new(),
            tasks: Vec::new(),
            teams: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        let created_user = self.repository.create(user).await?;

        tracing::info!(
            user_id = %created_user.id,
            username = %created_user.username,
            "User registered"
        );

        Ok(created_user)
    }

    async fn login(&self, username: &str, password: &str) -> Result<Session, UserError> {
        let user = match Username::new(username.to_string()) {
            Ok(username) => self.repository.find_by_username(&username).await?,
            Err(_) => None,
        };

        let authenticator = Arc::clone(&self.authenticator);
        let password = password.to_string();
        let stored_hash = user.as_ref().map(|u| u.password_hash.expose().to_string());
        let verified = task::spawn_blocking(move || {
            authenticator.verify_credentials(&password, stored_hash.as_deref())
        })
        .await
        .map_err(|e| UserError::Password(e.to_string()))?;

        let user = match (verified, user) {
            (Ok(()), Some(user)) => user,
            _ => {
                tracing::warn!(username = %username, "Login rejected");
                return Err(UserError::InvalidCredentials);
            }
        };

        let issued = self
            .authenticator
            .issue_token(user.id, user.name.as_str())
            .map_err(|e| UserError::Token(e.to_string()))?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(Session {
            user,
            token: issued.access_token,
            expires_at: issued.expires_at,
        })
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn get_users_by_ids(&self, user_ids: &[UserId]) -> Result<Vec<User>, UserError> {
        self.repository.find_by_ids(user_ids).await
    }
}
