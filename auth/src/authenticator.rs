use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::gate::bearer_token;
use crate::gate::Admission;
use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::settings::AuthSettings;

/// Authentication coordinator combining password verification and JWT generation.
///
/// Built once at startup from `AuthSettings` and shared read-only between
/// requests.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    token_ttl: Duration,
    decoy_hash: String,
}

/// Result of successful authentication.
#[derive(Debug, Clone)]
pub struct AuthenticationResult {
    /// JWT access token
    pub access_token: String,
    /// Instant after which the token is rejected
    pub expires_at: DateTime<Utc>,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Errors
    /// * `PasswordError` - The configured hash cost is not accepted by Argon2
    pub fn new(settings: AuthSettings) -> Result<Self, AuthenticationError> {
        let password_hasher = PasswordHasher::with_cost(settings.hash_cost)?;
        // Verified against when the username is unknown, so both login
        // failures cost one hash verification.
        let decoy_hash = password_hasher.hash("decoy-password")?;

        Ok(Self {
            password_hasher,
            jwt_handler: JwtHandler::new(&settings.secret),
            token_ttl: settings.token_ttl,
            decoy_hash,
        })
    }

    /// Lifetime of issued access tokens.
    pub fn token_ttl(&self) -> Duration {
        self.token_ttl
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a password against the stored hash of an account.
    ///
    /// `stored_hash` is `None` when no account matches the submitted
    /// username. That case does the same work and returns the same error as
    /// a wrong password.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown account or password mismatch
    pub fn verify_credentials(
        &self,
        password: &str,
        stored_hash: Option<&str>,
    ) -> Result<(), AuthenticationError> {
        let is_valid = match stored_hash {
            Some(hash) => self.password_hasher.verify(password, hash),
            None => {
                let _ = self.password_hasher.verify(password, &self.decoy_hash);
                false
            }
        };

        if is_valid {
            Ok(())
        } else {
            Err(AuthenticationError::InvalidCredentials)
        }
    }

    /// Issue an access token valid for the configured lifetime.
    ///
    /// # Arguments
    /// * `subject` - Identifier placed in the token's `sub` claim
    /// * `name` - Display name placed in the token
    ///
    /// # Errors
    /// * `EncodingFailed` - Token generation failed
    pub fn issue_token(
        &self,
        subject: impl ToString,
        name: &str,
    ) -> Result<AuthenticationResult, JwtError> {
        let claims = Claims::for_user(subject, name, self.token_ttl);
        let access_token = self.jwt_handler.encode(&claims)?;

        Ok(AuthenticationResult {
            access_token,
            expires_at: claims.expires_at(),
        })
    }

    /// Sign arbitrary claims.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn generate_token(&self, claims: &Claims) -> Result<String, JwtError> {
        self.jwt_handler.encode(claims)
    }

    /// Validate and decode JWT token.
    ///
    /// # Errors
    /// * `TokenExpired` - Token is past its expiry
    /// * `InvalidToken` - Token validation or decoding failed
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.jwt_handler.decode(token)
    }

    /// Decide whether a request carrying this `Authorization` header may
    /// proceed.
    ///
    /// Every call verifies the token from scratch.
    pub fn admit(&self, authorization: Option<&str>) -> Admission {
        let Some(token) = authorization.and_then(bearer_token) else {
            return Admission::Missing;
        };

        match self.validate_token(token) {
            Ok(claims) => Admission::Admitted(claims.into()),
            Err(e) => Admission::Rejected(e),
        }
    }
}
