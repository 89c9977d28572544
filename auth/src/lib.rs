//! Authentication utilities library
//!
//! Provides the authentication core shared by the service crates:
//! - Password hashing (Argon2id, configurable cost)
//! - JWT token generation and validation
//! - Signing settings validated once at startup
//! - Request admission (missing / rejected / admitted)
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::{HashCost, PasswordHasher};
//!
//! let hasher = PasswordHasher::with_cost(HashCost::minimal()).unwrap();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("other_password", &hash));
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Admission, AuthSettings, Authenticator, HashCost};
//! use chrono::Duration;
//!
//! let settings = AuthSettings::new(
//!     Some("secret_key_at_least_32_bytes_long!"),
//!     Duration::hours(1),
//!     HashCost::minimal(),
//! )
//! .unwrap();
//! let auth = Authenticator::new(settings).unwrap();
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify, then issue a token
//! auth.verify_credentials("password123", Some(&hash)).unwrap();
//! let result = auth.issue_token("user123", "Alice").unwrap();
//!
//! // Gate a request
//! let header = format!("Bearer {}", result.access_token);
//! assert!(matches!(auth.admit(Some(&header)), Admission::Admitted(_)));
//! assert_eq!(auth.admit(None), Admission::Missing);
//! ```

pub mod authenticator;
pub mod gate;
pub mod jwt;
pub mod password;
pub mod settings;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use gate::Admission;
pub use gate::Identity;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::HashCost;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use settings::AuthSettings;
pub use settings::SettingsError;
pub use settings::SigningSecret;
