use std::env;

use auth::AuthSettings;
use auth::HashCost;
use auth::SettingsError;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Application configuration for task-service.
///
/// Loaded from configuration files with environment variable overrides.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub password: PasswordConfig,
}

/// Which document store backs the repositories.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseBackend {
    Mongo,
    Memory,
}

/// Document store configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub backend: DatabaseBackend,
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_database_name")]
    pub name: String,
}

/// HTTP server configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

/// JWT authentication configuration.
///
/// `secret` has no default. Startup fails when it is absent or blank.
#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    #[serde(default)]
    pub secret: Option<String>,
    #[serde(default = "default_expiration_hours")]
    pub expiration_hours: i64,
}

/// Argon2 cost configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct PasswordConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

fn default_database_name() -> String {
    "taskboard".to_string()
}

fn default_expiration_hours() -> i64 {
    1
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .field("expiration_hours", &self.expiration_hours)
            .finish()
    }
}

impl Default for PasswordConfig {
    fn default() -> Self {
        let cost = HashCost::default();
        Self {
            memory_kib: cost.memory_kib,
            iterations: cost.iterations,
            parallelism: cost.parallelism,
        }
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides.
    ///
    /// # Configuration Priority (highest to lowest)
    /// 1. Environment variables (JWT__SECRET, DATABASE__URL, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    ///
    /// # Errors
    /// Returns error if required configuration values are missing or invalid
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::default().separator("__"))
            .build()?;

        configuration.try_deserialize()
    }

    /// Validate the authentication part of the configuration.
    ///
    /// # Errors
    /// * `MissingSecret` - `jwt.secret` is absent or blank
    /// * `NonPositiveTtl` - `jwt.expiration_hours` is not positive
    /// * `TtlOutOfRange` - `jwt.expiration_hours` is too large
    pub fn auth_settings(&self) -> Result<AuthSettings, SettingsError> {
        let token_ttl = chrono::Duration::try_hours(self.jwt.expiration_hours)
            .ok_or(SettingsError::TtlOutOfRange)?;

        AuthSettings::new(
            self.jwt.secret.as_deref(),
            token_ttl,
            HashCost::new(
                self.password.memory_kib,
                self.password.iterations,
                self.password.parallelism,
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: Option<&str>, expiration_hours: i64) -> Config {
        Config {
            database: DatabaseConfig {
                backend: DatabaseBackend::Memory,
                url: String::new(),
                name: default_database_name(),
            },
            server: ServerConfig { http_port: 3000 },
            jwt: JwtConfig {
                secret: secret.map(str::to_string),
                expiration_hours,
            },
            password: PasswordConfig::default(),
        }
    }

    #[test]
    fn test_auth_settings_from_valid_config() {
        let settings = config(Some("secret_key_at_least_32_bytes_long!"), 1)
            .auth_settings()
            .unwrap();

        assert_eq!(settings.token_ttl, chrono::Duration::hours(1));
        assert_eq!(settings.hash_cost, HashCost::default());
    }

    #[test]
    fn test_auth_settings_missing_secret_is_fatal() {
        assert_eq!(
            config(None, 1).auth_settings().unwrap_err(),
            SettingsError::MissingSecret
        );
        assert_eq!(
            config(Some(""), 1).auth_settings().unwrap_err(),
            SettingsError::MissingSecret
        );
    }

    #[test]
    fn test_auth_settings_rejects_zero_ttl() {
        assert!(matches!(
            config(Some("secret"), 0).auth_settings(),
            Err(SettingsError::NonPositiveTtl(_))
        ));
    }

    #[test]
    fn test_auth_settings_rejects_huge_ttl() {
        for hours in [i64::MAX, 10_000_000_000] {
            assert_eq!(
                config(Some("secret"), hours).auth_settings().unwrap_err(),
                SettingsError::TtlOutOfRange
            );
        }
    }

    #[test]
    fn test_load_reads_env_overrides() {
        env::set_var("RUN_MODE", "test");
        env::set_var("JWT__SECRET", "env-provided-secret-at-least-32-bytes");
        env::set_var("DATABASE__NAME", "taskboard_env");

        let config = Config::load().unwrap();

        assert_eq!(
            config.jwt.secret.as_deref(),
            Some("env-provided-secret-at-least-32-bytes")
        );
        assert_eq!(config.database.name, "taskboard_env");
        assert_eq!(config.database.backend, DatabaseBackend::Memory);
        assert!(config.auth_settings().is_ok());
    }

    #[test]
    fn test_jwt_config_debug_hides_secret() {
        let printed = format!("{:?}", config(Some("hunter2-hunter2"), 1).jwt);
        assert!(!printed.contains("hunter2"));
    }

    #[test]
    fn test_backend_deserializes_lowercase() {
        let backend: DatabaseBackend = serde_json::from_str("\"mongo\"").unwrap();
        assert_eq!(backend, DatabaseBackend::Mongo);
    }
}
