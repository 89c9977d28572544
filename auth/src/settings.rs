use std::fmt;

use chrono::Duration;
use chrono::Utc;
use thiserror::Error;

use crate::password::HashCost;

/// Error raised while assembling authentication settings.
///
/// Every variant is a startup configuration fault.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Signing secret is missing or empty")]
    MissingSecret,

    #[error("Token lifetime must be positive, got {0} seconds")]
    NonPositiveTtl(i64),

    #[error("Token lifetime is too large")]
    TtlOutOfRange,
}

/// HMAC signing secret.
///
/// Never empty. `Debug` output is redacted.
#[derive(Clone)]
pub struct SigningSecret(Vec<u8>);

impl SigningSecret {
    /// Wrap a secret, rejecting empty or whitespace-only values.
    pub fn new(secret: impl AsRef<[u8]>) -> Result<Self, SettingsError> {
        let bytes = secret.as_ref();
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(SettingsError::MissingSecret);
        }
        Ok(Self(bytes.to_vec()))
    }

    pub(crate) fn expose(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningSecret(<redacted>)")
    }
}

/// Everything the authenticator needs, built once at startup.
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub secret: SigningSecret,
    pub token_ttl: Duration,
    pub hash_cost: HashCost,
}

impl AuthSettings {
    /// Validate raw configuration values into settings.
    ///
    /// # Errors
    /// * `MissingSecret` - `secret` is absent, empty or blank
    /// * `NonPositiveTtl` - `token_ttl` is zero or negative
    /// * `TtlOutOfRange` - an expiry `token_ttl` from now is not representable
    pub fn new(
        secret: Option<&str>,
        token_ttl: Duration,
        hash_cost: HashCost,
    ) -> Result<Self, SettingsError> {
        let secret = SigningSecret::new(secret.ok_or(SettingsError::MissingSecret)?)?;

        if token_ttl <= Duration::zero() {
            return Err(SettingsError::NonPositiveTtl(token_ttl.num_seconds()));
        }
        if Utc::now().checked_add_signed(token_ttl).is_none() {
            return Err(SettingsError::TtlOutOfRange);
        }

        Ok(Self {
            secret,
            token_ttl,
            hash_cost,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_accept_valid_values() {
        let settings = AuthSettings::new(
            Some("secret_key_at_least_32_bytes_long!"),
            Duration::hours(1),
            HashCost::default(),
        )
        .unwrap();

        assert_eq!(settings.token_ttl, Duration::hours(1));
    }

    #[test]
    fn test_settings_reject_missing_secret() {
        let result = AuthSettings::new(None, Duration::hours(1), HashCost::default());
        assert_eq!(result.unwrap_err(), SettingsError::MissingSecret);
    }

    #[test]
    fn test_settings_reject_blank_secret() {
        for secret in ["", "   ", "\n\t"] {
            let result = AuthSettings::new(Some(secret), Duration::hours(1), HashCost::default());
            assert_eq!(result.unwrap_err(), SettingsError::MissingSecret);
        }
    }

    #[test]
    fn test_settings_reject_non_positive_ttl() {
        let result = AuthSettings::new(Some("secret"), Duration::zero(), HashCost::default());
        assert_eq!(result.unwrap_err(), SettingsError::NonPositiveTtl(0));
    }

    #[test]
    fn test_settings_reject_unrepresentable_ttl() {
        let result = AuthSettings::new(Some("secret"), Duration::MAX, HashCost::default());
        assert_eq!(result.unwrap_err(), SettingsError::TtlOutOfRange);
    }

    #[test]
    fn test_secret_debug_is_redacted() {
        let secret = SigningSecret::new("super-secret-value").unwrap();
        let printed = format!("{:?}", secret);

        assert!(!printed.contains("super-secret-value"));
    }
}
