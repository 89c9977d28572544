use chrono::DateTime;
use chrono::Duration;
use chrono::TimeZone;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Identity assertion carried inside an access token.
///
/// `sub` and `exp` are mandatory for verification; `name` is informational.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// Display name of the subject
    pub name: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a user, issued now and valid for `ttl`.
    ///
    /// # Arguments
    /// * `user_id` - Unique user identifier
    /// * `name` - Display name
    /// * `ttl` - Lifetime of the token
    pub fn for_user(user_id: impl ToString, name: impl Into<String>, ttl: Duration) -> Self {
        Self::issued_at(user_id, name, Utc::now(), ttl)
    }

    /// Create claims with an explicit issuance instant.
    pub fn issued_at(
        user_id: impl ToString,
        name: impl Into<String>,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            sub: user_id.to_string(),
            name: name.into(),
            iat: issued_at.timestamp(),
            exp: (issued_at + ttl).timestamp(),
        }
    }

    /// Expiration as a timestamp.
    pub fn expires_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.exp, 0)
            .single()
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_user() {
        let claims = Claims::for_user("user123", "Alice", Duration::hours(1));

        assert_eq!(claims.sub, "user123");
        assert_eq!(claims.name, "Alice");
        assert_eq!(claims.exp - claims.iat, 60 * 60);
    }

    #[test]
    fn test_issued_at() {
        let issued_at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let claims = Claims::issued_at("user123", "Alice", issued_at, Duration::minutes(30));

        assert_eq!(claims.iat, issued_at.timestamp());
        assert_eq!(claims.expires_at(), issued_at + Duration::minutes(30));
    }

    #[test]
    fn test_claims_json_shape() {
        let claims = Claims::for_user("user123", "Alice", Duration::hours(1));
        let json = serde_json::to_value(&claims).unwrap();

        assert_eq!(json.as_object().unwrap().len(), 4);
        assert_eq!(json["exp"], claims.exp);
        assert_eq!(json["sub"], "user123");
        assert_eq!(json["name"], "Alice");
    }
}
