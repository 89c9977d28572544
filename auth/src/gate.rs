use crate::jwt::Claims;
use crate::jwt::JwtError;

/// Identity extracted from a verified access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub subject: String,
    pub name: String,
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Self {
            subject: claims.sub,
            name: claims.name,
        }
    }
}

/// Outcome of checking a request's credentials.
///
/// Only the variant is meant to cross the HTTP boundary. The error inside
/// `Rejected` is for server-side logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    /// No bearer token was presented
    Missing,
    /// A token was presented and failed verification
    Rejected(JwtError),
    /// The token verified; the request may proceed as this identity
    Admitted(Identity),
}

/// Extract the token from an `Authorization` header value.
///
/// Returns `None` when the scheme is not `Bearer` (case-insensitive) or the
/// token part is empty.
pub fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("Bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_extracts_token() {
        assert_eq!(bearer_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(bearer_token("bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(bearer_token("  Bearer   abc  "), Some("abc"));
    }

    #[test]
    fn test_bearer_token_requires_scheme_and_token() {
        assert_eq!(bearer_token(""), None);
        assert_eq!(bearer_token("Bearer"), None);
        assert_eq!(bearer_token("Bearer    "), None);
        assert_eq!(bearer_token("abc.def.ghi"), None);
        assert_eq!(bearer_token("Basic dXNlcjpwYXNz"), None);
    }

    #[test]
    fn test_identity_from_claims() {
        let claims = Claims::for_user("user123", "Alice", chrono::Duration::hours(1));
        let identity = Identity::from(claims);

        assert_eq!(identity.subject, "user123");
        assert_eq!(identity.name, "Alice");
    }
}
