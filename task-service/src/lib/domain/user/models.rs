use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::common::Name;
use crate::domain::project::models::ProjectId;
use crate::domain::task::models::TaskId;
use crate::domain::team::models::TeamId;
use crate::user::errors::EmailError;
use crate::user::errors::PhoneError;
use crate::user::errors::UserIdError;
use crate::user::errors::UsernameError;

/// User aggregate entity.
///
/// Represents a registered user and the projects, tasks and teams it is
/// linked to.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub name: Name,
    pub username: Username,
    pub email: EmailAddress,
    pub phone: PhoneNumber,
    pub password_hash: PasswordHash,
    pub projects: Vec<ProjectId>,
    pub tasks: Vec<TaskId>,
    pub teams: Vec<TeamId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Record a reference to another aggregate, ignoring duplicates.
    pub fn link(&mut self, link: UserLink) {
        match link {
            UserLink::Project(id) => push_unique(&mut self.projects, id),
            UserLink::Task(id) => push_unique(&mut self.tasks, id),
            UserLink::Team(id) => push_unique(&mut self.teams, id),
        }
    }
}

fn push_unique<T: PartialEq>(items: &mut Vec<T>, item: T) {
    if !items.contains(&item) {
        items.push(item);
    }
}

/// Reference from a user to an aggregate it takes part in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserLink {
    Project(ProjectId),
    Task(TaskId),
    Team(TeamId),
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    ///
    /// # Returns
    /// UserId with random UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type
///
/// Ensures username is 3-32 characters and contains only alphanumeric, underscore, and hyphen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 32;

    /// Create a new valid username.
    ///
    /// # Errors
    /// * `TooShort` - Username shorter than 3 characters
    /// * `TooLong` - Username longer than 32 characters
    /// * `InvalidCharacters` - Contains non-alphanumeric characters (except _ and -)
    pub fn new(username: String) -> Result<Self, UsernameError> {
        let username = Self::with_valid_length(username)?;
        let username = Self::with_valid_chars(username)?;
        Ok(Self(username))
    }

    fn with_valid_length(username: String) -> Result<String, UsernameError> {
        let length = username.chars().count();
        if length < Self::MIN_LENGTH {
            Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(username)
        }
    }

    fn with_valid_chars(username: String) -> Result<String, UsernameError> {
        if username
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        {
            Ok(username)
        } else {
            Err(UsernameError::InvalidCharacters)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Phone number value type
///
/// Free-form formatting is kept as entered; only the digit count and the
/// character set are checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    const MIN_DIGITS: usize = 7;
    const MAX_DIGITS: usize = 15;

    pub fn new(phone: String) -> Result<Self, PhoneError> {
        let phone = phone.trim().to_string();

        if !phone
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')'))
        {
            return Err(PhoneError::InvalidCharacters);
        }

        let digits = phone.chars().filter(char::is_ascii_digit).count();
        if !(Self::MIN_DIGITS..=Self::MAX_DIGITS).contains(&digits) {
            return Err(PhoneError::InvalidLength {
                min: Self::MIN_DIGITS,
                max: Self::MAX_DIGITS,
                actual: digits,
            });
        }

        Ok(Self(phone))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Stored Argon2 hash of a user's password.
///
/// Only the credential check reads it. `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    pub fn new(hash: String) -> Self {
        Self(hash)
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Command to create a new user with domain types
pub struct CreateUserCommand {
    pub name: Name,
    pub username: Username,
    pub email: EmailAddress,
    pub phone: PhoneNumber,
    /// Plain text password (hashed by the service, never stored or logged)
    pub password: String,
}

impl fmt::Debug for CreateUserCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateUserCommand")
            .field("name", &self.name)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .finish_non_exhaustive()
    }
}

/// Access token handed out after a successful login.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: User,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_length_limits() {
        assert!(matches!(
            Username::new("al".to_string()),
            Err(UsernameError::TooShort { min: 3, actual: 2 })
        ));
        assert!(matches!(
            Username::new("a".repeat(33)),
            Err(UsernameError::TooLong { max: 32, .. })
        ));
        assert!(Username::new("alice".to_string()).is_ok());
    }

    #[test]
    fn test_username_rejects_spaces_and_symbols() {
        assert_eq!(
            Username::new("alice smith".to_string()),
            Err(UsernameError::InvalidCharacters)
        );
        assert_eq!(
            Username::new("alice$".to_string()),
            Err(UsernameError::InvalidCharacters)
        );
        assert!(Username::new("alice_smith-2".to_string()).is_ok());
    }

    #[test]
    fn test_email_validation() {
        assert!(EmailAddress::new("alice@example.com".to_string()).is_ok());
        assert!(EmailAddress::new("not-an-email".to_string()).is_err());
    }

    #[test]
    fn test_phone_validation() {
        assert!(PhoneNumber::new("+1 (555) 123-4567".to_string()).is_ok());
        assert_eq!(
            PhoneNumber::new("555-CALL-NOW".to_string()),
            Err(PhoneError::InvalidCharacters)
        );
        assert!(matches!(
            PhoneNumber::new("12345".to_string()),
            Err(PhoneError::InvalidLength { actual: 5, .. })
        ));
    }

    #[test]
    fn test_password_hash_debug_is_redacted() {
        let hash = PasswordHash::new("$argon2id$v=19$secret".to_string());
        assert!(!format!("{:?}", hash).contains("argon2id"));
    }

    #[test]
    fn test_link_ignores_duplicates() {
        let mut user = User {
            id: UserId::new(),
            name: Name::new("Alice".to_string()).unwrap(),
            username: Username::new("alice".to_string()).unwrap(),
            email: EmailAddress::new("alice@example.com".to_string()).unwrap(),
            phone: PhoneNumber::new("5551234567".to_string()).unwrap(),
            password_hash: PasswordHash::new("hash".to_string()),
            projects: vec![],
            tasks: vec![],
            teams: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let team = TeamId::new();

        user.link(UserLink::Team(team));
        user.link(UserLink::Team(team));

        assert_eq!(user.teams, vec![team]);
    }
}
