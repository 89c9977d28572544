use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::common::Name;
use crate::domain::user::models::UserId;
use crate::team::errors::TeamIdError;

/// Team aggregate entity.
///
/// `members` never contains the same user twice.
#[derive(Debug, Clone)]
pub struct Team {
    pub id: TeamId,
    pub name: Name,
    pub description: String,
    pub members: Vec<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Team {
    /// Add a member, returning false when already present.
    pub fn add_member(&mut self, user_id: UserId) -> bool {
        if self.members.contains(&user_id) {
            return false;
        }
        self.members.push(user_id);
        true
    }
}

/// Team unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TeamId(pub Uuid);

impl TeamId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, TeamIdError> {
        Uuid::parse_str(s)
            .map(TeamId)
            .map_err(|e| TeamIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for TeamId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to create a team. The creator is added to `members` by the
/// service.
#[derive(Debug, Clone)]
pub struct CreateTeamCommand {
    pub name: Name,
    pub description: String,
    pub members: Vec<UserId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_member_is_idempotent() {
        let mut team = Team {
            id: TeamId::new(),
            name: Name::new("Platform".to_string()).unwrap(),
            description: String::new(),
            members: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let member = UserId::new();

        assert!(team.add_member(member));
        assert!(!team.add_member(member));
        assert_eq!(team.members, vec![member]);
    }
}
