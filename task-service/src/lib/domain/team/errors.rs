use thiserror::Error;

use crate::domain::common::NameError;
use crate::user::errors::UserError;
use crate::user::errors::UserIdError;

/// Error for TeamId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TeamIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Top-level error for team operations
#[derive(Debug, Clone, Error)]
pub enum TeamError {
    #[error("Invalid team ID: {0}")]
    InvalidTeamId(#[from] TeamIdError),

    #[error("Invalid member ID: {0}")]
    InvalidMemberId(#[from] UserIdError),

    #[error("Invalid name: {0}")]
    InvalidName(#[from] NameError),

    #[error("Team not found: {0}")]
    NotFound(String),

    #[error("Member not found: {0}")]
    MemberNotFound(String),

    #[error(transparent)]
    User(#[from] UserError),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
