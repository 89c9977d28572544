use thiserror::Error;

use crate::domain::common::NameError;
use crate::domain::common::WorkStatusError;
use crate::project::errors::ProjectError;
use crate::project::errors::ProjectIdError;
use crate::team::errors::TeamError;
use crate::team::errors::TeamIdError;
use crate::user::errors::UserError;
use crate::user::errors::UserIdError;

/// Error for TaskId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for Priority parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown priority '{0}': expected one of 'High', 'Medium', 'Low'")]
pub struct PriorityError(pub String);

/// Error for TimeToComplete validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Time to complete must be a positive number of days, got {0}")]
pub struct TimeToCompleteError(pub i64);

/// Top-level error for task operations
#[derive(Debug, Clone, Error)]
pub enum TaskError {
    #[error("Invalid task ID: {0}")]
    InvalidTaskId(#[from] TaskIdError),

    #[error("Invalid project ID: {0}")]
    InvalidProjectId(#[from] ProjectIdError),

    #[error("Invalid team ID: {0}")]
    InvalidTeamId(#[from] TeamIdError),

    #[error("Invalid owner ID: {0}")]
    InvalidOwnerId(#[from] UserIdError),

    #[error("Invalid name: {0}")]
    InvalidName(#[from] NameError),

    #[error("Invalid status: {0}")]
    InvalidStatus(#[from] WorkStatusError),

    #[error("Invalid priority: {0}")]
    InvalidPriority(#[from] PriorityError),

    #[error("Invalid time to complete: {0}")]
    InvalidTimeToComplete(#[from] TimeToCompleteError),

    #[error("A task needs at least one owner")]
    EmptyOwners,

    #[error("No fields to update")]
    EmptyUpdate,

    // Domain-level errors
    #[error("Task not found: {0}")]
    NotFound(String),

    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("Team not found: {0}")]
    TeamNotFound(String),

    #[error("Owner not found: {0}")]
    OwnerNotFound(String),

    // Errors from the referenced aggregates' stores
    #[error(transparent)]
    Project(#[from] ProjectError),

    #[error(transparent)]
    Team(#[from] TeamError),

    #[error(transparent)]
    User(#[from] UserError),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
