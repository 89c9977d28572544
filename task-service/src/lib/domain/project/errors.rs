use thiserror::Error;

use crate::domain::common::NameError;
use crate::domain::common::WorkStatusError;
use crate::user::errors::UserError;

/// Error for ProjectId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProjectIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Top-level error for project operations
#[derive(Debug, Clone, Error)]
pub enum ProjectError {
    #[error("Invalid project ID: {0}")]
    InvalidProjectId(#[from] ProjectIdError),

    #[error("Invalid name: {0}")]
    InvalidName(#[from] NameError),

    #[error("Invalid status: {0}")]
    InvalidStatus(#[from] WorkStatusError),

    #[error("No projects provided")]
    EmptyBatch,

    #[error("Project not found: {0}")]
    NotFound(String),

    #[error("Creator not found: {0}")]
    CreatorNotFound(String),

    #[error(transparent)]
    User(#[from] UserError),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
