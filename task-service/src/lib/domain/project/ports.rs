use async_trait::async_trait;

use crate::domain::project::models::CreateProjectCommand;
use crate::domain::project::models::Project;
use crate::domain::project::models::ProjectId;
use crate::domain::task::models::TaskId;
use crate::domain::user::models::UserId;
use crate::project::errors::ProjectError;

/// Port for project domain service operations.
#[async_trait]
pub trait ProjectServicePort: Send + Sync + 'static {
    /// Create one or more projects on behalf of `creator`.
    ///
    /// Each new project is linked into the creator's project list.
    ///
    /// # Errors
    /// * `EmptyBatch` - No commands given
    /// * `CreatorNotFound` - Creator does not exist
    /// * `DatabaseError` - Database operation failed
    async fn create_projects(
        &self,
        creator: &UserId,
        commands: Vec<CreateProjectCommand>,
    ) -> Result<Vec<Project>, ProjectError>;

    async fn list_projects(&self) -> Result<Vec<Project>, ProjectError>;

    /// # Errors
    /// * `NotFound` - Project does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_project(&self, id: &ProjectId) -> Result<Project, ProjectError>;

    /// Missing IDs are skipped without error.
    async fn get_projects_by_ids(&self, ids: &[ProjectId]) -> Result<Vec<Project>, ProjectError>;
}

/// Persistence operations for project aggregate.
#[async_trait]
pub trait ProjectRepository: Send + Sync + 'static {
    async fn insert_many(&self, projects: Vec<Project>) -> Result<Vec<Project>, ProjectError>;

    async fn find_all(&self) -> Result<Vec<Project>, ProjectError>;

    async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, ProjectError>;

    async fn find_by_ids(&self, ids: &[ProjectId]) -> Result<Vec<Project>, ProjectError>;

    /// Add a task reference to the project. Adding an existing reference is a
    /// no-op.
    ///
    /// # Errors
    /// * `NotFound` - Project does not exist
    /// * `DatabaseError` - Database operation failed
    async fn add_task(&self, id: &ProjectId, task_id: TaskId) -> Result<(), ProjectError>;
}
