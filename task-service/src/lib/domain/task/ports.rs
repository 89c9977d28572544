use async_trait::async_trait;

use crate::domain::task::models::CreateTaskCommand;
use crate::domain::task::models::Task;
use crate::domain::task::models::TaskFilter;
use crate::domain::task::models::TaskId;
use crate::domain::task::models::UpdateTaskCommand;
use crate::domain::user::models::UserId;
use crate::task::errors::TaskError;

/// Port for task domain service operations.
#[async_trait]
pub trait TaskServicePort: Send + Sync + 'static {
    /// Create a task on behalf of `creator`.
    ///
    /// The referenced project, team and owners must exist. The task is linked
    /// into its project and into every owner's task list.
    ///
    /// # Errors
    /// * `ProjectNotFound` / `TeamNotFound` / `OwnerNotFound` - Dangling reference
    /// * `DatabaseError` - Database operation failed
    async fn create_task(
        &self,
        creator: &UserId,
        command: CreateTaskCommand,
    ) -> Result<Task, TaskError>;

    async fn list_tasks(&self, filter: TaskFilter) -> Result<Vec<Task>, TaskError>;

    /// # Errors
    /// * `NotFound` - Task does not exist
    async fn get_task(&self, id: &TaskId) -> Result<Task, TaskError>;

    /// Missing IDs are skipped without error.
    async fn get_tasks_by_ids(&self, ids: &[TaskId]) -> Result<Vec<Task>, TaskError>;

    /// Apply a partial update and return the updated task.
    ///
    /// # Errors
    /// * `EmptyUpdate` - No field given
    /// * `EmptyOwners` - Owners set to an empty list
    /// * `OwnerNotFound` - A new owner does not exist
    /// * `NotFound` - Task does not exist
    async fn update_task(&self, id: &TaskId, update: UpdateTaskCommand)
        -> Result<Task, TaskError>;
}

/// Persistence operations for task aggregate.
#[async_trait]
pub trait TaskRepository: Send + Sync + 'static {
    async fn insert(&self, task: Task) -> Result<Task, TaskError>;

    async fn find(&self, filter: &TaskFilter) -> Result<Vec<Task>, TaskError>;

    async fn find_by_id(&self, id: &TaskId) -> Result<Option<Task>, TaskError>;

    async fn find_by_ids(&self, ids: &[TaskId]) -> Result<Vec<Task>, TaskError>;

    /// Apply `update` atomically and return the document after the change,
    /// or `None` when no task has this id.
    async fn find_by_id_and_update(
        &self,
        id: &TaskId,
        update: UpdateTaskCommand,
    ) -> Result<Option<Task>, TaskError>;
}
