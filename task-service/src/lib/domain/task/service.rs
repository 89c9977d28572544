use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::task::models::CreateTaskCommand;
use crate::domain::task::models::Task;
use crate::domain::task::models::TaskFilter;
use crate::domain::task::models::TaskId;
use crate::domain::task::models::UpdateTaskCommand;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserLink;
use crate::project::ports::ProjectRepository;
use crate::task::errors::TaskError;
use crate::task::ports::TaskRepository;
use crate::task::ports::TaskServicePort;
use crate::team::ports::TeamRepository;
use crate::user::ports::UserRepository;

/// Domain service for tasks.
///
/// Holds the project, team and user stores as well so that references are
/// checked before a task is written and back-links are kept in step.
pub struct TaskService<TR, PR, TM, UR>
where
    TR: TaskRepository,
    PR: ProjectRepository,
    TM: TeamRepository,
    UR: UserRepository,
{
    repository: Arc<TR>,
    project_repository: Arc<PR>,
    team_repository: Arc<TM>,
    user_repository: Arc<UR>,
}

impl<TR, PR, TM, UR> TaskService<TR, PR, TM, UR>
where
    TR: TaskRepository,
    PR: ProjectRepository,
    TM: TeamRepository,
    UR: UserRepository,
{
    pub fn new(
        repository: Arc<TR>,
        project_repository: Arc<PR>,
        team_repository: Arc<TM>,
        user_repository: Arc<UR>,
    ) -> Self {
        Self {
            repository,
            project_repository,
            team_repository,
            user_repository,
        }
    }

    async fn ensure_owners_exist(&self, owners: &[UserId]) -> Result<(), TaskError> {
        let found = self.user_repository.find_by_ids(owners).await?;
        match owners
            .iter()
            .find(|id| !found.iter().any(|user| user.id == **id))
        {
            Some(missing) => Err(TaskError::OwnerNotFound(missing.to_string())),
            None => Ok(()),
        }
    }

    async fn link_owners(&self, task: &Task) -> Result<(), TaskError> {
        for owner in &task.owners {
            self.user_repository
                .link(owner, UserLink::Task(task.id))
                .await?;
        }
        Ok(())
    }
}

fn dedup_owners(owners: Vec<UserId>) -> Vec<UserId> {
    let mut unique = Vec::with_capacity(owners.len());
    for owner in owners {
        if !unique.contains(&owner) {
            unique.push(owner);
        }
    }
    unique
}

#[async_trait]
impl<TR, PR, TM, UR> TaskServicePort for TaskService<TR, PR, TM, UR>
where
    TR: TaskRepository,
    PR: ProjectRepository,
    TM: TeamRepository,
    UR: UserRepository,
{
    async fn create_task(
        &self,
        creator: &UserId,
        command: CreateTaskCommand,
    ) -> Result<Task, TaskError> {
        let owners = if command.owners.is_empty() {
            vec![*creator]
        } else {
            dedup_owners(command.owners)
        };

        if self
            .project_repository
            .find_by_id(&command.project)
            .await?
            .is_none()
        {
            return Err(TaskError::ProjectNotFound(command.project.to_string()));
        }

        if self
            .team_repository
            .find_by_id(&command.team)
            .await?
            .is_none()
        {
            return Err(TaskError::TeamNotFound(command.team.to_string()));
        }

        self.ensure_owners_exist(&owners).await?;

        let now = Utc::now();
        let task = self
            .repository
            .insert(Task {
                id: TaskId::new(),
                name: command.name,
                project: command.project,
                team: command.team,
                owners,
                tags: command.tags,
                time_to_complete: command.time_to_complete,
                status: command.status,
                priority: command.priority,
                created_at: now,
                updated_at: now,
            })
            .await?;

        self.project_repository
            .add_task(&task.project, task.id)
            .await?;
        self.link_owners(&task).await?;

        tracing::info!(
            task_id = %task.id,
            project_id = %task.project,
            owners = task.owners.len(),
            "Task created"
        );

        Ok(task)
    }

    async fn list_tasks(&self, filter: TaskFilter) -> Result<Vec<Task>, TaskError> {
        self.repository.find(&filter).await
    }

    async fn get_task(&self, id: &TaskId) -> Result<Task, TaskError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TaskError::NotFound(id.to_string()))
    }

    async fn get_tasks_by_ids(&self, ids: &[TaskId]) -> Result<Vec<Task>, TaskError> {
        self.repository.find_by_ids(ids).await
    }

    async fn update_task(
        &self,
        id: &TaskId,
        mut update: UpdateTaskCommand,
    ) -> Result<Task, TaskError> {
        if update.is_empty() {
            return Err(TaskError::EmptyUpdate);
        }

        let owners_changed = match update.owners.take() {
            Some(owners) if owners.is_empty() => return Err(TaskError::EmptyOwners),
            Some(owners) => {
                let owners = dedup_owners(owners);
                self.ensure_owners_exist(&owners).await?;
                update.owners = Some(owners);
                true
            }
            None => false,
        };

        let task = self
            .repository
            .find_by_id_and_update(id, update)
            .await?
            .ok_or(TaskError::NotFound(id.to_string()))?;

        if owners_changed {
            self.link_owners(&task).await?;
        }

        tracing::info!(task_id = %task.id, status = %task.status, "Task updated");

        Ok(task)
    }
}
