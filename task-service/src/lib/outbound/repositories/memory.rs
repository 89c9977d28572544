//! Process-local store implementing every repository port.
//!
//! Selected with `database.backend = "memory"`; used by the test suite and
//! for running the service without MongoDB.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::project::models::Project;
use crate::domain::project::models::ProjectId;
use crate::domain::project::ports::ProjectRepository;
use crate::domain::task::models::Task;
use crate::domain::task::models::TaskFilter;
use crate::domain::task::models::TaskId;
use crate::domain::task::models::UpdateTaskCommand;
use crate::domain::task::ports::TaskRepository;
use crate::domain::team::models::Team;
use crate::domain::team::models::TeamId;
use crate::domain::team::ports::TeamRepository;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserLink;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::project::errors::ProjectError;
use crate::task::errors::TaskError;
use crate::team::errors::TeamError;
use crate::user::errors::UserError;

#[derive(Default)]
pub struct InMemoryStore {
    users: RwLock<HashMap<UserId, User>>,
    projects: RwLock<HashMap<ProjectId, Project>>,
    teams: RwLock<HashMap<TeamId, Team>>,
    tasks: RwLock<HashMap<TaskId, Task>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Clone the entries for `ids` that exist, in the order asked for.
fn pick<K, V>(map: &HashMap<K, V>, ids: &[K]) -> Vec<V>
where
    K: std::hash::Hash + Eq,
    V: Clone,
{
    ids.iter().filter_map(|id| map.get(id).cloned()).collect()
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: User) -> Result<User, UserError> {
        // Check and insert under one write guard.
        let mut users = self.users.write().await;

        if users.values().any(|u| u.username == user.username) {
            return Err(UserError::UsernameAlreadyExists(
                user.username.as_str().to_string(),
            ));
        }
        if users.values().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| &u.username == username)
            .cloned())
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, UserError> {
        Ok(pick(&*self.users.read().await, ids))
    }

    async fn link(&self, id: &UserId, link: UserLink) -> Result<(), UserError> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(id)
            .ok_or(UserError::NotFound(id.to_string()))?;
        user.link(link);
        user.updated_at = Utc::now();
        Ok(())
    }
}

#[async_trait]
impl ProjectRepository for InMemoryStore {
    async fn insert_many(&self, projects: Vec<Project>) -> Result<Vec<Project>, ProjectError> {
        let mut stored = self.projects.write().await;
        for project in &projects {
            stored.insert(project.id, project.clone());
        }
        Ok(projects)
    }

    async fn find_all(&self) -> Result<Vec<Project>, ProjectError> {
        let mut projects: Vec<Project> = self.projects.read().await.values().cloned().collect();
        projects.sort_by_key(|p| p.created_at);
        Ok(projects)
    }

    async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, ProjectError> {
        Ok(self.projects.read().await.get(id).cloned())
    }

    async fn find_by_ids(&self, ids: &[ProjectId]) -> Result<Vec<Project>, ProjectError> {
        Ok(pick(&*self.projects.read().await, ids))
    }

    async fn add_task(&self, id: &ProjectId, task_id: TaskId) -> Result<(), ProjectError> {
        let mut projects = self.projects.write().await;
        let project = projects
            .get_mut(id)
            .ok_or(ProjectError::NotFound(id.to_string()))?;
        project.add_task(task_id);
        project.updated_at = Utc::now();
        Ok(())
    }
}

#[async_trait]
impl TeamRepository for InMemoryStore {
    async fn insert(&self, team: Team) -> Result<Team, TeamError> {
        self.teams.write().await.insert(team.id, team.clone());
        Ok(team)
    }

    async fn find_all(&self) -> Result<Vec<Team>, TeamError> {
        let mut teams: Vec<Team> = self.teams.read().await.values().cloned().collect();
        teams.sort_by_key(|t| t.created_at);
        Ok(teams)
    }

    async fn find_by_id(&self, id: &TeamId) -> Result<Option<Team>, TeamError> {
        Ok(self.teams.read().await.get(id).cloned())
    }

    async fn find_by_ids(&self, ids: &[TeamId]) -> Result<Vec<Team>, TeamError> {
        Ok(pick(&*self.teams.read().await, ids))
    }

    async fn add_member(&self, id: &TeamId, user_id: UserId) -> Result<Option<Team>, TeamError> {
        let mut teams = self.teams.write().await;
        Ok(teams.get_mut(id).map(|team| {
            if team.add_member(user_id) {
                team.updated_at = Utc::now();
            }
            team.clone()
        }))
    }
}

#[async_trait]
impl TaskRepository for InMemoryStore {
    async fn insert(&self, task: Task) -> Result<Task, TaskError> {
        self.tasks.write().await.insert(task.id, task.clone());
        Ok(task)
    }

    async fn find(&self, filter: &TaskFilter) -> Result<Vec<Task>, TaskError> {
        let mut tasks: Vec<Task> = self
            .tasks
            .read()
            .await
            .values()
            .filter(|task| filter.matches(task))
            .cloned()
            .collect();
        tasks.sort_by_key(|t| t.created_at);
        Ok(tasks)
    }

    async fn find_by_id(&self, id: &TaskId) -> Result<Option<Task>, TaskError> {
        Ok(self.tasks.read().await.get(id).cloned())
    }

    async fn find_by_ids(&self, ids: &[TaskId]) -> Result<Vec<Task>, TaskError> {
        Ok(pick(&*self.tasks.read().await, ids))
    }

    async fn find_by_id_and_update(
        &self,
        id: &TaskId,
        update: UpdateTaskCommand,
    ) -> Result<Option<Task>, TaskError> {
        let mut tasks = self.tasks.write().await;
        Ok(tasks.get_mut(id).map(|task| {
            task.apply(update, Utc::now());
            task.clone()
        }))
    }
}
