use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::common::Name;
use crate::domain::common::WorkStatus;
use crate::domain::task::models::TaskId;
use crate::project::errors::ProjectIdError;

/// Project aggregate entity.
#[derive(Debug, Clone)]
pub struct Project {
    pub id: ProjectId,
    pub name: Name,
    pub description: String,
    pub status: WorkStatus,
    pub tasks: Vec<TaskId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    pub fn from_command(command: CreateProjectCommand, now: DateTime<Utc>) -> Self {
        Self {
            id: ProjectId::new(),
            name: command.name,
            description: command.description,
            status: command.status,
            tasks: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Record a task under this project, ignoring duplicates.
    pub fn add_task(&mut self, task_id: TaskId) {
        if !self.tasks.contains(&task_id) {
            self.tasks.push(task_id);
        }
    }
}

/// Project unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProjectId(pub Uuid);

impl ProjectId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a project ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, ProjectIdError> {
        Uuid::parse_str(s)
            .map(ProjectId)
            .map_err(|e| ProjectIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for ProjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to create a project with validated fields
#[derive(Debug, Clone)]
pub struct CreateProjectCommand {
    pub name: Name,
    pub description: String,
    pub status: WorkStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_command_starts_without_tasks() {
        let now = Utc::now();
        let project = Project::from_command(
            CreateProjectCommand {
                name: Name::new("Website".to_string()).unwrap(),
                description: String::new(),
                status: WorkStatus::default(),
            },
            now,
        );

        assert!(project.tasks.is_empty());
        assert_eq!(project.status, WorkStatus::ToDo);
        assert_eq!(project.created_at, project.updated_at);
    }

    #[test]
    fn test_add_task_is_idempotent() {
        let mut project = Project::from_command(
            CreateProjectCommand {
                name: Name::new("Website".to_string()).unwrap(),
                description: String::new(),
                status: WorkStatus::InProgress,
            },
            Utc::now(),
        );
        let task = TaskId::new();

        project.add_task(task);
        project.add_task(task);

        assert_eq!(project.tasks, vec![task]);
    }

    #[test]
    fn test_project_id_parse() {
        let id = ProjectId::new();
        assert_eq!(ProjectId::from_string(&id.to_string()), Ok(id));
        assert!(ProjectId::from_string("not-a-uuid").is_err());
    }
}
