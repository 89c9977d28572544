use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::project::models::CreateProjectCommand;
use crate::domain::project::models::Project;
use crate::domain::project::models::ProjectId;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserLink;
use crate::project::errors::ProjectError;
use crate::project::ports::ProjectRepository;
use crate::project::ports::ProjectServicePort;
use crate::user::ports::UserRepository;

pub struct ProjectService<PR, UR>
where
    PR: ProjectRepository,
    UR: UserRepository,
{
    repository: Arc<PR>,
    user_repository: Arc<UR>,
}

impl<PR, UR> ProjectService<PR, UR>
where
    PR: ProjectRepository,
    UR: UserRepository,
{
    pub fn new(repository: Arc<PR>, user_repository: Arc<UR>) -> Self {
        Self {
            repository,
            user_repository,
        }
    }
}

#[async_trait]
impl<PR, UR> ProjectServicePort for ProjectService<PR, UR>
where
    PR: ProjectRepository,
    UR: UserRepository,
{
    async fn create_projects(
        &self,
        creator: &UserId,
        commands: Vec<CreateProjectCommand>,
    ) -> Result<Vec<Project>, ProjectError> {
        if commands.is_empty() {
            return Err(ProjectError::EmptyBatch);
        }

        if self.user_repository.find_by_id(creator).await?.is_none() {
            return Err(ProjectError::CreatorNotFound(creator.to_string()));
        }

        let now = Utc::now();
        let projects = commands
            .into_iter()
            .map(|command| Project::from_command(command, now))
            .collect();

        let created = self.repository.insert_many(projects).await?;

        for project in &created {
            self.user_repository
                .link(creator, UserLink::Project(project.id))
                .await?;
        }

        tracing::info!(
            creator = %creator,
            count = created.len(),
            "Projects created"
        );

        Ok(created)
    }

    async fn list_projects(&self) -> Result<Vec<Project>, ProjectError> {
        self.repository.find_all().await
    }

    async fn get_project(&self, id: &ProjectId) -> Result<Project, ProjectError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ProjectError::NotFound(id.to_string()))
    }

    async fn get_projects_by_ids(&self, ids: &[ProjectId]) -> Result<Vec<Project>, ProjectError> {
        self.repository.find_by_ids(ids).await
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::domain::common::Name;
    use crate::domain::common::WorkStatus;
    use crate::test_support::sample_user;
    use crate::test_support::MockTestProjectRepository;
    use crate::test_support::MockTestUserRepository;

    fn command(name: &str) -> CreateProjectCommand {
        CreateProjectCommand {
            name: Name::new(name.to_string()).unwrap(),
            description: String::new(),
            status: WorkStatus::default(),
        }
    }

    #[tokio::test]
    async fn test_create_projects_links_creator() {
        let creator = sample_user("alice");
        let creator_id = creator.id;

        let mut projects = MockTestProjectRepository::new();
        projects
            .expect_insert_many()
            .withf(|projects| projects.len() == 2)
            .times(1)
            .returning(Ok);

        let mut users = MockTestUserRepository::new();
        users
            .expect_find_by_id()
            .with(eq(creator_id))
            .times(1)
            .returning(move |_| Ok(Some(creator.clone())));
        users
            .expect_link()
            .withf(move |id, link| *id == creator_id && matches!(link, UserLink::Project(_)))
            .times(2)
            .returning(|_, _| Ok(()));

        let service = ProjectService::new(Arc::new(projects), Arc::new(users));

        let created = service
            .create_projects(&creator_id, vec![command("Website"), command("Mobile app")])
            .await
            .unwrap();

        assert_eq!(created.len(), 2);
        assert_eq!(created[0].name.as_str(), "Website");
    }

    #[tokio::test]
    async fn test_create_projects_rejects_empty_batch() {
        let mut projects = MockTestProjectRepository::new();
        projects.expect_insert_many().times(0);

        let service = ProjectService::new(
            Arc::new(projects),
            Arc::new(MockTestUserRepository::new()),
        );

        let result = service.create_projects(&UserId::new(), vec![]).await;
        assert!(matches!(result, Err(ProjectError::EmptyBatch)));
    }

    #[tokio::test]
    async fn test_create_projects_unknown_creator() {
        let mut projects = MockTestProjectRepository::new();
        projects.expect_insert_many().times(0);

        let mut users = MockTestUserRepository::new();
        users.expect_find_by_id().times(1).returning(|_| Ok(None));

        let service = ProjectService::new(Arc::new(projects), Arc::new(users));

        let result = service
            .create_projects(&UserId::new(), vec![command("Website")])
            .await;
        assert!(matches!(result, Err(ProjectError::CreatorNotFound(_))));
    }

    #[tokio::test]
    async fn test_get_project_not_found() {
        let mut projects = MockTestProjectRepository::new();
        projects.expect_find_by_id().times(1).returning(|_| Ok(None));

        let service = ProjectService::new(
            Arc::new(projects),
            Arc::new(MockTestUserRepository::new()),
        );

        let result = service.get_project(&ProjectId::new()).await;
        assert!(matches!(result, Err(ProjectError::NotFound(_))));
    }
}
