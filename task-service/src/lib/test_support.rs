//! Repository mocks and fixtures shared by the service unit tests.

use async_trait::async_trait;
use chrono::Utc;
use mockall::mock;

use crate::domain::common::Name;
use crate::domain::common::WorkStatus;
use crate::domain::project::models::Project;
use crate::domain::project::models::ProjectId;
use crate::domain::task::models::Task;
use crate::domain::task::models::TaskFilter;
use crate::domain::task::models::TaskId;
use crate::domain::task::models::TimeToComplete;
use crate::domain::task::models::UpdateTaskCommand;
use crate::domain::team::models::Team;
use crate::domain::team::models::TeamId;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::PasswordHash;
use crate::domain::user::models::PhoneNumber;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserLink;
use crate::domain::user::models::Username;
use crate::project::errors::ProjectError;
use crate::project::ports::ProjectRepository;
use crate::task::errors::TaskError;
use crate::task::ports::TaskRepository;
use crate::team::errors::TeamError;
use crate::team::ports::TeamRepository;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;

mock! {
    pub TestUserRepository {}

    #[async_trait]
    impl UserRepository for TestUserRepository {
        async fn create(&self, user: User) -> Result<User, UserError>;
        async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
        async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;
        async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, UserError>;
        async fn link(&self, id: &UserId, link: UserLink) -> Result<(), UserError>;
    }
}

mock! {
    pub TestProjectRepository {}

    #[async_trait]
    impl ProjectRepository for TestProjectRepository {
        async fn insert_many(&self, projects: Vec<Project>) -> Result<Vec<Project>, ProjectError>;
        async fn find_all(&self) -> Result<Vec<Project>, ProjectError>;
        async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, ProjectError>;
        async fn find_by_ids(&self, ids: &[ProjectId]) -> Result<Vec<Project>, ProjectError>;
        async fn add_task(&self, id: &ProjectId, task_id: TaskId) -> Result<(), ProjectError>;
    }
}

mock! {
    pub TestTeamRepository {}

    #[async_trait]
    impl TeamRepository for TestTeamRepository {
        async fn insert(&self, team: Team) -> Result<Team, TeamError>;
        async fn find_all(&self) -> Result<Vec<Team>, TeamError>;
        async fn find_by_id(&self, id: &TeamId) -> Result<Option<Team>, TeamError>;
        async fn find_by_ids(&self, ids: &[TeamId]) -> Result<Vec<Team>, TeamError>;
        async fn add_member(&self, id: &TeamId, user_id: UserId) -> Result<Option<Team>, TeamError>;
    }
}

mock! {
    pub TestTaskRepository {}

    #[async_trait]
    impl TaskRepository for TestTaskRepository {
        async fn insert(&self, task: Task) -> Result<Task, TaskError>;
        async fn find(&self, filter: &TaskFilter) -> Result<Vec<Task>, TaskError>;
        async fn find_by_id(&self, id: &TaskId) -> Result<Option<Task>, TaskError>;
        async fn find_by_ids(&self, ids: &[TaskId]) -> Result<Vec<Task>, TaskError>;
        async fn find_by_id_and_update(
            &self,
            id: &TaskId,
            update: UpdateTaskCommand,
        ) -> Result<Option<Task>, TaskError>;
    }
}

pub fn sample_user(username: &str) -> User {
    let now = Utc::now();
    User {
        id: UserId::new(),
        name: Name::new(format!("{} tester", username)).unwrap(),
        username: Username::new(username.to_string()).unwrap(),
        email: EmailAddress::new(format!("{}@example.com", username)).unwrap(),
        phone: PhoneNumber::new("5551234567".to_string()).unwrap(),
        password_hash: PasswordHash::new("$argon2id$placeholder".to_string()),
        projects: vec![],
        tasks: vec![],
        teams: vec![],
        created_at: now,
        updated_at: now,
    }
}

pub fn sample_project(name: &str) -> Project {
    let now = Utc::now();
    Project {
        id: ProjectId::new(),
        name: Name::new(name.to_string()).unwrap(),
        description: String::new(),
        status: WorkStatus::default(),
        tasks: vec![],
        created_at: now,
        updated_at: now,
    }
}

pub fn sample_team(name: &str, members: Vec<UserId>) -> Team {
    let now = Utc::now();
    Team {
        id: TeamId::new(),
        name: Name::new(name.to_string()).unwrap(),
        description: String::new(),
        members,
        created_at: now,
        updated_at: now,
    }
}

pub fn sample_task(name: &str, project: ProjectId, team: TeamId, owners: Vec<UserId>) -> Task {
    let now = Utc::now();
    Task {
        id: TaskId::new(),
        name: Name::new(name.to_string()).unwrap(),
        project,
        team,
        owners,
        tags: vec![],
        time_to_complete: TimeToComplete::new(1).unwrap(),
        status: WorkStatus::default(),
        priority: None,
        created_at: now,
        updated_at: now,
    }
}
