use bson::doc;
use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use bson::Document;
use chrono::DateTime;
use chrono::Utc;
use mongodb::options::IndexOptions;
use serde::Deserialize;
use serde::Serialize;

use super::client::IntoIndexes;
use crate::domain::common::Name;
use crate::domain::project::models::Project;
use crate::domain::project::models::ProjectId;
use crate::domain::task::models::Task;
use crate::domain::task::models::TaskId;
use crate::domain::task::models::TimeToComplete;
use crate::domain::team::models::Team;
use crate::domain::team::models::TeamId;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::PasswordHash;
use crate::domain::user::models::PhoneNumber;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::project::errors::ProjectError;
use crate::task::errors::TaskError;
use crate::team::errors::TeamError;
use crate::user::errors::UserError;

pub const USER_COLLECTION: &str = "users";
pub const PROJECT_COLLECTION: &str = "projects";
pub const TEAM_COLLECTION: &str = "teams";
pub const TASK_COLLECTION: &str = "tasks";

pub const USERNAME_INDEX: &str = "username_unique";
pub const EMAIL_INDEX: &str = "email_unique";

pub fn id_filter(id: impl ToString) -> Document {
    doc! { "_id": id.to_string() }
}

pub fn ids_filter<I: ToString>(ids: &[I]) -> Document {
    let ids: Vec<String> = ids.iter().map(ToString::to_string).collect();
    doc! { "_id": { "$in": ids } }
}

pub fn now() -> bson::DateTime {
    bson::DateTime::from_chrono(Utc::now())
}

fn to_strings<I: ToString>(ids: &[I]) -> Vec<String> {
    ids.iter().map(ToString::to_string).collect()
}

fn parse_all<I, E>(ids: Vec<String>, parse: impl Fn(&str) -> Result<I, E>) -> Result<Vec<I>, E> {
    ids.iter().map(|id| parse(id)).collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub password_hash: String,
    #[serde(default)]
    pub projects: Vec<String>,
    #[serde(default)]
    pub tasks: Vec<String>,
    #[serde(default)]
    pub teams: Vec<String>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl IntoIndexes for UserDocument {
    fn into_indexes() -> Vec<(Document, Option<IndexOptions>)> {
        vec![
            (
                doc! { "username": 1 },
                Some(
                    IndexOptions::builder()
                        .unique(true)
                        .name(USERNAME_INDEX.to_string())
                        .build(),
                ),
            ),
            (
                doc! { "email": 1 },
                Some(
                    IndexOptions::builder()
                        .unique(true)
                        .name(EMAIL_INDEX.to_string())
                        .build(),
                ),
            ),
        ]
    }
}

impl From<&User> for UserDocument {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.as_str().to_string(),
            username: user.username.as_str().to_string(),
            email: user.email.as_str().to_string(),
            phone: user.phone.as_str().to_string(),
            password_hash: user.password_hash.expose().to_string(),
            projects: to_strings(&user.projects),
            tasks: to_strings(&user.tasks),
            teams: to_strings(&user.teams),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl TryFrom<UserDocument> for User {
    type Error = UserError;

    fn try_from(document: UserDocument) -> Result<Self, Self::Error> {
        let stored = |e: String| UserError::DatabaseError(format!("Malformed user document: {}", e));

        Ok(User {
            id: UserId::from_string(&document.id)?,
            name: Name::new(document.name)?,
            username: Username::new(document.username)?,
            email: EmailAddress::new(document.email)?,
            phone: PhoneNumber::new(document.phone)?,
            password_hash: PasswordHash::new(document.password_hash),
            projects: parse_all(document.projects, ProjectId::from_string)
                .map_err(|e| stored(e.to_string()))?,
            tasks: parse_all(document.tasks, TaskId::from_string)
                .map_err(|e| stored(e.to_string()))?,
            teams: parse_all(document.teams, TeamId::from_string)
                .map_err(|e| stored(e.to_string()))?,
            created_at: document.created_at,
            updated_at: document.updated_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub status: String,
    #[serde(default)]
    pub tasks: Vec<String>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl IntoIndexes for ProjectDocument {
    fn into_indexes() -> Vec<(Document, Option<IndexOptions>)> {
        vec![]
    }
}

impl From<&Project> for ProjectDocument {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id.to_string(),
            name: project.name.as_str().to_string(),
            description: project.description.clone(),
            status: project.status.as_str().to_string(),
            tasks: to_strings(&project.tasks),
            created_at: project.created_at,
            updated_at: project.updated_at,
        }
    }
}

impl TryFrom<ProjectDocument> for Project {
    type Error = ProjectError;

    fn try_from(document: ProjectDocument) -> Result<Self, Self::Error> {
        Ok(Project {
            id: ProjectId::from_string(&document.id)?,
            name: Name::new(document.name)?,
            description: document.description,
            status: document.status.parse()?,
            tasks: parse_all(document.tasks, TaskId::from_string)
                .map_err(|e| ProjectError::DatabaseError(e.to_string()))?,
            created_at: document.created_at,
            updated_at: document.updated_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub members: Vec<String>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl IntoIndexes for TeamDocument {
    fn into_indexes() -> Vec<(Document, Option<IndexOptions>)> {
        vec![(
            doc! { "members": 1 },
            Some(
                IndexOptions::builder()
                    .name("members_index".to_string())
                    .build(),
            ),
        )]
    }
}

impl From<&Team> for TeamDocument {
    fn from(team: &Team) -> Self {
        Self {
            id: team.id.to_string(),
            name: team.name.as_str().to_string(),
            description: team.description.clone(),
            members: to_strings(&team.members),
            created_at: team.created_at,
            updated_at: team.updated_at,
        }
    }
}

impl TryFrom<TeamDocument> for Team {
    type Error = TeamError;

    fn try_from(document: TeamDocument) -> Result<Self, Self::Error> {
        Ok(Team {
            id: TeamId::from_string(&document.id)?,
            name: Name::new(document.name)?,
            description: document.description,
            members: parse_all(document.members, UserId::from_string)?,
            created_at: document.created_at,
            updated_at: document.updated_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub project: String,
    pub team: String,
    pub owners: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub time_to_complete: i64,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl IntoIndexes for TaskDocument {
    fn into_indexes() -> Vec<(Document, Option<IndexOptions>)> {
        vec![
            (
                doc! { "project": 1 },
                Some(
                    IndexOptions::builder()
                        .name("project_index".to_string())
                        .build(),
                ),
            ),
            (
                doc! { "owners": 1 },
                Some(
                    IndexOptions::builder()
                        .name("owners_index".to_string())
                        .build(),
                ),
            ),
        ]
    }
}

impl From<&Task> for TaskDocument {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.to_string(),
            name: task.name.as_str().to_string(),
            project: task.project.to_string(),
            team: task.team.to_string(),
            owners: to_strings(&task.owners),
            tags: task.tags.clone(),
            time_to_complete: i64::from(task.time_to_complete.days()),
            status: task.status.as_str().to_string(),
            priority: task.priority.map(|p| p.as_str().to_string()),
            created_at: task.created_at,
            updated_at: task.updated_at,
        }
    }
}

impl TryFrom<TaskDocument> for Task {
    type Error = TaskError;

    fn try_from(document: TaskDocument) -> Result<Self, Self::Error> {
        Ok(Task {
            id: TaskId::from_string(&document.id)?,
            name: Name::new(document.name)?,
            project: ProjectId::from_string(&document.project)?,
            team: TeamId::from_string(&document.team)?,
            owners: parse_all(document.owners, UserId::from_string)?,
            tags: document.tags,
            time_to_complete: TimeToComplete::new(document.time_to_complete)?,
            status: document.status.parse()?,
            priority: document.priority.map(|p| p.parse()).transpose()?,
            created_at: document.created_at,
            updated_at: document.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::WorkStatus;
    use crate::domain::task::models::Priority;
    use crate::test_support::sample_task;
    use crate::test_support::sample_user;

    #[test]
    fn test_user_document_keeps_references() {
        let mut user = sample_user("alice");
        user.projects.push(ProjectId::new());
        user.teams.push(TeamId::new());

        let document = UserDocument::from(&user);
        assert_eq!(document.id, user.id.to_string());
        assert_eq!(document.projects, vec![user.projects[0].to_string()]);

        let restored = User::try_from(document).unwrap();
        assert_eq!(restored.id, user.id);
        assert_eq!(restored.teams, user.teams);
        assert_eq!(restored.password_hash, user.password_hash);
    }

    #[test]
    fn test_task_document_labels() {
        let mut task = sample_task("Ship", ProjectId::new(), TeamId::new(), vec![UserId::new()]);
        task.status = WorkStatus::InProgress;
        task.priority = Some(Priority::High);

        let document = TaskDocument::from(&task);
        assert_eq!(document.status, "In Progress");
        assert_eq!(document.priority.as_deref(), Some("High"));

        let restored = Task::try_from(document).unwrap();
        assert_eq!(restored.status, WorkStatus::InProgress);
        assert_eq!(restored.priority, Some(Priority::High));
    }

    #[test]
    fn test_malformed_reference_is_rejected() {
        let mut document = UserDocument::from(&sample_user("alice"));
        document.tasks.push("not-a-uuid".to_string());

        assert!(matches!(
            User::try_from(document),
            Err(UserError::DatabaseError(_))
        ));
    }

    #[test]
    fn test_user_document_bson_shape() {
        let user = sample_user("alice");
        let document = bson::to_document(&UserDocument::from(&user)).unwrap();

        assert_eq!(document.get_str("_id").unwrap(), user.id.to_string());
        assert!(document.get_datetime("created_at").is_ok());
    }
}
