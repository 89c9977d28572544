//! JSON shapes shared by several handlers.
//!
//! User views never carry the password hash.

use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::project::models::Project;
use crate::domain::task::models::Task;
use crate::domain::team::models::Team;
use crate::domain::user::models::User;

fn strings<I: ToString>(ids: &[I]) -> Vec<String> {
    ids.iter().map(ToString::to_string).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: String,
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub projects: Vec<String>,
    pub tasks: Vec<String>,
    pub teams: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.as_str().to_string(),
            username: user.username.as_str().to_string(),
            email: user.email.as_str().to_string(),
            phone: user.phone.as_str().to_string(),
            projects: strings(&user.projects),
            tasks: strings(&user.tasks),
            teams: strings(&user.teams),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Compact user view used when another document is populated with users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberData {
    pub id: String,
    pub name: String,
    pub username: String,
    pub email: String,
}

impl From<&User> for MemberData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.as_str().to_string(),
            username: user.username.as_str().to_string(),
            email: user.email.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectData {
    pub id: String,
    pub name: String,
    pub description: String,
    pub status: String,
    pub tasks: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Project> for ProjectData {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id.to_string(),
            name: project.name.as_str().to_string(),
            description: project.description.clone(),
            status: project.status.as_str().to_string(),
            tasks: strings(&project.tasks),
            created_at: project.created_at,
            updated_at: project.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamData {
    pub id: String,
    pub name: String,
    pub description: String,
    pub members: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Team> for TeamData {
    fn from(team: &Team) -> Self {
        Self {
            id: team.id.to_string(),
            name: team.name.as_str().to_string(),
            description: team.description.clone(),
            members: strings(&team.members),
            created_at: team.created_at,
            updated_at: team.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskData {
    pub id: String,
    pub name: String,
    pub project: String,
    pub team: String,
    pub owners: Vec<String>,
    pub tags: Vec<String>,
    pub time_to_complete: u32,
    pub status: String,
    pub priority: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Task> for TaskData {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.to_string(),
            name: task.name.as_str().to_string(),
            project: task.project.to_string(),
            team: task.team.to_string(),
            owners: strings(&task.owners),
            tags: task.tags.clone(),
            time_to_complete: task.time_to_complete.days(),
            status: task.status.as_str().to_string(),
            priority: task.priority.map(|p| p.as_str().to_string()),
            created_at: task.created_at,
            updated_at: task.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_user;

    #[test]
    fn test_user_view_has_no_password_field() {
        let json = serde_json::to_value(UserData::from(&sample_user("alice"))).unwrap();

        assert!(json.get("password_hash").is_none());
        assert!(json.get("password").is_none());
        assert_eq!(json["username"], "alice");
        assert!(!json.to_string().contains("argon2"));
    }
}
