use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::common::Name;
use crate::domain::common::WorkStatus;
use crate::domain::project::models::ProjectId;
use crate::domain::team::models::TeamId;
use crate::domain::user::models::UserId;
use crate::task::errors::PriorityError;
use crate::task::errors::TaskIdError;
use crate::task::errors::TimeToCompleteError;

/// Task aggregate entity.
///
/// A task always belongs to one project and one team and has at least one
/// owner.
#[derive(Debug, Clone)]
pub struct Task {
    pub id: TaskId,
    pub name: Name,
    pub project: ProjectId,
    pub team: TeamId,
    pub owners: Vec<UserId>,
    pub tags: Vec<String>,
    pub time_to_complete: TimeToComplete,
    pub status: WorkStatus,
    pub priority: Option<Priority>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Overwrite the fields present in `update` and bump `updated_at`.
    pub fn apply(&mut self, update: UpdateTaskCommand, now: DateTime<Utc>) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(tags) = update.tags {
            self.tags = tags;
        }
        if let Some(time_to_complete) = update.time_to_complete {
            self.time_to_complete = time_to_complete;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(priority) = update.priority {
            self.priority = Some(priority);
        }
        if let Some(owners) = update.owners {
            self.owners = owners;
        }
        self.updated_at = now;
    }
}

/// Task unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub Uuid);

impl TaskId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, TaskIdError> {
        Uuid::parse_str(s)
            .map(TaskId)
            .map_err(|e| TaskIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl FromStr for Priority {
    type Err = PriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "High" => Ok(Priority::High),
            "Medium" => Ok(Priority::Medium),
            "Low" => Ok(Priority::Low),
            other => Err(PriorityError(other.to_string())),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Estimated effort in whole days, always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeToComplete(u32);

impl TimeToComplete {
    pub fn new(days: i64) -> Result<Self, TimeToCompleteError> {
        u32::try_from(days)
            .ok()
            .filter(|days| *days > 0)
            .map(Self)
            .ok_or(TimeToCompleteError(days))
    }

    pub fn days(&self) -> u32 {
        self.0
    }
}

/// Trim tags, drop blanks and repeated entries while keeping order.
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && !normalized.iter().any(|t| t == tag) {
            normalized.push(tag.to_string());
        }
    }
    normalized
}

/// Command to create a task with validated fields.
///
/// An empty `owners` list means the creator owns the task.
#[derive(Debug, Clone)]
pub struct CreateTaskCommand {
    pub name: Name,
    pub project: ProjectId,
    pub team: TeamId,
    pub owners: Vec<UserId>,
    pub tags: Vec<String>,
    pub time_to_complete: TimeToComplete,
    pub status: WorkStatus,
    pub priority: Option<Priority>,
}

/// Partial update of a task; `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskCommand {
    pub name: Option<Name>,
    pub tags: Option<Vec<String>>,
    pub time_to_complete: Option<TimeToComplete>,
    pub status: Option<WorkStatus>,
    pub priority: Option<Priority>,
    pub owners: Option<Vec<UserId>>,
}

impl UpdateTaskCommand {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Criteria for listing tasks. Every present field must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub project: Option<ProjectId>,
    pub team: Option<TeamId>,
    pub owner: Option<UserId>,
    pub status: Option<WorkStatus>,
    pub tag: Option<String>,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        self.project.map_or(true, |project| task.project == project)
            && self.team.map_or(true, |team| task.team == team)
            && self.owner.map_or(true, |owner| task.owners.contains(&owner))
            && self.status.map_or(true, |status| task.status == status)
            && self
                .tag
                .as_ref()
                .map_or(true, |tag| task.tags.iter().any(|t| t == tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task() -> Task {
        Task {
            id: TaskId::new(),
            name: Name::new("Write docs".to_string()).unwrap(),
            project: ProjectId::new(),
            team: TeamId::new(),
            owners: vec![UserId::new()],
            tags: vec!["docs".to_string()],
            time_to_complete: TimeToComplete::new(3).unwrap(),
            status: WorkStatus::ToDo,
            priority: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_time_to_complete_must_be_positive() {
        assert_eq!(TimeToComplete::new(5).unwrap().days(), 5);
        assert_eq!(TimeToComplete::new(0), Err(TimeToCompleteError(0)));
        assert_eq!(TimeToComplete::new(-2), Err(TimeToCompleteError(-2)));
        assert!(TimeToComplete::new(i64::MAX).is_err());
    }

    #[test]
    fn test_priority_parse() {
        assert_eq!("High".parse::<Priority>(), Ok(Priority::High));
        assert!("Urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn test_normalize_tags() {
        let tags = normalize_tags(vec![
            " docs ".to_string(),
            "".to_string(),
            "docs".to_string(),
            "backend".to_string(),
        ]);
        assert_eq!(tags, vec!["docs".to_string(), "backend".to_string()]);
    }

    #[test]
    fn test_apply_only_touches_present_fields() {
        let mut task = task();
        let original_name = task.name.clone();
        let before = task.updated_at;

        task.apply(
            UpdateTaskCommand {
                status: Some(WorkStatus::Completed),
                priority: Some(Priority::Low),
                ..Default::default()
            },
            before + chrono::Duration::seconds(5),
        );

        assert_eq!(task.name, original_name);
        assert_eq!(task.status, WorkStatus::Completed);
        assert_eq!(task.priority, Some(Priority::Low));
        assert!(task.updated_at > before);
    }

    #[test]
    fn test_empty_update() {
        assert!(UpdateTaskCommand::default().is_empty());
        assert!(!UpdateTaskCommand {
            tags: Some(vec![]),
            ..Default::default()
        }
        .is_empty());
    }

    #[test]
    fn test_filter_matches_all_present_fields() {
        let task = task();
        let owner = task.owners[0];

        assert!(TaskFilter::default().matches(&task));
        assert!(TaskFilter {
            owner: Some(owner),
            tag: Some("docs".to_string()),
            ..Default::default()
        }
        .matches(&task));
        assert!(!TaskFilter {
            owner: Some(owner),
            status: Some(WorkStatus::Blocked),
            ..Default::default()
        }
        .matches(&task));
        assert!(!TaskFilter {
            project: Some(ProjectId::new()),
            ..Default::default()
        }
        .matches(&task));
    }
}
