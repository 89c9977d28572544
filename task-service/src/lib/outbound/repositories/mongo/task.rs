use async_trait::async_trait;
use bson::doc;
use bson::Document;

use super::client::MongoClient;
use super::client::MongoCollection;
use super::documents::id_filter;
use super::documents::ids_filter;
use super::documents::now;
use super::documents::TaskDocument;
use super::documents::TASK_COLLECTION;
use crate::domain::task::models::Task;
use crate::domain::task::models::TaskFilter;
use crate::domain::task::models::TaskId;
use crate::domain::task::models::UpdateTaskCommand;
use crate::domain::task::ports::TaskRepository;
use crate::task::errors::TaskError;

pub struct MongoTaskRepository {
    collection: MongoCollection<TaskDocument>,
}

impl MongoTaskRepository {
    pub async fn new(client: &MongoClient) -> anyhow::Result<Self> {
        Ok(Self {
            collection: client.collection(TASK_COLLECTION).await?,
        })
    }
}

fn database_error(e: mongodb::error::Error) -> TaskError {
    TaskError::DatabaseError(e.to_string())
}

fn filter_document(filter: &TaskFilter) -> Document {
    let mut document = Document::new();
    if let Some(project) = filter.project {
        document.insert("project", project.to_string());
    }
    if let Some(team) = filter.team {
        document.insert("team", team.to_string());
    }
    if let Some(owner) = filter.owner {
        document.insert("owners", owner.to_string());
    }
    if let Some(status) = filter.status {
        document.insert("status", status.as_str());
    }
    if let Some(tag) = &filter.tag {
        document.insert("tags", tag.as_str());
    }
    document
}

fn set_document(update: UpdateTaskCommand) -> Document {
    let mut set = doc! { "updated_at": now() };
    if let Some(name) = update.name {
        set.insert("name", name.as_str());
    }
    if let Some(tags) = update.tags {
        set.insert("tags", tags);
    }
    if let Some(time_to_complete) = update.time_to_complete {
        set.insert("time_to_complete", i64::from(time_to_complete.days()));
    }
    if let Some(status) = update.status {
        set.insert("status", status.as_str());
    }
    if let Some(priority) = update.priority {
        set.insert("priority", priority.as_str());
    }
    if let Some(owners) = update.owners {
        let owners: Vec<String> = owners.iter().map(ToString::to_string).collect();
        set.insert("owners", owners);
    }
    set
}

#[async_trait]
impl TaskRepository for MongoTaskRepository {
    async fn insert(&self, task: Task) -> Result<Task, TaskError> {
        self.collection
            .insert_one(&TaskDocument::from(&task))
            .await
            .map_err(database_error)?;
        Ok(task)
    }

    async fn find(&self, filter: &TaskFilter) -> Result<Vec<Task>, TaskError> {
        self.collection
            .find(filter_document(filter))
            .await
            .map_err(database_error)?
            .into_iter()
            .map(Task::try_from)
            .collect()
    }

    async fn find_by_id(&self, id: &TaskId) -> Result<Option<Task>, TaskError> {
        self.collection
            .find_one(id_filter(id))
            .await
            .map_err(database_error)?
            .map(Task::try_from)
            .transpose()
    }

    async fn find_by_ids(&self, ids: &[TaskId]) -> Result<Vec<Task>, TaskError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        self.collection
            .find(ids_filter(ids))
            .await
            .map_err(database_error)?
            .into_iter()
            .map(Task::try_from)
            .collect()
    }

    async fn find_by_id_and_update(
        &self,
        id: &TaskId,
        update: UpdateTaskCommand,
    ) -> Result<Option<Task>, TaskError> {
        self.collection
            .find_one_and_update(id_filter(id), doc! { "$set": set_document(update) })
            .await
            .map_err(database_error)?
            .map(Task::try_from)
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::WorkStatus;
    use crate::domain::task::models::Priority;
    use crate::domain::user::models::UserId;

    #[test]
    fn test_filter_document_only_has_present_fields() {
        let owner = UserId::new();
        let document = filter_document(&TaskFilter {
            owner: Some(owner),
            status: Some(WorkStatus::Blocked),
            ..Default::default()
        });

        assert_eq!(document.len(), 2);
        assert_eq!(document.get_str("owners").unwrap(), owner.to_string());
        assert_eq!(document.get_str("status").unwrap(), "Blocked");
        assert!(filter_document(&TaskFilter::default()).is_empty());
    }

    #[test]
    fn test_set_document_always_bumps_updated_at() {
        let set = set_document(UpdateTaskCommand {
            priority: Some(Priority::Low),
            ..Default::default()
        });

        assert!(set.get_datetime("updated_at").is_ok());
        assert_eq!(set.get_str("priority").unwrap(), "Low");
        assert!(!set.contains_key("name"));
    }
}
