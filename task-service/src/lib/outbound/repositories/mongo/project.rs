use async_trait::async_trait;
use bson::doc;

use super::client::MongoClient;
use super::client::MongoCollection;
use super::documents::id_filter;
use super::documents::ids_filter;
use super::documents::now;
use super::documents::ProjectDocument;
use super::documents::PROJECT_COLLECTION;
use crate::domain::project::models::Project;
use crate::domain::project::models::ProjectId;
use crate::domain::project::ports::ProjectRepository;
use crate::domain::task::models::TaskId;
use crate::project::errors::ProjectError;

pub struct MongoProjectRepository {
    collection: MongoCollection<ProjectDocument>,
}

impl MongoProjectRepository {
    pub async fn new(client: &MongoClient) -> anyhow::Result<Self> {
        Ok(Self {
            collection: client.collection(PROJECT_COLLECTION).await?,
        })
    }
}

fn database_error(e: mongodb::error::Error) -> ProjectError {
    ProjectError::DatabaseError(e.to_string())
}

#[async_trait]
impl ProjectRepository for MongoProjectRepository {
    async fn insert_many(&self, projects: Vec<Project>) -> Result<Vec<Project>, ProjectError> {
        let documents: Vec<ProjectDocument> = projects.iter().map(ProjectDocument::from).collect();

        self.collection
            .insert_many(&documents)
            .await
            .map_err(database_error)?;

        Ok(projects)
    }

    async fn find_all(&self) -> Result<Vec<Project>, ProjectError> {
        self.collection
            .find(doc! {})
            .await
            .map_err(database_error)?
            .into_iter()
            .map(Project::try_from)
            .collect()
    }

    async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, ProjectError> {
        self.collection
            .find_one(id_filter(id))
            .await
            .map_err(database_error)?
            .map(Project::try_from)
            .transpose()
    }

    async fn find_by_ids(&self, ids: &[ProjectId]) -> Result<Vec<Project>, ProjectError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        self.collection
            .find(ids_filter(ids))
            .await
            .map_err(database_error)?
            .into_iter()
            .map(Project::try_from)
            .collect()
    }

    async fn add_task(&self, id: &ProjectId, task_id: TaskId) -> Result<(), ProjectError> {
        let matched = self
            .collection
            .update_one(
                id_filter(id),
                doc! {
                    "$addToSet": { "tasks": task_id.to_string() },
                    "$set": { "updated_at": now() },
                },
            )
            .await
            .map_err(database_error)?;

        if matched {
            Ok(())
        } else {
            Err(ProjectError::NotFound(id.to_string()))
        }
    }
}
