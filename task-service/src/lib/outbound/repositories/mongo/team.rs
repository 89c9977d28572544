use async_trait::async_trait;
use bson::doc;

use super::client::MongoClient;
use super::client::MongoCollection;
use super::documents::id_filter;
use super::documents::ids_filter;
use super::documents::now;
use super::documents::TeamDocument;
use super::documents::TEAM_COLLECTION;
use crate::domain::team::models::Team;
use crate::domain::team::models::TeamId;
use crate::domain::team::ports::TeamRepository;
use crate::domain::user::models::UserId;
use crate::team::errors::TeamError;

pub struct MongoTeamRepository {
    collection: MongoCollection<TeamDocument>,
}

impl MongoTeamRepository {
    pub async fn new(client: &MongoClient) -> anyhow::Result<Self> {
        Ok(Self {
            collection: client.collection(TEAM_COLLECTION).await?,
        })
    }
}

fn database_error(e: mongodb::error::Error) -> TeamError {
    TeamError::DatabaseError(e.to_string())
}

#[async_trait]
impl TeamRepository for MongoTeamRepository {
    async fn insert(&self, team: Team) -> Result<Team, TeamError> {
        self.collection
            .insert_one(&TeamDocument::from(&team))
            .await
            .map_err(database_error)?;
        Ok(team)
    }

    async fn find_all(&self) -> Result<Vec<Team>, TeamError> {
        self.collection
            .find(doc! {})
            .await
            .map_err(database_error)?
            .into_iter()
            .map(Team::try_from)
            .collect()
    }

    async fn find_by_id(&self, id: &TeamId) -> Result<Option<Team>, TeamError> {
        self.collection
            .find_one(id_filter(id))
            .await
            .map_err(database_error)?
            .map(Team::try_from)
            .transpose()
    }

    async fn find_by_ids(&self, ids: &[TeamId]) -> Result<Vec<Team>, TeamError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        self.collection
            .find(ids_filter(ids))
            .await
            .map_err(database_error)?
            .into_iter()
            .map(Team::try_from)
            .collect()
    }

    async fn add_member(&self, id: &TeamId, user_id: UserId) -> Result<Option<Team>, TeamError> {
        self.collection
            .find_one_and_update(
                id_filter(id),
                doc! {
                    "$addToSet": { "members": user_id.to_string() },
                    "$set": { "updated_at": now() },
                },
            )
            .await
            .map_err(database_error)?
            .map(Team::try_from)
            .transpose()
    }
}
