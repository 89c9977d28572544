use async_trait::async_trait;
use bson::doc;
use bson::Document;

use super::client::duplicate_key_index;
use super::client::MongoClient;
use super::client::MongoCollection;
use super::documents::id_filter;
use super::documents::ids_filter;
use super::documents::now;
use super::documents::UserDocument;
use super::documents::EMAIL_INDEX;
use super::documents::USERNAME_INDEX;
use super::documents::USER_COLLECTION;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserLink;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

/// User store backed by the `users` collection.
///
/// Username and email uniqueness rest on the collection's unique indexes,
/// so two racing inserts cannot both succeed.
pub struct MongoUserRepository {
    collection: MongoCollection<UserDocument>,
}

impl MongoUserRepository {
    pub async fn new(client: &MongoClient) -> anyhow::Result<Self> {
        Ok(Self {
            collection: client.collection(USER_COLLECTION).await?,
        })
    }
}

fn database_error(e: mongodb::error::Error) -> UserError {
    UserError::DatabaseError(e.to_string())
}

/// Map a failed insert to the error for the unique index it collided with.
///
/// Only the username and email indexes are user-facing conflicts.
fn insert_error(index: Option<&str>, user: &User, message: String) -> UserError {
    match index {
        Some(EMAIL_INDEX) => UserError::EmailAlreadyExists(user.email.as_str().to_string()),
        Some(USERNAME_INDEX) => UserError::UsernameAlreadyExists(user.username.as_str().to_string()),
        Some(other) => {
            tracing::error!(index = %other, "Unexpected duplicate key on users");
            UserError::DatabaseError(message)
        }
        None => UserError::DatabaseError(message),
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        self.collection
            .insert_one(&UserDocument::from(&user))
            .await
            .map_err(|e| insert_error(duplicate_key_index(&e).as_deref(), &user, e.to_string()))?;

        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        self.collection
            .find_one(id_filter(id))
            .await
            .map_err(database_error)?
            .map(User::try_from)
            .transpose()
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        self.collection
            .find_one(doc! { "username": username.as_str() })
            .await
            .map_err(database_error)?
            .map(User::try_from)
            .transpose()
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, UserError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        self.collection
            .find(ids_filter(ids))
            .await
            .map_err(database_error)?
            .into_iter()
            .map(User::try_from)
            .collect()
    }

    async fn link(&self, id: &UserId, link: UserLink) -> Result<(), UserError> {
        let (field, target) = match link {
            UserLink::Project(project_id) => ("projects", project_id.to_string()),
            UserLink::Task(task_id) => ("tasks", task_id.to_string()),
            UserLink::Team(team_id) => ("teams", team_id.to_string()),
        };

        let mut reference = Document::new();
        reference.insert(field, target);

        let matched = self
            .collection
            .update_one(
                id_filter(id),
                doc! {
                    "$addToSet": reference,
                    "$set": { "updated_at": now() },
                },
            )
            .await
            .map_err(database_error)?;

        if matched {
            Ok(())
        } else {
            Err(UserError::NotFound(id.to_string()))
        }
    }
}
