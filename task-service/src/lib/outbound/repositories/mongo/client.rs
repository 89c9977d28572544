use anyhow::Context;
use bson::doc;
use bson::Document;
use futures::TryStreamExt;
use mongodb::options::IndexOptions;
use mongodb::options::ReturnDocument;
use mongodb::Client;
use mongodb::Collection;
use mongodb::IndexModel;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Index definitions a document type wants on its collection.
pub trait IntoIndexes {
    fn into_indexes() -> Vec<(Document, Option<IndexOptions>)>;
}

/// Connected database handle.
#[derive(Clone)]
pub struct MongoClient {
    client: Client,
    db_name: String,
}

impl MongoClient {
    /// Connect and ping the server so that a bad URL fails at startup.
    pub async fn connect(uri: &str, db_name: &str) -> anyhow::Result<Self> {
        let client = Client::with_uri_str(uri)
            .await
            .context("Failed to create MongoDB client")?;

        client
            .database(db_name)
            .run_command(doc! { "ping": 1 })
            .await
            .context("MongoDB ping failed")?;

        tracing::info!(database = %db_name, "Connected to MongoDB");

        Ok(Self {
            client,
            db_name: db_name.to_string(),
        })
    }

    /// Open a typed collection and apply the indexes its documents declare.
    pub async fn collection<T>(&self, name: &str) -> anyhow::Result<MongoCollection<T>>
    where
        T: Serialize + DeserializeOwned + Unpin + Send + Sync + IntoIndexes,
    {
        let collection = MongoCollection {
            inner: self.client.database(&self.db_name).collection::<T>(name),
        };
        collection
            .apply_indexes()
            .await
            .with_context(|| format!("Failed to create indexes on '{}'", name))?;
        Ok(collection)
    }
}

/// Typed collection exposing the handful of operations the repositories use.
#[derive(Debug, Clone)]
pub struct MongoCollection<T>
where
    T: Send + Sync,
{
    inner: Collection<T>,
}

impl<T> MongoCollection<T>
where
    T: Serialize + DeserializeOwned + Unpin + Send + Sync + IntoIndexes,
{
    async fn apply_indexes(&self) -> mongodb::error::Result<()> {
        let indexes: Vec<IndexModel> = T::into_indexes()
            .into_iter()
            .map(|(keys, options)| IndexModel::builder().keys(keys).options(options).build())
            .collect();

        if indexes.is_empty() {
            return Ok(());
        }

        self.inner.create_indexes(indexes).await?;
        Ok(())
    }

    pub async fn insert_one(&self, document: &T) -> mongodb::error::Result<()> {
        self.inner.insert_one(document).await?;
        Ok(())
    }

    pub async fn insert_many(&self, documents: &[T]) -> mongodb::error::Result<()> {
        if documents.is_empty() {
            return Ok(());
        }
        self.inner.insert_many(documents).await?;
        Ok(())
    }

    pub async fn find_one(&self, filter: Document) -> mongodb::error::Result<Option<T>> {
        self.inner.find_one(filter).await
    }

    pub async fn find(&self, filter: Document) -> mongodb::error::Result<Vec<T>> {
        let cursor = self
            .inner
            .find(filter)
            .sort(doc! { "created_at": 1 })
            .await?;
        cursor.try_collect().await
    }

    /// Apply `update` to the first match; returns whether a document matched.
    pub async fn update_one(
        &self,
        filter: Document,
        update: Document,
    ) -> mongodb::error::Result<bool> {
        let result = self.inner.update_one(filter, update).await?;
        Ok(result.matched_count > 0)
    }

    /// Apply `update` to the first match and return it as it is afterwards.
    pub async fn find_one_and_update(
        &self,
        filter: Document,
        update: Document,
    ) -> mongodb::error::Result<Option<T>> {
        self.inner
            .find_one_and_update(filter, update)
            .return_document(ReturnDocument::After)
            .await
    }
}

/// Name of the unique index a write collided with, if the error is a
/// duplicate-key error.
pub fn duplicate_key_index(error: &mongodb::error::Error) -> Option<String> {
    let message = error.to_string();
    if !message.contains("E11000") && !message.contains("duplicate key") {
        return None;
    }

    let index = message
        .split("index: ")
        .nth(1)
        .and_then(|rest| rest.split_whitespace().next())
        .unwrap_or_default();
    Some(index.to_string())
}
