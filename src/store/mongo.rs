use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    options::ClientOptions,
    Client, Database,
};
use tracing::{debug, info, instrument, warn};

use super::{DocumentStore, Filter, StoreError, StoreKind, StoreResult};

const APP_NAME: &str = "shop-api";

/// MongoDB-backed gateway. The driver pools connections internally, so one instance is
/// shared by every request.
pub struct MongoStore {
    client: Client,
    database: Database,
}

impl MongoStore {
    /// Parses `url`, builds the client and pings the server.
    ///
    /// The driver connects lazily, so an unreachable server only produces a warning
    /// here; individual requests surface the failure.
    #[instrument(skip(url))]
    pub async fn connect(url: &str, database_name: &str) -> StoreResult<Self> {
        let mut options = ClientOptions::parse(url)
            .await
            .map_err(|e| StoreError::ConnectionError(e.to_string()))?;
        options.app_name = Some(APP_NAME.to_string());

        let client =
            Client::with_options(options).map_err(|e| StoreError::ConnectionError(e.to_string()))?;
        let database = client.database(database_name);

        match database.run_command(doc! { "ping": 1 }).await {
            Ok(_) => info!("Connected to MongoDB"),
            Err(e) => warn!(error = %e, "MongoDB ping failed, continuing with lazy connection"),
        }

        Ok(Self { client, database })
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn insert(&self, collection: &str, document: Document) -> StoreResult<ObjectId> {
        let result = self
            .database
            .collection::<Document>(collection)
            .insert_one(document)
            .await?;

        result.inserted_id.as_object_id().ok_or_else(|| {
            StoreError::QueryError(format!(
                "Inserted id is not an ObjectId: {}",
                result.inserted_id
            ))
        })
    }

    async fn find(&self, collection: &str, filter: Filter, limit: i64) -> StoreResult<Vec<Document>> {
        let query = filter.to_document();
        debug!(collection = %collection, query = %query, limit, "Running find");

        let cursor = self
            .database
            .collection::<Document>(collection)
            .find(query)
            .limit(limit)
            .await?;

        Ok(cursor.try_collect().await?)
    }

    async fn find_one(&self, collection: &str, id: ObjectId) -> StoreResult<Option<Document>> {
        Ok(self
            .database
            .collection::<Document>(collection)
            .find_one(doc! { "_id": id })
            .await?)
    }

    async fn list_collection_names(&self) -> StoreResult<Vec<String>> {
        Ok(self.database.list_collection_names().await?)
    }

    fn database_name(&self) -> &str {
        self.database.name()
    }

    fn kind(&self) -> StoreKind {
        StoreKind::MongoDb
    }

    async fn shutdown(&self) -> StoreResult<()> {
        info!("Closing MongoDB client");
        self.client.clone().shutdown().await;
        Ok(())
    }
}
