use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson, Document};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument};

use super::{DocumentStore, Filter, StoreError, StoreKind, StoreResult};

// =============================================================================
// 1. MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<StoreResult<T>>;

/// Requests served by the [`MemoryStore`] task, each carrying its reply channel.
#[derive(Debug)]
pub enum StoreRequest {
    Insert {
        collection: String,
        document: Document,
        respond_to: Response<ObjectId>,
    },
    Find {
        collection: String,
        filter: Filter,
        limit: i64,
        respond_to: Response<Vec<Document>>,
    },
    FindOne {
        collection: String,
        id: ObjectId,
        respond_to: Response<Option<Document>>,
    },
    ListCollections {
        respond_to: Response<Vec<String>>,
    },
    Shutdown,
}

// =============================================================================
// 2. THE STORE TASK
// =============================================================================

/// In-memory document store owned by a single task.
///
/// Every request is handled in arrival order by [`MemoryStore::run`], so concurrent
/// callers never observe a half-applied write.
pub struct MemoryStore {
    receiver: mpsc::Receiver<StoreRequest>,
    collections: BTreeMap<String, Vec<Document>>,
}

impl MemoryStore {
    pub fn new(buffer_size: usize, database_name: impl Into<String>) -> (Self, MemoryStoreClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let store = Self {
            receiver,
            collections: BTreeMap::new(),
        };
        let client = MemoryStoreClient::new(sender, database_name);
        (store, client)
    }

    #[instrument(name = "memory_store", skip(self))]
    pub async fn run(mut self) {
        info!("MemoryStore starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Insert { collection, document, respond_to } => {
                    let _ = respond_to.send(Ok(self.handle_insert(collection, document)));
                }
                StoreRequest::Find { collection, filter, limit, respond_to } => {
                    let _ = respond_to.send(Ok(self.handle_find(&collection, &filter, limit)));
                }
                StoreRequest::FindOne { collection, id, respond_to } => {
                    let _ = respond_to.send(Ok(self.handle_find_one(&collection, id)));
                }
                StoreRequest::ListCollections { respond_to } => {
                    let _ = respond_to.send(Ok(self.collections.keys().cloned().collect()));
                }
                StoreRequest::Shutdown => {
                    info!("MemoryStore shutting down");
                    break;
                }
            }
        }
        info!("MemoryStore stopped");
    }

    fn handle_insert(&mut self, collection: String, document: Document) -> ObjectId {
        // A caller-provided ObjectId is kept, as MongoDB would.
        let id = match document.get("_id") {
            Some(Bson::ObjectId(id)) => *id,
            _ => ObjectId::new(),
        };

        let mut stored = Document::new();
        stored.insert("_id", id);
        for (key, value) in document {
            if key != "_id" {
                stored.insert(key, value);
            }
        }

        debug!(collection = %collection, id = %id, "Document inserted");
        self.collections.entry(collection).or_default().push(stored);
        id
    }

    fn handle_find(&self, collection: &str, filter: &Filter, limit: i64) -> Vec<Document> {
        let Some(documents) = self.collections.get(collection) else {
            return Vec::new();
        };

        let matching = documents.iter().filter(|document| filter.matches(document));
        let found: Vec<Document> = if limit > 0 {
            matching.take(limit as usize).cloned().collect()
        } else {
            matching.cloned().collect()
        };

        debug!(collection = %collection, count = found.len(), "Find completed");
        found
    }

    fn handle_find_one(&self, collection: &str, id: ObjectId) -> Option<Document> {
        self.collections
            .get(collection)?
            .iter()
            .find(|document| matches!(document.get("_id"), Some(Bson::ObjectId(found)) if *found == id))
            .cloned()
    }
}

// =============================================================================
// 3. THE CLIENT
// =============================================================================

/// Handle to a running [`MemoryStore`]; cheap to clone.
#[derive(Clone)]
pub struct MemoryStoreClient {
    sender: mpsc::Sender<StoreRequest>,
    database_name: Arc<str>,
}

impl MemoryStoreClient {
    pub fn new(sender: mpsc::Sender<StoreRequest>, database_name: impl Into<String>) -> Self {
        let database_name: String = database_name.into();
        Self {
            sender,
            database_name: Arc::from(database_name),
        }
    }

    async fn request<T>(&self, build: impl FnOnce(Response<T>) -> StoreRequest) -> StoreResult<T> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| StoreError::ActorCommunicationError("Store closed".to_string()))?;
        response
            .await
            .map_err(|_| StoreError::ActorCommunicationError("Store dropped".to_string()))?
    }
}

#[async_trait]
impl DocumentStore for MemoryStoreClient {
    async fn insert(&self, collection: &str, document: Document) -> StoreResult<ObjectId> {
        let collection = collection.to_string();
        self.request(|respond_to| StoreRequest::Insert { collection, document, respond_to })
            .await
    }

    async fn find(&self, collection: &str, filter: Filter, limit: i64) -> StoreResult<Vec<Document>> {
        let collection = collection.to_string();
        self.request(|respond_to| StoreRequest::Find { collection, filter, limit, respond_to })
            .await
    }

    async fn find_one(&self, collection: &str, id: ObjectId) -> StoreResult<Option<Document>> {
        let collection = collection.to_string();
        self.request(|respond_to| StoreRequest::FindOne { collection, id, respond_to })
            .await
    }

    async fn list_collection_names(&self) -> StoreResult<Vec<String>> {
        self.request(|respond_to| StoreRequest::ListCollections { respond_to })
            .await
    }

    fn database_name(&self) -> &str {
        &self.database_name
    }

    fn kind(&self) -> StoreKind {
        StoreKind::Memory
    }

    async fn shutdown(&self) -> StoreResult<()> {
        // Already stopped is fine.
        let _ = self.sender.send(StoreRequest::Shutdown).await;
        Ok(())
    }
}
