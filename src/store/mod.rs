//! Document store gateway.
//!
//! [`DocumentStore`] is the seam between the business core and persistence. Two
//! implementations exist: [`MongoStore`] for a real MongoDB deployment and
//! [`MemoryStore`], a single task owning every collection, used when no database is
//! configured and throughout the tests.

pub mod error;
pub mod filter;
pub mod memory;
pub mod mongo;

use std::fmt;

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Document};

pub use error::{StoreError, StoreResult};
pub use filter::Filter;
pub use memory::{MemoryStore, MemoryStoreClient, StoreRequest};
pub use mongo::MongoStore;

/// Which backend is serving a [`DocumentStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    MongoDb,
    Memory,
}

impl StoreKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKind::MongoDb => "mongodb",
            StoreKind::Memory => "memory",
        }
    }
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Persists `document` and returns the identifier the store assigned to it.
    async fn insert(&self, collection: &str, document: Document) -> StoreResult<ObjectId>;

    /// Returns at most `limit` documents matching `filter`. A `limit` of zero means no limit.
    async fn find(&self, collection: &str, filter: Filter, limit: i64) -> StoreResult<Vec<Document>>;

    async fn find_one(&self, collection: &str, id: ObjectId) -> StoreResult<Option<Document>>;

    async fn list_collection_names(&self) -> StoreResult<Vec<String>>;

    fn database_name(&self) -> &str;

    fn kind(&self) -> StoreKind;

    /// Releases the underlying connection or task.
    async fn shutdown(&self) -> StoreResult<()>;
}
