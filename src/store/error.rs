use thiserror::Error;

/// Failures talking to the document store.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error("Store connection error: {0}")]
    ConnectionError(String),
    #[error("Store query error: {0}")]
    QueryError(String),
    #[error("Document serialization error: {0}")]
    SerializationError(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<mongodb::error::Error> for StoreError {
    fn from(error: mongodb::error::Error) -> Self {
        StoreError::QueryError(error.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for StoreError {
    fn from(error: mongodb::bson::ser::Error) -> Self {
        StoreError::SerializationError(error.to_string())
    }
}
