//! # Mock Framework
//!
//! Utilities for testing clients without a running store.
//!
//! Use [`create_mock_store`] to get a store handle and the receiver its requests land on.
//! Then use helpers like [`expect_insert`] or [`expect_find`] to assert what was sent
//! and reply with whatever the test needs.

use std::sync::Arc;

use mongodb::bson::{oid::ObjectId, Document};
use tokio::sync::mpsc;

use crate::store::memory::Response;
use crate::store::{DocumentStore, Filter, MemoryStoreClient, StoreRequest};

/// Creates a store handle whose requests arrive on the returned receiver.
///
/// Nothing serves the receiver except the test itself, so it decides every reply,
/// including failures and dropped replies.
pub fn create_mock_store(buffer_size: usize) -> (Arc<dyn DocumentStore>, mpsc::Receiver<StoreRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (Arc::new(MemoryStoreClient::new(sender, "mock")), receiver)
}

/// Helper to verify that the next message is an Insert request
pub async fn expect_insert(
    receiver: &mut mpsc::Receiver<StoreRequest>,
) -> Option<(String, Document, Response<ObjectId>)> {
    match receiver.recv().await {
        Some(StoreRequest::Insert { collection, document, respond_to }) => {
            Some((collection, document, respond_to))
        }
        _ => None,
    }
}

/// Helper to verify that the next message is a Find request
pub async fn expect_find(
    receiver: &mut mpsc::Receiver<StoreRequest>,
) -> Option<(String, Filter, i64, Response<Vec<Document>>)> {
    match receiver.recv().await {
        Some(StoreRequest::Find { collection, filter, limit, respond_to }) => {
            Some((collection, filter, limit, respond_to))
        }
        _ => None,
    }
}

/// Helper to verify that the next message is a FindOne request
pub async fn expect_find_one(
    receiver: &mut mpsc::Receiver<StoreRequest>,
) -> Option<(String, ObjectId, Response<Option<Document>>)> {
    match receiver.recv().await {
        Some(StoreRequest::FindOne { collection, id, respond_to }) => Some((collection, id, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[tokio::test]
    async fn test_mock_store() {
        let (store, mut receiver) = create_mock_store(10);

        let insert_task = tokio::spawn(async move { store.insert("product", doc! { "title": "Test" }).await });

        let (collection, document, responder) =
            expect_insert(&mut receiver).await.expect("Expected Insert request");
        assert_eq!(collection, "product");
        assert_eq!(document.get_str("title").unwrap(), "Test");

        let id = ObjectId::new();
        responder.send(Ok(id)).unwrap();

        let result = insert_task.await.unwrap();
        assert_eq!(result, Ok(id));
    }

    #[tokio::test]
    async fn test_unexpected_request_is_none() {
        let (store, mut receiver) = create_mock_store(10);

        tokio::spawn(async move {
            let _ = store.list_collection_names().await;
        });

        assert!(expect_find(&mut receiver).await.is_none());
    }
}
