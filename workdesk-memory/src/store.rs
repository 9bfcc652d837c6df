//! In-memory storage implementation for document stores.
//!
//! Collections are kept as insertion-ordered vectors of BSON documents behind
//! an async-safe read-write lock.

use std::{collections::BTreeMap, sync::Arc};
use async_trait::async_trait;
use mea::rwlock::RwLock;
use bson::{Bson, Document, doc, oid::ObjectId};
use tracing::debug;

use workdesk_core::{
    query::Query,
    error::StoreResult,
    backend::{StoreBackend, StoreBackendBuilder},
};

use crate::evaluator::DocumentEvaluator;

type StoreMap = BTreeMap<String, Vec<Document>>;


/// Thread-safe in-memory document storage backend.
///
/// # Thread Safety
///
/// `InMemoryStore` is cloneable and uses an `Arc`-wrapped internal state, allowing
/// it to be safely shared across async tasks. Multiple clones of the same instance
/// share the same underlying data.
///
/// # Identifiers
///
/// Documents inserted without an `_id` get a fresh [`ObjectId`], the same kind
/// of identifier MongoDB generates.
///
/// # Performance
///
/// Queries scan the collection in insertion order and stop once the limit is
/// reached. Intended for development and tests.
///
/// # Example
///
/// ```ignore
/// use workdesk_memory::InMemoryStore;
/// use workdesk_core::{backend::StoreBackend, query::Query};
/// use bson::doc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = InMemoryStore::new();
///
///     let id = store.insert_document(doc! { "name": "Acme" }, "company").await?;
///     let companies = store.query_documents(Query::new(), "company").await?;
///     assert_eq!(companies.len(), 1);
///
///     Ok(())
/// }
/// ```
#[derive(Default, Clone, Debug)]
pub struct InMemoryStore {
    /// collection_name -> documents in insertion order
    store: Arc<RwLock<StoreMap>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory document store.
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(StoreMap::new())),
        }
    }

    /// Creates a builder for constructing an `InMemoryStore`.
    pub fn builder() -> InMemoryStoreBuilder {
        InMemoryStoreBuilder::default()
    }
}


#[async_trait]
impl StoreBackend for InMemoryStore {
    async fn insert_document(&self, document: Document, collection: &str) -> StoreResult<Bson> {
        let id = document
            .get("_id")
            .cloned()
            .unwrap_or_else(|| Bson::ObjectId(ObjectId::new()));

        // `_id` leads the stored document, as it does in MongoDB
        let mut stored = doc! { "_id": id.clone() };
        for (key, value) in document {
            if key != "_id" {
                stored.insert(key, value);
            }
        }

        self.store
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(stored);

        debug!(collection, id = %id, "stored document in memory");

        Ok(id)
    }

    async fn query_documents(&self, query: Query, collection: &str) -> StoreResult<Vec<Document>> {
        let store = self.store.read().await;
        let documents = match store.get(collection) {
            Some(col) => col,
            None => return Ok(vec![]),
        };

        Ok(DocumentEvaluator::filter_documents(
            documents,
            &query.filter,
            query.limit.unwrap_or(usize::MAX),
        ))
    }

    async fn list_collections(&self) -> StoreResult<Vec<String>> {
        Ok(
            self.store
                .read()
                .await
                .keys()
                .cloned()
                .collect()
        )
    }
}


/// Builder for constructing [`InMemoryStore`] instances.
///
/// # Example
///
/// ```ignore
/// use workdesk_memory::InMemoryStore;
/// use workdesk_core::backend::StoreBackendBuilder;
///
/// #[tokio::main]
/// async fn main() {
///     let store = InMemoryStore::builder().build().await.unwrap();
/// }
/// ```
#[derive(Default)]
pub struct InMemoryStoreBuilder;

#[async_trait]
impl StoreBackendBuilder for InMemoryStoreBuilder {
    type Backend = InMemoryStore;

    /// Builds and returns a new [`InMemoryStore`] instance.
    ///
    /// This always succeeds and returns a freshly initialized store.
    async fn build(self) -> StoreResult<Self::Backend> {
        Ok(InMemoryStore::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn insert_generates_object_ids() {
        let store = InMemoryStore::new();

        let id = store
            .insert_document(doc! { "name": "Acme" }, "company")
            .await
            .unwrap();
        let stored = store.query_documents(Query::new(), "company").await.unwrap();

        assert!(matches!(id, Bson::ObjectId(_)));
        assert_eq!(stored[0].get("_id"), Some(&id));
        assert_eq!(stored[0].keys().next().map(String::as_str), Some("_id"));
    }

    #[tokio::test]
    async fn query_returns_insertion_order_and_respects_limit() {
        let store = InMemoryStore::new();
        for n in 0..5 {
            store
                .insert_document(doc! { "title": format!("task {n}") }, "task")
                .await
                .unwrap();
        }

        let first_three = store
            .query_documents(Query::builder().limit(3).build(), "task")
            .await
            .unwrap();

        let titles = first_three
            .iter()
            .map(|doc| doc.get_str("title").unwrap())
            .collect::<Vec<_>>();
        assert_eq!(titles, vec!["task 0", "task 1", "task 2"]);
    }

    #[tokio::test]
    async fn query_filters_by_field() {
        let store = InMemoryStore::new();
        store.insert_document(doc! { "status": "done" }, "task").await.unwrap();
        store.insert_document(doc! { "status": "todo" }, "task").await.unwrap();

        let done = store
            .query_documents(Query::builder().field_equals("status", "done").build(), "task")
            .await
            .unwrap();

        assert_eq!(done.len(), 1);
        assert_eq!(done[0].get_str("status").unwrap(), "done");
    }

    #[tokio::test]
    async fn unknown_collections_are_empty() {
        let store = InMemoryStore::new();

        assert!(store.query_documents(Query::new(), "deal").await.unwrap().is_empty());
        assert!(store.list_collections().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn clones_share_state() {
        let store = InMemoryStore::builder().build().await.unwrap();
        let clone = store.clone();

        clone.insert_document(doc! { "name": "Ada" }, "contact").await.unwrap();
        store.insert_document(doc! { "name": "Acme" }, "company").await.unwrap();

        assert_eq!(
            store.list_collections().await.unwrap(),
            vec!["company".to_string(), "contact".to_string()]
        );
    }
}
