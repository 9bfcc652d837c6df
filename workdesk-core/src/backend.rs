//! Storage backend abstraction for the document store.
//!
//! This module defines the traits that abstract over concrete document
//! databases, so the HTTP layer works the same against an in-memory store in
//! tests and MongoDB in production.
//!
//! # Traits
//!
//! - [`StoreBackend`]: The core trait for storage backends
//! - [`DynStoreBackend`]: A trait for dynamic dispatch over backend implementations
//! - [`StoreBackendBuilder`]: Factory trait for creating backend instances
//!
//! # Examples
//!
//! ```ignore
//! use workdesk_core::{backend::StoreBackend, query::Query};
//! use bson::doc;
//!
//! let backend = MyBackendImpl::new();
//!
//! let id = backend.insert_document(doc! { "title": "Call back" }, "task").await?;
//! let tasks = backend.query_documents(Query::new(), "task").await?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use async_trait::async_trait;
use bson::{Bson, Document};
use std::fmt::Debug;

use crate::{error::StoreResult, query::Query};

/// Abstract interface for document storage backends.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; one instance is shared by every
/// in-flight request.
///
/// # Error Handling
///
/// Operations return [`StoreResult<T>`](crate::error::StoreResult). A backend
/// that cannot reach its database should report
/// [`StoreError::Unavailable`](crate::error::StoreError::Unavailable).
#[async_trait]
pub trait StoreBackend: Send + Sync + Debug {
    /// Appends a document to a collection and returns its generated identifier.
    ///
    /// The collection is created if it does not exist. If the document has no
    /// `_id`, the backend generates one.
    ///
    /// # Arguments
    ///
    /// * `document` - The BSON document to store
    /// * `collection` - The name of the collection to insert into
    async fn insert_document(&self, document: Document, collection: &str) -> StoreResult<Bson>;

    /// Returns documents of a collection matching a query.
    ///
    /// Documents come back in insertion order, at most `query.limit` of them.
    /// A collection that does not exist yields an empty list.
    ///
    /// # Arguments
    ///
    /// * `query` - The [`Query`] specifying the filter and limit
    /// * `collection` - The name of the collection to query
    async fn query_documents(&self, query: Query, collection: &str) -> StoreResult<Vec<Document>>;

    /// Lists the names of all collections in the store.
    async fn list_collections(&self) -> StoreResult<Vec<String>>;

    /// Checks that the database answers.
    ///
    /// The default implementation always succeeds, which suits backends with
    /// no remote side.
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    /// Cleanly shuts down the backend, releasing all resources.
    ///
    /// Takes `&self` so a backend still referenced by in-flight requests can
    /// be closed; operations issued afterwards fail. The default
    /// implementation is a no-op, but backends with external connections
    /// should override this.
    async fn shutdown(&self) -> StoreResult<()> {
        Ok(())
    }
}

/// Object-safe mirror of [`StoreBackend`], implemented for every backend.
///
/// Holding a `Box<dyn DynStoreBackend>` lets the backend be picked at startup
/// from configuration.
#[async_trait]
pub trait DynStoreBackend: Send + Sync + Debug {
    async fn insert_document(&self, document: Document, collection: &str) -> StoreResult<Bson>;
    async fn query_documents(&self, query: Query, collection: &str) -> StoreResult<Vec<Document>>;
    async fn list_collections(&self) -> StoreResult<Vec<String>>;
    async fn ping(&self) -> StoreResult<()>;
    async fn shutdown(&self) -> StoreResult<()>;
}

#[async_trait]
impl<B: StoreBackend + 'static> DynStoreBackend for B {
    async fn insert_document(&self, document: Document, collection: &str) -> StoreResult<Bson> {
        StoreBackend::insert_document(self, document, collection).await
    }

    async fn query_documents(&self, query: Query, collection: &str) -> StoreResult<Vec<Document>> {
        StoreBackend::query_documents(self, query, collection).await
    }

    async fn list_collections(&self) -> StoreResult<Vec<String>> {
        StoreBackend::list_collections(self).await
    }

    async fn ping(&self) -> StoreResult<()> {
        StoreBackend::ping(self).await
    }

    async fn shutdown(&self) -> StoreResult<()> {
        StoreBackend::shutdown(self).await
    }
}

#[async_trait]
pub trait StoreBackendBuilder {
    type Backend: StoreBackend;

    async fn build(self) -> StoreResult<Self::Backend>;
}
