//! The document store handle shared by all requests.
//!
//! A [`DocumentStore`] is constructed once at startup around whichever
//! backend the configuration selects, handed to the HTTP layer, and shut
//! down when the server stops.
//!
//! # Example
//!
//! ```ignore
//! use workdesk_core::{store::DocumentStore, schema::Task};
//!
//! let store = DocumentStore::new(backend);
//! let tasks = store.collection::<Task>();
//! // ...
//! store.shutdown().await?;
//! ```

use crate::{
    backend::{DynStoreBackend, StoreBackend},
    collection::EntityCollection,
    document::Entity,
    error::StoreResult,
};

#[derive(Debug)]
pub struct DocumentStore {
    backend: Box<dyn DynStoreBackend>,
}

impl DocumentStore {
    /// Creates a new document store around the given backend.
    pub fn new<B: StoreBackend + 'static>(backend: B) -> Self {
        Self {
            backend: Box::new(backend),
        }
    }

    /// Gets the collection for entity type `E`.
    ///
    /// The collection name comes from `E::KIND`.
    pub fn collection<E: Entity>(&self) -> EntityCollection<'_, E> {
        EntityCollection::new(&*self.backend)
    }

    /// Lists all collections in the store.
    pub async fn list_collections(&self) -> StoreResult<Vec<String>> {
        self.backend.list_collections().await
    }

    /// Checks that the underlying database answers.
    pub async fn ping(&self) -> StoreResult<()> {
        self.backend.ping().await
    }

    /// Shuts down the store and releases backend resources.
    ///
    /// # Errors
    ///
    /// Returns an error if the shutdown operation fails.
    pub async fn shutdown(&self) -> StoreResult<()> {
        self.backend.shutdown().await
    }
}
