//! Shared application state: the store handle injected into every handler.

use std::sync::Arc;

use tracing::{error, info, warn};
use workdesk_core::{
    backend::StoreBackendBuilder,
    error::{StoreError, StoreResult},
    store::DocumentStore,
};
use workdesk_memory::InMemoryStore;

use crate::config::StoreConfig;

/// What became of the store at startup.
#[derive(Debug)]
pub enum StoreHandle {
    /// A backend was built and is ready for requests.
    Ready(DocumentStore),
    /// No database URL or name was configured.
    NotConfigured,
    /// A database was configured but the client could not be created.
    Failed(String),
}

#[derive(Debug)]
struct Inner {
    store: StoreHandle,
    url_configured: bool,
    name_configured: bool,
}

/// Cheap to clone; every clone refers to the same store.
#[derive(Debug, Clone)]
pub struct AppState {
    inner: Arc<Inner>,
}

impl AppState {
    pub fn new(store: StoreHandle, url_configured: bool, name_configured: bool) -> Self {
        Self {
            inner: Arc::new(Inner {
                store,
                url_configured,
                name_configured,
            }),
        }
    }

    /// State around an already built store.
    pub fn with_store(store: DocumentStore) -> Self {
        Self::new(StoreHandle::Ready(store), true, true)
    }

    /// State with no store at all.
    pub fn unconfigured() -> Self {
        Self::new(StoreHandle::NotConfigured, false, false)
    }

    /// Opens the store described by `config`.
    ///
    /// Never fails: a missing or broken configuration is recorded in the
    /// handle so the server can still start and report it.
    pub async fn open(config: &StoreConfig) -> Self {
        let url_configured = config.database_url.is_some();
        let name_configured = config.database_name.is_some();

        let handle = if config.in_memory {
            match InMemoryStore::builder().build().await {
                Ok(backend) => {
                    info!("using in-memory document store");
                    StoreHandle::Ready(DocumentStore::new(backend))
                }
                Err(err) => StoreHandle::Failed(err.to_string()),
            }
        } else {
            match (&config.database_url, &config.database_name) {
                (Some(url), Some(name)) => open_mongodb(url, name, config).await,
                _ => {
                    warn!("DATABASE_URL or DATABASE_NAME is not set; store endpoints will fail");
                    StoreHandle::NotConfigured
                }
            }
        };

        Self::new(handle, url_configured, name_configured)
    }

    /// The store, or [`StoreError::Unavailable`] when there is none.
    pub fn store(&self) -> StoreResult<&DocumentStore> {
        match &self.inner.store {
            StoreHandle::Ready(store) => Ok(store),
            StoreHandle::NotConfigured => Err(StoreError::Unavailable(
                "set DATABASE_URL and DATABASE_NAME".to_string(),
            )),
            StoreHandle::Failed(reason) => Err(StoreError::Unavailable(reason.clone())),
        }
    }

    pub fn handle(&self) -> &StoreHandle {
        &self.inner.store
    }

    pub fn url_configured(&self) -> bool {
        self.inner.url_configured
    }

    pub fn name_configured(&self) -> bool {
        self.inner.name_configured
    }

    /// Shuts the store down. Clones still held elsewhere see a closed store.
    pub async fn close(&self) {
        if let StoreHandle::Ready(store) = &self.inner.store {
            match store.shutdown().await {
                Ok(()) => info!("document store closed"),
                Err(err) => error!(error = %err, "failed to close document store"),
            }
        }
    }
}

#[cfg(feature = "mongodb")]
async fn open_mongodb(url: &str, name: &str, config: &StoreConfig) -> StoreHandle {
    use workdesk_mongodb::MongoDbStore;

    let mut builder = MongoDbStore::builder(url, name);
    if let Some(timeout) = config.database_timeout() {
        builder = builder.server_selection_timeout(timeout);
    }

    match builder.build().await {
        Ok(backend) => {
            info!(database = name, "using MongoDB document store");
            StoreHandle::Ready(DocumentStore::new(backend))
        }
        Err(err) => {
            error!(error = %err, "could not create MongoDB client");
            StoreHandle::Failed(err.to_string())
        }
    }
}

#[cfg(not(feature = "mongodb"))]
async fn open_mongodb(_url: &str, _name: &str, _config: &StoreConfig) -> StoreHandle {
    error!("DATABASE_URL is set but this build has no MongoDB support");
    StoreHandle::Failed("built without the mongodb feature".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bson::{Bson, Document};
    use std::sync::atomic::{AtomicBool, Ordering};
    use workdesk_core::{backend::StoreBackend, query::Query};

    #[tokio::test]
    async fn missing_settings_leave_store_unconfigured() {
        let state = AppState::open(&StoreConfig {
            database_url: Some("mongodb://localhost:27017".to_string()),
            ..StoreConfig::default()
        })
        .await;

        assert!(matches!(state.handle(), StoreHandle::NotConfigured));
        assert!(state.url_configured());
        assert!(!state.name_configured());
        assert!(matches!(state.store(), Err(StoreError::Unavailable(_))));
    }

    #[derive(Debug, Default)]
    struct ClosingBackend {
        closed: Arc<AtomicBool>,
    }

    #[async_trait]
    impl StoreBackend for ClosingBackend {
        async fn insert_document(&self, _document: Document, _collection: &str) -> StoreResult<Bson> {
            Ok(Bson::Null)
        }

        async fn query_documents(&self, _query: Query, _collection: &str) -> StoreResult<Vec<Document>> {
            Ok(vec![])
        }

        async fn list_collections(&self) -> StoreResult<Vec<String>> {
            Ok(vec![])
        }

        async fn shutdown(&self) -> StoreResult<()> {
            self.closed.store(true, Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test]
    async fn close_reaches_the_store_while_clones_are_alive() {
        let backend = ClosingBackend::default();
        let closed = backend.closed.clone();
        let state = AppState::with_store(DocumentStore::new(backend));
        let in_flight = state.clone();

        state.close().await;

        assert!(closed.load(Ordering::SeqCst));
        drop(in_flight);
    }

    #[tokio::test]
    async fn in_memory_store_is_ready() {
        let state = AppState::open(&StoreConfig {
            in_memory: true,
            ..StoreConfig::default()
        })
        .await;

        assert!(state.store().is_ok());
        state.close().await;
    }
}
