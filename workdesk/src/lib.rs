//! Task manager and CRM backend.
//!
//! Companies, contacts, deals, projects, and tasks are stored as documents
//! and exposed through uniform create/list HTTP endpoints:
//!
//! | Route              | Methods     | Notes                      |
//! |--------------------|-------------|----------------------------|
//! | `/api/companies`   | GET, POST   | `?limit=`                  |
//! | `/api/contacts`    | GET, POST   | `?limit=`                  |
//! | `/api/deals`       | GET, POST   | `?limit=`                  |
//! | `/api/projects`    | GET, POST   | `?limit=`                  |
//! | `/api/tasks`       | GET, POST   | `?limit=` and `?status=`   |
//! | `/`                | GET         | liveness                   |
//! | `/test`            | GET         | store diagnostics          |
//!
//! # Embedding
//!
//! ```ignore
//! use workdesk::{api, memory::InMemoryStore, state::AppState, store::DocumentStore};
//!
//! let store = DocumentStore::new(InMemoryStore::builder().build().await?);
//! let app = api::router(AppState::with_store(store));
//! axum::serve(listener, app).await?;
//! ```
//!
//! # Backends
//!
//! - [`memory`] - process-local storage for development and tests
//! - [`mongodb`] - MongoDB storage (requires the `mongodb` feature)

pub mod api;
pub mod config;
pub mod prelude;
pub mod state;

pub use workdesk_core::{backend, collection, document, error, query, schema, store, validate};

// Re-export BSON types for convenience
pub use bson;

/// In-memory storage backend.
pub mod memory {
    pub use workdesk_memory::{InMemoryStore, InMemoryStoreBuilder};
}

/// MongoDB storage backend.
///
/// This module is only available when the `mongodb` feature is enabled.
#[cfg(feature = "mongodb")]
pub mod mongodb {
    pub use workdesk_mongodb::{MongoDbStore, MongoDbStoreBuilder};
}
