//! In-memory document storage backend for workdesk.
//!
//! This crate provides a thread-safe, in-memory implementation of the `StoreBackend` trait.
//! It uses async-aware read-write locks for concurrent access and backs the test
//! suite as well as `workdesk --in-memory` development runs.
//!
//! # Features
//!
//! - **Thread-safe access** - Concurrent reads and writes using async-aware RwLock
//! - **Insertion order** - Documents are listed in the order they were stored
//! - **Generated ids** - Documents receive a BSON ObjectId like they would in MongoDB
//!
//! # Quick Start
//!
//! ```ignore
//! use workdesk_core::{store::DocumentStore, schema::Task, query::Query};
//! use workdesk_memory::InMemoryStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = DocumentStore::new(InMemoryStore::new());
//!     let tasks = store.collection::<Task>();
//!
//!     let task = Task::from_payload(&serde_json::json!({ "title": "Review PR" }))?;
//!     let id = tasks.insert(&task).await?;
//!     let listed = tasks.list(Query::new()).await?;
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as workdesk_memory;

pub mod store;
pub mod evaluator;

pub use store::{InMemoryStore, InMemoryStoreBuilder};
