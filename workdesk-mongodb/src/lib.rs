//! MongoDB backend implementation for workdesk.
//!
//! This crate provides a MongoDB-based implementation of the `StoreBackend` trait,
//! the production store behind the workdesk HTTP API.
//!
//! To use this backend, keep the default `mongodb` feature of the `workdesk` crate enabled.
//!
//! # Features
//!
//! - **Persistent storage** - Data is persisted to MongoDB Atlas or self-hosted MongoDB
//! - **Server-side filtering** - Equality filters and limits run inside MongoDB
//! - **Async/await** - Fully asynchronous API built on MongoDB's async driver
//! - **Connectivity checks** - `ping` and collection listing for the diagnostics endpoint
//!
//! # Connection
//!
//! The client is created from a connection string and a database name. The
//! driver connects lazily, so building a store succeeds even while the server
//! is down; the first operation reports the outage.
//!
//! # Example
//!
//! ```ignore
//! use workdesk_core::backend::StoreBackendBuilder;
//! use workdesk_mongodb::MongoDbStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = MongoDbStore::builder("mongodb://localhost:27017", "workdesk")
//!         .build()
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as workdesk_mongodb;

pub mod store;
pub mod query;

pub use store::{MongoDbStore, MongoDbStoreBuilder};
