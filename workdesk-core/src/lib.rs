//! Core types for the workdesk task manager and CRM backend.
//!
//! This crate holds everything the HTTP layer and the storage backends agree on:
//!
//! - **Entity schemas** ([`schema`]) - The five record shapes and how they are read from JSON
//! - **Validation** ([`validate`]) - Field-level validation errors and the payload reader
//! - **Entity mapping** ([`document`]) - Static entity to collection mapping and BSON/JSON conversion
//! - **Store backend abstraction** ([`backend`]) - Traits implemented by concrete document stores
//! - **Queries** ([`query`]) - The closed set of filters a list request may carry
//! - **Collections** ([`collection`]) - Typed insert/list access to one entity's collection
//! - **Document store** ([`store`]) - The handle constructed once at startup and shared by requests
//! - **Errors** ([`error`]) - Store error and result types
//!
//! # Example
//!
//! ```ignore
//! use serde_json::json;
//! use workdesk_core::{schema::Task, document::Entity, query::Query};
//!
//! let task = Task::from_payload(&json!({ "title": "Write release notes" }))?;
//! let id = store.collection::<Task>().insert(&task).await?;
//! let open = store
//!     .collection::<Task>()
//!     .list(Query::builder().field_equals("status", "todo").limit(10).build())
//!     .await?;
//! ```

#[allow(unused_extern_crates)]
extern crate self as workdesk_core;

pub mod backend;
pub mod collection;
pub mod document;
pub mod error;
pub mod query;
pub mod schema;
pub mod store;
pub mod validate;
