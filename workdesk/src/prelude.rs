//! Convenient re-exports of commonly used types.
//!
//! ```ignore
//! use workdesk::prelude::*;
//! ```

pub use workdesk_core::{
    backend::{DynStoreBackend, StoreBackend, StoreBackendBuilder},
    collection::EntityCollection,
    document::{DocumentExt, Entity, EntityKind},
    error::{StoreError, StoreResult},
    query::{DEFAULT_LIMIT, Filter, Query, QueryBuilder, QueryVisitor},
    schema::{Company, Contact, Deal, Project, Task},
    store::DocumentStore,
    validate::{FieldError, ValidationError, Violation},
};

pub use crate::{
    api::{ApiError, ApiResult, router},
    config::{ServerConfig, StoreConfig},
    state::{AppState, StoreHandle},
};
