//! Typed access to the collection of one entity.
//!
//! An [`EntityCollection`] turns records into documents on the way in and
//! documents into client-facing JSON on the way out.
//!
//! # Example
//!
//! ```ignore
//! use workdesk_core::{schema::Company, query::Query};
//!
//! let companies = store.collection::<Company>();
//! let id = companies.insert(&company).await?;
//! let first_ten = companies.list(Query::builder().limit(10).build()).await?;
//! ```

use bson::DateTime;
use serde_json::Value;
use std::marker::PhantomData;

use crate::{
    backend::DynStoreBackend,
    document::{DocumentExt, Entity, id_to_string, to_transport_json},
    error::{StoreError, StoreResult},
    query::Query,
};

/// A collection bound to entity type `E`.
///
/// # Type Parameters
///
/// * `'a` - Lifetime of the backend reference
/// * `E` - The entity stored in this collection
#[derive(Debug)]
pub struct EntityCollection<'a, E: Entity> {
    backend: &'a dyn DynStoreBackend,
    _marker: PhantomData<E>,
}

impl<'a, E: Entity> EntityCollection<'a, E> {
    /// Creates a new collection reference (internal use).
    pub(crate) fn new(backend: &'a dyn DynStoreBackend) -> Self {
        Self {
            backend,
            _marker: PhantomData,
        }
    }

    /// Returns the name of this collection.
    pub fn name(&self) -> &'static str {
        E::collection_name()
    }

    /// Stores a record and returns its generated identifier as a string.
    ///
    /// `created_at` and `updated_at` are stamped with the current UTC time.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the record cannot be serialized or the backend fails.
    pub async fn insert(&self, record: &E) -> StoreResult<String> {
        let mut document = record.to_document()?;
        let now = DateTime::now();
        document.insert("created_at", now);
        document.insert("updated_at", now);

        let id = self
            .backend
            .insert_document(document, self.name())
            .await?;

        Ok(id_to_string(&id))
    }

    /// Lists stored records matching `query`, with `_id` rendered as a string.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidQuery`] if the filter names a field `E`
    /// does not declare, or a [`StoreError`] from the backend.
    pub async fn list(&self, query: Query) -> StoreResult<Vec<Value>> {
        if let Some(field) = query.filter.field() {
            if !E::FIELDS.iter().any(|known| *known == field) {
                return Err(StoreError::InvalidQuery(format!(
                    "{} has no field named {field}",
                    self.name()
                )));
            }
        }

        Ok(self
            .backend
            .query_documents(query, self.name())
            .await?
            .into_iter()
            .map(to_transport_json)
            .collect())
    }
}
