//! Core traits and types for entity representation and serialization.
//!
//! This module provides the [`Entity`] trait every stored record implements, the
//! static [`EntityKind`] to collection mapping, and the conversions between
//! records, BSON documents and the JSON shape returned to clients.

use bson::{Bson, Document, ser::serialize_to_bson};
use serde::Serialize;
use serde_json::{Number, Value};

use crate::{
    error::{StoreError, StoreResult},
    validate::ValidationError,
};

/// The five record types the service stores.
///
/// Each kind maps to exactly one collection. The mapping is a `match`, so
/// adding a kind without naming its collection does not compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Company,
    Contact,
    Deal,
    Project,
    Task,
}

impl EntityKind {
    /// Every kind, in the order the API lists them.
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Company,
        EntityKind::Contact,
        EntityKind::Deal,
        EntityKind::Project,
        EntityKind::Task,
    ];

    /// Name of the collection holding documents of this kind.
    pub const fn collection_name(self) -> &'static str {
        match self {
            EntityKind::Company => "company",
            EntityKind::Contact => "contact",
            EntityKind::Deal => "deal",
            EntityKind::Project => "project",
            EntityKind::Task => "task",
        }
    }
}

/// Core trait that all stored records implement.
///
/// An entity knows which collection it lives in, which fields it declares,
/// and how to build itself from an untrusted JSON payload.
///
/// # Example
///
/// ```ignore
/// use workdesk_core::{document::{Entity, EntityKind}, validate::{PayloadReader, ValidationError}};
///
/// #[derive(Debug, Clone, Serialize)]
/// pub struct Note {
///     pub text: String,
/// }
///
/// impl Entity for Note {
///     const KIND: EntityKind = EntityKind::Company;
///     const FIELDS: &'static [&'static str] = &["text"];
///
///     fn from_payload(payload: &serde_json::Value) -> Result<Self, ValidationError> {
///         let mut reader = PayloadReader::new(payload)?;
///         let note = Note { text: reader.required_string("text") };
///         reader.finish(note)
///     }
/// }
/// ```
pub trait Entity: Serialize + Send + Sync + Clone + 'static {
    /// The kind of record, which fixes its collection.
    const KIND: EntityKind;

    /// Every field a stored record of this type carries.
    ///
    /// Equality filters may only name one of these.
    const FIELDS: &'static [&'static str];

    /// Builds a validated record from a raw JSON payload.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] listing each missing, mistyped or out-of-range field.
    fn from_payload(payload: &Value) -> Result<Self, ValidationError>;

    /// Returns the name of the collection this record belongs to.
    fn collection_name() -> &'static str {
        Self::KIND.collection_name()
    }
}

/// Extension trait converting entities into storable BSON documents.
///
/// Automatically implemented for every [`Entity`].
pub trait DocumentExt: Entity {
    /// Converts this record to a BSON document for storage.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the record does not serialize to a document.
    fn to_document(&self) -> StoreResult<Document>;
}

impl<E: Entity> DocumentExt for E {
    fn to_document(&self) -> StoreResult<Document> {
        match serialize_to_bson(self)? {
            Bson::Document(document) => Ok(document),
            other => Err(StoreError::InvalidDocument(format!(
                "{} serialized to {:?}, expected a document",
                E::collection_name(),
                other.element_type()
            ))),
        }
    }
}

/// Renders a store-generated identifier as the string handed to clients.
pub fn id_to_string(id: &Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(value) => value.clone(),
        other => other.to_string(),
    }
}

/// Converts a stored document into the JSON returned by list endpoints.
///
/// Object ids become hex strings and datetimes become RFC 3339 strings, so
/// `_id` always reaches the client as a plain string.
pub fn to_transport_json(document: Document) -> Value {
    Value::Object(
        document
            .into_iter()
            .map(|(key, value)| (key, bson_to_json(value)))
            .collect(),
    )
}

fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::Null | Bson::Undefined => Value::Null,
        Bson::Boolean(value) => Value::Bool(value),
        Bson::Int32(value) => Value::from(value),
        Bson::Int64(value) => Value::from(value),
        Bson::Double(value) => Number::from_f64(value)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        Bson::String(value) => Value::String(value),
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(datetime) => Value::String(datetime.to_chrono().to_rfc3339()),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        Bson::Document(document) => to_transport_json(document),
        other => serde_json::to_value(&other).unwrap_or(Value::Null),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::{doc, oid::ObjectId};
    use serde_json::json;
    use std::collections::HashSet;

    #[test]
    fn every_kind_has_its_own_collection() {
        let names = EntityKind::ALL
            .iter()
            .map(|kind| kind.collection_name())
            .collect::<HashSet<_>>();

        assert_eq!(names.len(), EntityKind::ALL.len());
        assert_eq!(EntityKind::Deal.collection_name(), "deal");
    }

    #[test]
    fn object_ids_are_stringified() {
        let oid = ObjectId::new();
        let json = to_transport_json(doc! { "_id": oid, "title": "Renewal", "value": 12.5 });

        assert_eq!(json["_id"], json!(oid.to_hex()));
        assert_eq!(json["title"], json!("Renewal"));
        assert_eq!(json["value"], json!(12.5));
        assert_eq!(id_to_string(&Bson::ObjectId(oid)), oid.to_hex());
    }

    #[test]
    fn nested_values_are_converted() {
        let json = to_transport_json(doc! {
            "labels": ["a", "b"],
            "probability": 50_i64,
            "notes": Bson::Null,
        });

        assert_eq!(json, json!({ "labels": ["a", "b"], "probability": 50, "notes": null }));
    }

    #[test]
    fn datetimes_become_rfc3339() {
        let stamp = bson::DateTime::from_millis(0);
        let json = to_transport_json(doc! { "created_at": stamp });

        assert_eq!(json["created_at"], json!("1970-01-01T00:00:00+00:00"));
    }
}
