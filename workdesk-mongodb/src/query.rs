//! Query translation from workdesk filters to MongoDB query syntax.

use bson::{Document, Bson, doc};

use workdesk_core::{
    query::QueryVisitor,
    error::StoreError,
};


/// Translates workdesk filters into MongoDB query documents.
///
/// Equality is always expressed with `$eq`, so a caller-supplied value is
/// compared literally and never interpreted as an operator document.
pub(crate) struct MongoQueryTranslator;

impl QueryVisitor for MongoQueryTranslator {
    type Output = Document;
    type Error = StoreError;

    fn visit_empty(&mut self) -> Result<Self::Output, Self::Error> {
        Ok(doc! {})
    }

    fn visit_field_equals(&mut self, field: &str, value: &Bson) -> Result<Self::Output, Self::Error> {
        if field.starts_with('$') {
            return Err(StoreError::InvalidQuery(format!("field name {field} is not allowed")));
        }

        Ok(doc! {
            field: { "$eq": value },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use workdesk_core::query::Filter;

    #[test]
    fn empty_filter_is_an_empty_document() {
        assert_eq!(MongoQueryTranslator.visit_filter(&Filter::Empty).unwrap(), doc! {});
    }

    #[test]
    fn equality_uses_eq_operator() {
        let filter = Filter::field_equals("status", "done");

        assert_eq!(
            MongoQueryTranslator.visit_filter(&filter).unwrap(),
            doc! { "status": { "$eq": "done" } }
        );
    }

    #[test]
    fn operator_like_values_stay_literal() {
        let filter = Filter::field_equals("status", doc! { "$ne": "done" });

        assert_eq!(
            MongoQueryTranslator.visit_filter(&filter).unwrap(),
            doc! { "status": { "$eq": { "$ne": "done" } } }
        );
    }

    #[test]
    fn operator_field_names_are_rejected() {
        let filter = Filter::field_equals("$where", "1 == 1");

        assert!(matches!(
            MongoQueryTranslator.visit_filter(&filter),
            Err(StoreError::InvalidQuery(_))
        ));
    }
}
