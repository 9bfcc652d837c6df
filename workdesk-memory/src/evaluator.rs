//! Filter evaluation for in-memory document filtering.
//!
//! This module decides whether a stored BSON document satisfies a
//! [`Filter`](workdesk_core::query::Filter).

use bson::{Bson, Document};

use workdesk_core::{
    query::{QueryVisitor, Filter},
    error::{StoreError, StoreResult},
};


/// Comparable representation of the BSON values a filter can hold.
///
/// Numeric types are normalized to f64 so an `Int32` field matches an
/// `Int64` or `Double` value of the same magnitude.
#[derive(Debug, PartialEq)]
pub(crate) enum Comparable<'a> {
    /// Null value
    Null,
    /// Numeric value (all integers and floats normalized to f64)
    Number(f64),
    /// String value
    String(&'a str),
    /// Any other value; never equal to anything
    Opaque,
}

impl<'a> From<&'a Bson> for Comparable<'a> {
    fn from(bson: &'a Bson) -> Self {
        match bson {
            Bson::Null => Comparable::Null,
            Bson::Int32(value) => Comparable::Number(*value as f64),
            Bson::Int64(value) => Comparable::Number(*value as f64),
            Bson::Double(value) => Comparable::Number(*value),
            Bson::String(value) => Comparable::String(value),
            _ => Comparable::Opaque,
        }
    }
}

pub(crate) struct DocumentEvaluator<'a> {
    document: &'a Document,
}

impl<'a> DocumentEvaluator<'a> {
    pub fn new(document: &'a Document) -> Self {
        Self { document }
    }

    pub fn evaluate(&mut self, filter: &Filter) -> StoreResult<bool> {
        self.visit_filter(filter)
    }

    /// Keeps the documents matching `filter`, preserving their order, until `limit` are found.
    pub fn filter_documents(
        documents: impl IntoIterator<Item = &'a Document>,
        filter: &Filter,
        limit: usize,
    ) -> Vec<Document> {
        documents
            .into_iter()
            .filter(|doc| {
                DocumentEvaluator::new(doc)
                    .evaluate(filter)
                    .unwrap_or(false)
            })
            .take(limit)
            .cloned()
            .collect::<Vec<_>>()
    }
}

impl<'a> QueryVisitor for DocumentEvaluator<'a> {
    type Output = bool;
    type Error = StoreError;

    fn visit_empty(&mut self) -> Result<Self::Output, Self::Error> {
        Ok(true)
    }

    fn visit_field_equals(&mut self, field: &str, value: &Bson) -> Result<Self::Output, Self::Error> {
        Ok(
            self.document
                .get(field)
                .map(Comparable::from)
                .is_some_and(|field_value| {
                    field_value != Comparable::Opaque && field_value == Comparable::from(value)
                })
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    #[test]
    fn empty_filter_matches_everything() {
        let document = doc! { "title": "Anything" };

        assert!(DocumentEvaluator::new(&document).evaluate(&Filter::Empty).unwrap());
    }

    #[test]
    fn equality_matches_only_the_named_field() {
        let document = doc! { "status": "done", "priority": "high" };
        let mut evaluator = DocumentEvaluator::new(&document);

        assert!(evaluator.evaluate(&Filter::field_equals("status", "done")).unwrap());
        assert!(!evaluator.evaluate(&Filter::field_equals("status", "todo")).unwrap());
        assert!(!evaluator.evaluate(&Filter::field_equals("owner", "done")).unwrap());
    }

    #[test]
    fn numbers_compare_across_widths() {
        let document = doc! { "progress": 40_i32 };

        assert!(
            DocumentEvaluator::new(&document)
                .evaluate(&Filter::field_equals("progress", 40_i64))
                .unwrap()
        );
    }

    #[test]
    fn null_matches_null_and_other_values_never_match() {
        let document = doc! { "notes": Bson::Null, "labels": ["a"] };
        let mut evaluator = DocumentEvaluator::new(&document);

        assert!(evaluator.evaluate(&Filter::field_equals("notes", Bson::Null)).unwrap());
        assert!(!evaluator.evaluate(&Filter::field_equals("notes", "")).unwrap());
        assert!(!evaluator.evaluate(&Filter::field_equals("labels", vec!["a"])).unwrap());
    }

    #[test]
    fn filtering_keeps_order_and_stops_at_limit() {
        let documents = (0..5)
            .map(|n: i32| {
                let status = if n % 2 == 0 { "done" } else { "todo" };
                doc! { "n": n, "status": status }
            })
            .collect::<Vec<_>>();

        let done = DocumentEvaluator::filter_documents(
            &documents,
            &Filter::field_equals("status", "done"),
            2,
        );

        assert_eq!(done.len(), 2);
        assert_eq!(done[0].get_i32("n").unwrap(), 0);
        assert_eq!(done[1].get_i32("n").unwrap(), 2);
    }
}
