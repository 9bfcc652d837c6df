//! Query construction for list requests.
//!
//! A list request carries at most one predicate, so filters form a closed set:
//! match everything, or match documents whose field equals a value. Backends
//! translate a [`Filter`] through the [`QueryVisitor`] trait.
//!
//! ```ignore
//! use workdesk_core::query::Query;
//!
//! let query = Query::builder()
//!     .field_equals("status", "done")
//!     .limit(10)
//!     .build();
//! ```

use bson::Bson;

use crate::error::StoreError;

/// Number of records a list request returns when no limit is given.
pub const DEFAULT_LIMIT: usize = 50;

/// The predicate a query applies to a collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Filter {
    /// Matches every document.
    #[default]
    Empty,
    /// Matches documents whose `field` equals `value`.
    FieldEquals {
        /// The field name to compare.
        field: String,
        /// The value the field must equal.
        value: Bson,
    },
}

impl Filter {
    /// Creates an equality filter.
    pub fn field_equals(field: impl Into<String>, value: impl Into<Bson>) -> Self {
        Filter::FieldEquals {
            field: field.into(),
            value: value.into(),
        }
    }

    /// The field this filter constrains, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Filter::Empty => None,
            Filter::FieldEquals { field, .. } => Some(field),
        }
    }
}

/// A filter plus a cap on the number of documents returned.
///
/// Results come back in the store's natural (insertion) order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    /// Predicate documents must satisfy.
    pub filter: Filter,
    /// Maximum number of documents to return; `None` returns all of them.
    pub limit: Option<usize>,
}

impl Query {
    /// Creates a query that matches everything, without a limit.
    pub fn new() -> Self {
        Query {
            filter: Filter::Empty,
            limit: None,
        }
    }

    /// Creates a new query builder for fluent construction.
    pub fn builder() -> QueryBuilder {
        QueryBuilder::new()
    }
}

#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    query: Query,
}

impl QueryBuilder {
    /// Creates a new query builder.
    pub fn new() -> Self {
        QueryBuilder { query: Query::default() }
    }

    /// Sets the filter for this query.
    pub fn filter(mut self, filter: Filter) -> Self {
        self.query.filter = filter;
        self
    }

    /// Shorthand for `filter(Filter::field_equals(field, value))`.
    pub fn field_equals(self, field: impl Into<String>, value: impl Into<Bson>) -> Self {
        self.filter(Filter::field_equals(field, value))
    }

    /// Sets the maximum number of documents to return.
    pub fn limit(mut self, limit: usize) -> Self {
        self.query.limit = Some(limit);
        self
    }

    /// Builds and returns the final query.
    pub fn build(self) -> Query {
        self.query
    }
}

pub trait QueryVisitor {
    type Output;
    type Error: Into<StoreError>;

    fn visit_empty(&mut self) -> Result<Self::Output, Self::Error>;
    fn visit_field_equals(&mut self, field: &str, value: &Bson) -> Result<Self::Output, Self::Error>;

    fn visit_filter(&mut self, filter: &Filter) -> Result<Self::Output, Self::Error> {
        match filter {
            Filter::Empty => self.visit_empty(),
            Filter::FieldEquals { field, value } => self.visit_field_equals(field, value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_filter_and_limit() {
        let query = Query::builder()
            .field_equals("status", "done")
            .limit(10)
            .build();

        assert_eq!(query.limit, Some(10));
        assert_eq!(query.filter, Filter::field_equals("status", "done"));
        assert_eq!(query.filter.field(), Some("status"));
    }

    #[test]
    fn default_query_matches_everything() {
        let query = Query::new();

        assert_eq!(query.filter, Filter::Empty);
        assert_eq!(query.filter.field(), None);
        assert_eq!(query.limit, None);
    }
}
