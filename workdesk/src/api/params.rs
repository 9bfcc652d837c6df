//! Query string parsing for list endpoints.

use std::collections::HashMap;

use workdesk_core::query::{DEFAULT_LIMIT, Filter, Query};
use workdesk_core::validate::{FieldError, ValidationError};

/// Parsed `?limit=N&status=S` parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ListParams {
    pub limit: usize,
    pub status: Option<String>,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            status: None,
        }
    }
}

impl ListParams {
    /// Reads the parameters; unknown keys are ignored, an empty `status` means no filter.
    pub fn parse(raw: &HashMap<String, String>) -> Result<Self, ValidationError> {
        let limit = match raw.get("limit").map(|value| value.trim()) {
            None | Some("") => DEFAULT_LIMIT,
            Some(value) => match value.parse::<i64>() {
                Ok(limit) if limit < 0 => {
                    return Err(ValidationError::single(FieldError::out_of_range(
                        "limit",
                        "must be greater than or equal to 0",
                    )));
                }
                Ok(limit) => usize::try_from(limit).unwrap_or(usize::MAX),
                Err(_) => {
                    return Err(ValidationError::single(FieldError::wrong_type(
                        "limit",
                        "an integer",
                    )));
                }
            },
        };

        let status = raw
            .get("status")
            .filter(|status| !status.is_empty())
            .cloned();

        Ok(Self { limit, status })
    }

    /// Query over every record, capped at `limit`.
    pub fn to_query(&self) -> Query {
        Query::builder().limit(self.limit).build()
    }

    /// Query restricted to `status` when one was given.
    pub fn to_status_query(&self) -> Query {
        let filter = match &self.status {
            Some(status) => Filter::field_equals("status", status.as_str()),
            None => Filter::Empty,
        };

        Query::builder().filter(filter).limit(self.limit).build()
    }
}
