//! Field-level validation of incoming JSON payloads.
//!
//! [`PayloadReader`] walks a JSON object field by field, collecting every
//! violation it sees instead of stopping at the first one. Entity schemas use
//! it to build their records; see [`crate::schema`].

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// The kind of constraint a field broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Violation {
    /// A required field was absent.
    Missing,
    /// The field was present with a JSON type the schema does not accept.
    WrongType,
    /// A numeric field fell outside its allowed bounds.
    OutOfRange,
    /// The payload itself was not a JSON object.
    MalformedBody,
}

/// A single offending field and what was wrong with it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: String,
    #[serde(rename = "type")]
    pub violation: Violation,
    #[serde(rename = "msg")]
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, violation: Violation, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            violation,
            message: message.into(),
        }
    }

    pub fn missing(field: &str) -> Self {
        Self::new(field, Violation::Missing, "field required")
    }

    pub fn wrong_type(field: &str, expected: &str) -> Self {
        Self::new(field, Violation::WrongType, format!("expected {expected}"))
    }

    pub fn out_of_range(field: &str, message: impl Into<String>) -> Self {
        Self::new(field, Violation::OutOfRange, message)
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// A payload was rejected; carries every field that failed.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("validation failed: {}", summary(.errors))]
pub struct ValidationError {
    errors: Vec<FieldError>,
}

fn summary(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    pub fn single(error: FieldError) -> Self {
        Self { errors: vec![error] }
    }

    /// Rejects a request body that is not JSON or not a JSON object.
    pub fn malformed_body(message: impl Into<String>) -> Self {
        Self::single(FieldError::new("body", Violation::MalformedBody, message))
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Returns the first error reported for `field`, if any.
    pub fn field(&self, field: &str) -> Option<&FieldError> {
        self.errors.iter().find(|error| error.field == field)
    }
}

/// Reads typed fields out of a JSON object while accumulating violations.
///
/// Every accessor returns a usable value even when the field is invalid, so a
/// schema can read all of its fields in one pass; [`PayloadReader::finish`]
/// then decides whether the assembled record is returned or rejected.
///
/// Keys the schema never asks for are ignored.
pub struct PayloadReader<'a> {
    fields: &'a Map<String, Value>,
    errors: Vec<FieldError>,
}

impl<'a> PayloadReader<'a> {
    /// Starts reading `payload`, which must be a JSON object.
    pub fn new(payload: &'a Value) -> Result<Self, ValidationError> {
        match payload {
            Value::Object(fields) => Ok(Self { fields, errors: Vec::new() }),
            _ => Err(ValidationError::malformed_body("expected a JSON object")),
        }
    }

    fn reject(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    /// A string that must be present and non-null.
    pub fn required_string(&mut self, field: &str) -> String {
        match self.fields.get(field) {
            None => {
                self.reject(FieldError::missing(field));
                String::new()
            }
            Some(Value::String(value)) => value.clone(),
            Some(_) => {
                self.reject(FieldError::wrong_type(field, "a string"));
                String::new()
            }
        }
    }

    /// A string that may be absent or null.
    pub fn optional_string(&mut self, field: &str) -> Option<String> {
        match self.fields.get(field) {
            None | Some(Value::Null) => None,
            Some(Value::String(value)) => Some(value.clone()),
            Some(_) => {
                self.reject(FieldError::wrong_type(field, "a string or null"));
                None
            }
        }
    }

    /// A string that falls back to `default` when absent. Null is not accepted.
    pub fn string_or(&mut self, field: &str, default: &str) -> String {
        match self.fields.get(field) {
            None => default.to_string(),
            Some(Value::String(value)) => value.clone(),
            Some(_) => {
                self.reject(FieldError::wrong_type(field, "a string"));
                default.to_string()
            }
        }
    }

    /// An ordered list of strings, empty when absent.
    pub fn string_list(&mut self, field: &str) -> Vec<String> {
        let items = match self.fields.get(field) {
            None => return Vec::new(),
            Some(Value::Array(items)) => items,
            Some(_) => {
                self.reject(FieldError::wrong_type(field, "a list of strings"));
                return Vec::new();
            }
        };

        let mut values = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match item {
                Value::String(value) => values.push(value.clone()),
                _ => self.reject(FieldError::wrong_type(&format!("{field}.{index}"), "a string")),
            }
        }

        values
    }

    /// A number no smaller than `min`, defaulting when absent.
    pub fn number_at_least(&mut self, field: &str, default: f64, min: f64) -> f64 {
        let value = match self.fields.get(field) {
            None => return default,
            Some(Value::Number(number)) => match number.as_f64() {
                Some(value) => value,
                None => {
                    self.reject(FieldError::wrong_type(field, "a number"));
                    return default;
                }
            },
            Some(_) => {
                self.reject(FieldError::wrong_type(field, "a number"));
                return default;
            }
        };

        if value < min {
            self.reject(FieldError::out_of_range(
                field,
                format!("must be greater than or equal to {min}"),
            ));
        }

        value
    }

    /// An integer within `min..=max`, defaulting when absent. Null is not accepted.
    pub fn integer_between(&mut self, field: &str, default: i64, min: i64, max: i64) -> i64 {
        match self.fields.get(field) {
            None => default,
            Some(Value::Null) => {
                self.reject(FieldError::wrong_type(field, "an integer"));
                default
            }
            Some(value) => self.bounded_integer(field, value, min, max).unwrap_or(default),
        }
    }

    /// An integer within `min..=max` that may also be null.
    pub fn optional_integer_between(
        &mut self,
        field: &str,
        default: Option<i64>,
        min: i64,
        max: i64,
    ) -> Option<i64> {
        match self.fields.get(field) {
            None => default,
            Some(Value::Null) => None,
            Some(value) => self.bounded_integer(field, value, min, max).or(default),
        }
    }

    fn bounded_integer(&mut self, field: &str, value: &Value, min: i64, max: i64) -> Option<i64> {
        let out_of_range = |field: &str| {
            FieldError::out_of_range(field, format!("must be between {min} and {max}"))
        };

        let number = match as_integer(value) {
            Some(number) => number,
            None if is_whole_number(value) => {
                self.reject(out_of_range(field));
                return None;
            }
            None => {
                self.reject(FieldError::wrong_type(field, "an integer"));
                return None;
            }
        };

        if number < min || number > max {
            self.reject(out_of_range(field));
        }

        Some(number)
    }

    /// A calendar date written as `YYYY-MM-DD`, or null.
    pub fn optional_date(&mut self, field: &str) -> Option<NaiveDate> {
        match self.fields.get(field) {
            None | Some(Value::Null) => None,
            Some(Value::String(value)) => match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
                Ok(date) => Some(date),
                Err(_) => {
                    self.reject(FieldError::wrong_type(field, "a date formatted as YYYY-MM-DD"));
                    None
                }
            },
            Some(_) => {
                self.reject(FieldError::wrong_type(field, "a date formatted as YYYY-MM-DD"));
                None
            }
        }
    }

    /// Returns `record` if no field was rejected.
    pub fn finish<T>(self, record: T) -> Result<T, ValidationError> {
        if self.errors.is_empty() {
            Ok(record)
        } else {
            Err(ValidationError::new(self.errors))
        }
    }
}

/// Integers, plus floats with no fractional part.
fn as_integer(value: &Value) -> Option<i64> {
    let Value::Number(number) = value else {
        return None;
    };

    if let Some(integer) = number.as_i64() {
        return Some(integer);
    }

    number
        .as_f64()
        .filter(|float| float.fract() == 0.0 && float.abs() < i64::MAX as f64)
        .map(|float| float as i64)
}

/// Whole numbers of any magnitude, including those too large for `i64`.
fn is_whole_number(value: &Value) -> bool {
    match value {
        Value::Number(number) if number.is_u64() || number.is_i64() => true,
        Value::Number(number) => number
            .as_f64()
            .is_some_and(|float| float.is_finite() && float.fract() == 0.0),
        _ => false,
    }
}
