//! Query Results and Provenance
//!
//! Every result produced by a [`Connection`](crate::connection::Connection)
//! is permanently tagged with the query text that produced it. This module
//! defines the [`QueryResult`] contract, the [`Provenance`] core that
//! concrete result types embed, and the crate-wide string-coercion rule
//! applied to query text at construction.
//!
//! Concrete result shapes (row sets, affected-row counts) are owned by
//! driver crates; they extend the contract by composition, embedding a
//! `Provenance` and delegating [`QueryResult::query`] to it.

use serde_json::Value;

use crate::error::{Result, StratumError};

/// Contract satisfied by every query result.
pub trait QueryResult {
    /// The query text that produced this result.
    ///
    /// Pure accessor: returns the same value for the lifetime of the
    /// instance and performs no backend access.
    fn query(&self) -> &str;
}

/// Immutable query provenance, set once at construction.
///
/// Concrete result types embed a `Provenance` rather than reimplementing
/// the query field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provenance {
    query: String,
}

impl Provenance {
    /// Create a provenance tag from query text.
    pub fn new(query: impl Into<String>) -> Self {
        Self { query: query.into() }
    }

    /// Create a provenance tag from a dynamically-typed value.
    ///
    /// The value is coerced to its string form once, eagerly, via
    /// [`coerce_string`]. Values without a canonical string form fail with
    /// a coercion error before any field is set.
    pub fn from_value(value: &Value) -> Result<Self> {
        coerce_string(value).map(|query| Self { query })
    }

    /// The query text this tag was constructed with.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }
}

impl QueryResult for Provenance {
    fn query(&self) -> &str {
        &self.query
    }
}

/// Coerce a dynamically-typed value to its canonical string form.
///
/// This is the crate-wide coercion rule:
/// - strings pass through unchanged
/// - numbers render in canonical decimal form
/// - booleans render as `true` / `false`
/// - null, arrays, and objects have no canonical scalar form and fail
///   with a `Coercion` error
///
/// The rule fails closed: no truncation, no lossy fallback.
pub fn coerce_string(value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(StratumError::coercion(format!(
            "cannot represent {} as a string",
            value_kind(other)
        ))),
    }
}

/// Human-readable name for a JSON value kind, used in coercion errors.
const fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
