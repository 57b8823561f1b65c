//! Mock connections for testing.
//!
//! In-memory implementations of the [`Connection`] contract, used by the
//! crate's own tests and by downstream driver development. No backend is
//! involved; results are canned.

use serde_json::Value;
use tracing::debug;

use crate::connection::Connection;
use crate::error::{Result, StratumError};
use crate::result::{Provenance, QueryResult};

/// Canned query result returned by mock connections.
///
/// Embeds a [`Provenance`] and delegates the query accessor to it; the
/// composition pattern concrete driver results follow.
#[derive(Debug, Clone)]
pub struct MockResult {
    base: Provenance,
    rows: Vec<Value>,
    rows_affected: Option<u64>,
}

impl MockResult {
    /// Create a result carrying the given query text and rows.
    pub fn new(query: impl Into<String>, rows: Vec<Value>) -> Self {
        Self { base: Provenance::new(query), rows, rows_affected: None }
    }

    /// Attach an affected-row count.
    #[must_use]
    pub fn with_rows_affected(mut self, count: u64) -> Self {
        self.rows_affected = Some(count);
        self
    }

    /// Canned rows.
    #[must_use]
    pub fn rows(&self) -> &[Value] {
        &self.rows
    }

    /// Affected-row count, if one was attached.
    #[must_use]
    pub const fn rows_affected(&self) -> Option<u64> {
        self.rows_affected
    }
}

impl QueryResult for MockResult {
    fn query(&self) -> &str {
        self.base.query()
    }
}

/// A mock connection that returns predefined rows for every query.
#[derive(Debug, Clone, Default)]
pub struct MockConnection {
    rows: Vec<Value>,
    served: u64,
}

impl MockConnection {
    /// Create a mock connection that returns empty results.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock connection that returns the given rows for every query.
    #[must_use]
    pub fn with_rows(rows: Vec<Value>) -> Self {
        Self { rows, served: 0 }
    }

    /// Number of queries served so far.
    #[must_use]
    pub const fn queries_served(&self) -> u64 {
        self.served
    }
}

impl Connection for MockConnection {
    type Output = MockResult;

    async fn query(&mut self, text: &str) -> Result<MockResult> {
        if text.trim().is_empty() {
            return Err(StratumError::query("query text cannot be empty"));
        }

        self.served += 1;
        debug!(query = text, served = self.served, "mock connection executed query");

        Ok(MockResult::new(text, self.rows.clone()))
    }
}

/// A mock connection whose every query fails with a link error.
#[derive(Debug, Clone)]
pub struct FailingConnection {
    message: String,
}

impl FailingConnection {
    /// Create a failing connection with the given link-error message.
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl Connection for FailingConnection {
    type Output = MockResult;

    async fn query(&mut self, _text: &str) -> Result<MockResult> {
        Err(StratumError::link(self.message.clone()))
    }
}
