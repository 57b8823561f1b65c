//! Connection Contract
//!
//! This module defines the capability contract implemented by concrete
//! database drivers: anything that can execute a query string and produce a
//! [`QueryResult`]. The crate ships no drivers; the [`mock`] module provides
//! in-memory implementations for tests and downstream development.
//!
//! # Concurrency
//! A connection owns an exclusive, mutable handle to the backend link, which
//! is why [`Connection::query`] takes `&mut self`. Concurrent use of a single
//! connection requires external synchronization; the simpler default is one
//! connection per concurrent caller. Results, once produced, are immutable
//! and safe to share.
//!
//! # Policy
//! The contract carries no retry, timeout, or cancellation policy. Such
//! policy belongs to concrete implementations and is configured at
//! construction, typically from a
//! [`ConnectionProfile`](crate::config::ConnectionProfile).

use std::future::Future;

use crate::error::Result;
use crate::result::QueryResult;

pub mod mock;

pub use mock::{FailingConnection, MockConnection, MockResult};

/// Capability contract for executing queries against a backend.
///
/// Implementations must:
/// - reject empty or whitespace-only query text before touching the backend
/// - surface link establishment/loss failures as the `Link` error kind
/// - wrap any other backend-native failure in the `Query` error kind
///
/// Link failures must never be caught and hidden; callers depend on the
/// stable kind to match on regardless of backend.
pub trait Connection {
    /// Concrete result type produced by this connection.
    type Output: QueryResult;

    /// Execute a query and return its result.
    ///
    /// `text` is a non-empty query string in the syntax the backend expects;
    /// this contract places no further constraints on it. Executing a query
    /// is inherently side-effecting; idempotence is a property of the query,
    /// not of this contract.
    fn query(&mut self, text: &str) -> impl Future<Output = Result<Self::Output>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // Callers are expected to depend on the contract alone; this helper is
    // generic over any implementation.
    async fn provenance_of<C: Connection>(conn: &mut C, text: &str) -> Result<String> {
        let result = conn.query(text).await?;
        Ok(result.query().to_string())
    }

    #[tokio::test]
    async fn test_generic_caller_sees_provenance() {
        let mut conn = MockConnection::new();
        let query = provenance_of(&mut conn, "SELECT 1").await.unwrap();
        assert_eq!(query, "SELECT 1");
    }

    #[tokio::test]
    async fn test_generic_caller_sees_link_failures() {
        let mut conn = FailingConnection::new("refused");
        let err = provenance_of(&mut conn, "SELECT 1").await.unwrap_err();
        assert_eq!(err.code(), "LINK_FAILED");
    }
}
