//! Contract Integration Tests
//!
//! These tests exercise the crate's contracts together, the way a driver
//! crate and its callers would: connections produce provenance-tagged
//! results, link failures surface with a stable kind, validators screen
//! query text before it is submitted, and profiles round-trip through the
//! on-disk registry.

use pretty_assertions::assert_eq;
use serde_json::json;
use stratum::{
    Chain, Connection, ConnectionProfile, FailingConnection, MockConnection, NonEmpty,
    ProfileRegistry, QueryResult, SingleStatement, StratumError, Validator,
};

// ============================================================================
// Test Helpers
// ============================================================================

/// Run a query through any connection, returning the result's provenance.
///
/// Generic on purpose: callers may depend only on the contracts, never on a
/// concrete connection or result type.
async fn query_provenance<C: Connection>(conn: &mut C, text: &str) -> stratum::Result<String> {
    let result = conn.query(text).await?;
    Ok(result.query().to_string())
}

// ============================================================================
// End-to-End Scenarios
// ============================================================================

#[tokio::test]
async fn test_query_result_carries_submitted_query() {
    let mut conn = MockConnection::with_rows(vec![json!({"one": 1})]);

    let result = conn.query("SELECT 1").await.expect("mock query should succeed");
    assert_eq!(result.query(), "SELECT 1");
}

#[tokio::test]
async fn test_link_failure_reaches_the_caller_with_stable_kind() {
    let mut conn = FailingConnection::new("refused");

    let err = conn.query("SELECT 1").await.expect_err("failing connection must error");
    assert!(matches!(err, StratumError::Link { .. }), "expected the link kind, got {err:?}");
    assert_eq!(err.title(), "Database Link Error");
    assert_eq!(err.message(), "refused");
}

#[tokio::test]
async fn test_callers_need_only_the_contracts() {
    let mut ok = MockConnection::new();
    let query = query_provenance(&mut ok, "SELECT version()").await.unwrap();
    assert_eq!(query, "SELECT version()");

    let mut failing = FailingConnection::new("host unreachable");
    let err = query_provenance(&mut failing, "SELECT version()").await.unwrap_err();
    assert_eq!(err.code(), "LINK_FAILED");
}

// ============================================================================
// Validation Before Submission
// ============================================================================

#[tokio::test]
async fn test_screened_query_flow() {
    let screen = Chain::new().with(NonEmpty).with(SingleStatement);
    let mut conn = MockConnection::new();

    // A value that fails screening never reaches the connection.
    let outcome = screen.validate(&json!("SELECT 1; DROP TABLE users"));
    assert!(!outcome.passed());
    assert_eq!(conn.queries_served(), 0);

    // A value that passes screening is submitted as-is.
    let outcome = screen.validate(&json!("SELECT 1"));
    assert!(outcome.passed());
    let result = conn.query("SELECT 1").await.unwrap();
    assert_eq!(result.query(), "SELECT 1");
    assert_eq!(conn.queries_served(), 1);
}

#[test]
fn test_validation_failure_is_not_an_error() {
    // Failing validation communicates through the outcome value; the error
    // channel stays reserved for the mechanism itself breaking.
    let outcome = NonEmpty.validate(&json!(""));
    assert!(!outcome.passed());
    assert_eq!(outcome.messages(), ["value must not be empty"]);
}

// ============================================================================
// Profile Registry Wiring
// ============================================================================

#[test]
fn test_profiles_round_trip_and_resolve() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("connections.json");

    let mut registry = ProfileRegistry::default();
    registry.insert(
        "ci",
        ConnectionProfile::server("postgres", "db.internal", 5432, "ci", "reports"),
    );
    registry.insert("scratch", ConnectionProfile::file("sqlite", dir.path().join("scratch.db")));
    registry.set_default("ci").unwrap();
    registry.save(&path).unwrap();

    let loaded = ProfileRegistry::load(&path).unwrap();
    assert_eq!(loaded.names(), ["ci", "scratch"]);

    let profile = loaded.resolve(None).unwrap();
    assert_eq!(profile.backend, "postgres");
    assert_eq!(profile.host.as_deref(), Some("db.internal"));

    let err = loaded.resolve(Some("prod")).unwrap_err();
    assert_eq!(err.code(), "CONFIG_ERROR");
}
