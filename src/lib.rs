//! Stratum - Database-Abstraction Contracts
//!
//! Stratum is the database-abstraction layer of a general-purpose utility
//! library: the contracts concrete database drivers implement, plus the
//! shared value types, error kinds, validation primitives, and
//! connection-profile configuration those drivers and their callers need.
//!
//! # Core Contracts
//! - [`Connection`]: anything that can execute a query string and produce a result
//! - [`QueryResult`]: a query outcome, permanently tagged with the query that produced it
//! - [`Validator`]: anything that can take an arbitrary value and produce a validation outcome
//!
//! No drivers ship with this crate. Mock connections are provided for tests
//! and downstream development; everything else is contract and plumbing.
//!
//! # Module Organization
//! - [`error`] - Error kinds and structured reports
//! - [`result`] - Query results, provenance, and the string-coercion rule
//! - [`connection`] - The connection contract and mock implementations
//! - [`validate`] - The validation contract and query-text validators
//! - [`config`] - Connection profiles and the on-disk registry

pub mod config;
pub mod connection;
pub mod error;
pub mod result;
pub mod validate;

// Re-export commonly used types for convenience
pub use config::{registry_path, ConnectionProfile, ProfileRegistry};
pub use connection::{Connection, FailingConnection, MockConnection, MockResult};
pub use error::{ErrorReport, Result, StratumError};
pub use result::{coerce_string, Provenance, QueryResult};
pub use validate::{Chain, NonEmpty, SingleStatement, ValidationResult, Validator};
