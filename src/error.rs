//! Error Kinds
//!
//! This module defines the database-error kind family shared by every
//! component of the crate. Each kind carries a caller-supplied message and,
//! where meaningful, an underlying cause, plus fixed descriptive data (a
//! stable code, a short title, and a one-line description) for error
//! reporting.
//!
//! # Error Kinds
//! - `Link`: failure to establish or maintain the connection to a backend
//! - `Query`: failure while executing a query, wrapping any backend-native error
//! - `Coercion`: a value could not be converted to the required string form
//! - `Config`: connection-profile registry errors
//!
//! # Propagation
//! Connection implementations must surface link failures as the `Link` kind
//! and wrap every other backend-native failure in the `Query` kind, so that
//! callers have stable kinds to match on regardless of backend.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Underlying cause attached to an error kind.
pub type Cause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for all crate operations
#[derive(Error, Debug)]
pub enum StratumError {
    /// Establishing or maintaining the backend link failed
    #[error("database link error: {message}")]
    Link {
        message: String,
        #[source]
        source: Option<Cause>,
    },

    /// Query execution failed (wraps backend-native errors)
    #[error("query execution failed: {message}")]
    Query {
        message: String,
        #[source]
        source: Option<Cause>,
    },

    /// A value could not be coerced to a string
    #[error("coercion failed: {message}")]
    Coercion { message: String },

    /// Profile registry error (file unreadable, invalid JSON, unknown profile)
    #[error("configuration error: {message}")]
    Config { message: String },
}

impl StratumError {
    /// Stable code for this error kind, suitable for programmatic handling.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Link { .. } => "LINK_FAILED",
            Self::Query { .. } => "QUERY_FAILED",
            Self::Coercion { .. } => "COERCION_FAILED",
            Self::Config { .. } => "CONFIG_ERROR",
        }
    }

    /// Short title for this error kind.
    ///
    /// Fixed per kind, independent of the message or cause supplied at
    /// construction.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Link { .. } => "Database Link Error",
            Self::Query { .. } => "Database Query Error",
            Self::Coercion { .. } => "Type Coercion Error",
            Self::Config { .. } => "Configuration Error",
        }
    }

    /// One-line description of this error kind.
    ///
    /// Fixed per kind, like [`title`](Self::title).
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Link { .. } => "Errors encountered while connecting to a database",
            Self::Query { .. } => "Errors encountered while executing a query",
            Self::Coercion { .. } => "Errors encountered while converting a value to a string",
            Self::Config { .. } => "Errors encountered while reading or writing configuration",
        }
    }

    /// The message supplied when this error was constructed.
    ///
    /// Messages must not contain credentials or other sensitive data; they
    /// are safe to include in reports and logs.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Link { message, .. }
            | Self::Query { message, .. }
            | Self::Coercion { message }
            | Self::Config { message } => message,
        }
    }

    /// Build a structured report of this error.
    #[must_use]
    pub fn report(&self) -> ErrorReport {
        ErrorReport::from(self)
    }

    /// Create a link error
    pub fn link(message: impl Into<String>) -> Self {
        Self::Link { message: message.into(), source: None }
    }

    /// Create a link error with an underlying cause
    pub fn link_from(message: impl Into<String>, source: impl Into<Cause>) -> Self {
        Self::Link { message: message.into(), source: Some(source.into()) }
    }

    /// Create a query error
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query { message: message.into(), source: None }
    }

    /// Create a query error wrapping a backend-native cause
    pub fn query_from(message: impl Into<String>, source: impl Into<Cause>) -> Self {
        Self::Query { message: message.into(), source: Some(source.into()) }
    }

    /// Create a coercion error
    pub fn coercion(message: impl Into<String>) -> Self {
        Self::Coercion { message: message.into() }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config { message: message.into() }
    }
}

/// Result type alias for crate operations
pub type Result<T> = std::result::Result<T, StratumError>;

/// Serializable error report
///
/// Combines the fixed descriptive data of an error kind with the dynamic
/// message, in a shape stable enough for programmatic consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Stable error code (e.g. "LINK_FAILED")
    pub code: String,

    /// Short title of the error kind
    pub title: String,

    /// One-line description of the error kind
    pub description: String,

    /// Message supplied at construction
    pub message: String,
}

impl From<&StratumError> for ErrorReport {
    fn from(err: &StratumError) -> Self {
        Self {
            code: err.code().to_string(),
            title: err.title().to_string(),
            description: err.description().to_string(),
            message: err.message().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_codes() {
        assert_eq!(StratumError::link("test").code(), "LINK_FAILED");
        assert_eq!(StratumError::query("test").code(), "QUERY_FAILED");
        assert_eq!(StratumError::coercion("test").code(), "COERCION_FAILED");
        assert_eq!(StratumError::config("test").code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_link_title_and_description_are_fixed() {
        // Title and description do not depend on the message or cause.
        let plain = StratumError::link("refused");
        let caused = StratumError::link_from(
            "timed out",
            std::io::Error::new(std::io::ErrorKind::TimedOut, "socket timeout"),
        );

        for err in [&plain, &caused] {
            assert_eq!(err.title(), "Database Link Error");
            assert_eq!(err.description(), "Errors encountered while connecting to a database");
        }
    }

    #[test]
    fn test_message_is_the_constructed_message() {
        let err = StratumError::link("connection refused by 127.0.0.1");
        assert_eq!(err.message(), "connection refused by 127.0.0.1");

        let err = StratumError::query_from(
            "syntax error",
            std::io::Error::new(std::io::ErrorKind::InvalidData, "native detail"),
        );
        assert_eq!(err.message(), "syntax error");
    }

    #[test]
    fn test_source_chain() {
        use std::error::Error as _;

        let err = StratumError::link_from(
            "refused",
            std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "ECONNREFUSED"),
        );
        let source = err.source().expect("cause should be attached");
        assert!(source.to_string().contains("ECONNREFUSED"));

        let err = StratumError::link("refused");
        assert!(err.source().is_none());
    }

    #[test]
    fn test_display_includes_message() {
        let err = StratumError::link("refused");
        assert_eq!(err.to_string(), "database link error: refused");

        let err = StratumError::coercion("cannot represent null as a string");
        assert!(err.to_string().contains("cannot represent null"));
    }

    #[test]
    fn test_report_fields() {
        let err = StratumError::link("refused");
        let report = err.report();

        assert_eq!(report.code, "LINK_FAILED");
        assert_eq!(report.title, "Database Link Error");
        assert_eq!(report.description, "Errors encountered while connecting to a database");
        assert_eq!(report.message, "refused");
    }
}
