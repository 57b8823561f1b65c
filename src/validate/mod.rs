//! Value Validation
//!
//! This module defines the validation capability contract: anything that can
//! take an arbitrary value and produce a [`ValidationResult`]. A failed
//! validation is a normal-path outcome carried in the returned value, never
//! an error; the error channel is reserved for the mechanism itself breaking.
//!
//! Validators are stateless and deterministic: the same input produces the
//! same outcome, and no synchronization is needed for concurrent use.
//!
//! The concrete validators shipped here screen query text before it reaches
//! a backend: [`NonEmpty`] and [`SingleStatement`], plus the [`Chain`]
//! combinator for running several checks in sequence.

use serde_json::Value;

use crate::result::coerce_string;

/// Capability contract for validating arbitrary values.
pub trait Validator {
    /// Validate a value.
    ///
    /// Always returns an outcome; a value failing validation is not an
    /// error. Implementations must be pure functions of the input.
    fn validate(&self, value: &Value) -> ValidationResult;
}

/// Outcome of a validation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ValidationResult {
    passed: bool,
    messages: Vec<String>,
}

impl ValidationResult {
    /// A passing outcome with no messages.
    #[must_use]
    pub const fn pass() -> Self {
        Self { passed: true, messages: Vec::new() }
    }

    /// A failing outcome carrying one message.
    pub fn fail(message: impl Into<String>) -> Self {
        Self { passed: false, messages: vec![message.into()] }
    }

    /// Whether the value passed validation.
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.passed
    }

    /// Messages accumulated during validation.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Combine two outcomes: passes only if both passed, messages are
    /// concatenated in order.
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        self.passed = self.passed && other.passed;
        self.messages.extend(other.messages);
        self
    }
}

/// Requires a value whose text form contains a non-whitespace character.
///
/// Values with no canonical text form fail validation with a message.
#[derive(Debug, Clone, Copy, Default)]
pub struct NonEmpty;

impl Validator for NonEmpty {
    fn validate(&self, value: &Value) -> ValidationResult {
        match coerce_string(value) {
            Ok(text) if !text.trim().is_empty() => ValidationResult::pass(),
            Ok(_) => ValidationResult::fail("value must not be empty"),
            Err(_) => ValidationResult::fail("value is not representable as text"),
        }
    }
}

/// Requires a value whose text form holds at most one SQL statement.
///
/// SQL comments are stripped before the check and a trailing semicolon is
/// tolerated; any remaining semicolon means a second statement.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleStatement;

impl Validator for SingleStatement {
    fn validate(&self, value: &Value) -> ValidationResult {
        let text = match coerce_string(value) {
            Ok(text) => text,
            Err(_) => return ValidationResult::fail("value is not representable as text"),
        };

        let stripped = strip_sql_comments(&text);
        let body = stripped.trim().trim_end_matches(';');
        if body.contains(';') {
            ValidationResult::fail("value must hold a single statement")
        } else {
            ValidationResult::pass()
        }
    }
}

/// Strip SQL comments from query text.
///
/// Handles line comments (`-- ...`) and block comments (`/* ... */`).
/// Line comments keep their terminating newline; block comments are replaced
/// with a single space so adjacent tokens stay separated.
fn strip_sql_comments(sql: &str) -> String {
    let mut out = String::with_capacity(sql.len());
    let mut chars = sql.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '-' if chars.peek() == Some(&'-') => {
                chars.next();
                for ch in chars.by_ref() {
                    if ch == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = ' ';
                for ch in chars.by_ref() {
                    if prev == '*' && ch == '/' {
                        break;
                    }
                    prev = ch;
                }
                out.push(' ');
            }
            _ => out.push(ch),
        }
    }

    out
}

/// Runs a sequence of validators, merging every outcome.
///
/// Passes only if all validators pass; all failure messages are collected.
#[derive(Default)]
pub struct Chain {
    validators: Vec<Box<dyn Validator>>,
}

impl Chain {
    /// An empty chain, which passes everything.
    #[must_use]
    pub fn new() -> Self {
        Self { validators: Vec::new() }
    }

    /// Append a validator to the chain.
    #[must_use]
    pub fn with(mut self, validator: impl Validator + 'static) -> Self {
        self.validators.push(Box::new(validator));
        self
    }
}

impl Validator for Chain {
    fn validate(&self, value: &Value) -> ValidationResult {
        self.validators
            .iter()
            .fold(ValidationResult::pass(), |outcome, v| outcome.merge(v.validate(value)))
    }
}
