use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Errors loading a [`crate::config::BuilderConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// A single validator complaint about one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// JSON pointer to the offending value; empty for the whole form
    pub pointer: String,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.pointer.is_empty() {
            write!(f, "<root>: {}", self.message)
        } else {
            write!(f, "{}: {}", self.pointer, self.message)
        }
    }
}

/// Submitted values that do not satisfy the generated schema.
///
/// Displays as one notice; `errors` keeps the per-field detail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("form submission failed validation ({} errors)", .errors.len())]
pub struct ValidationFailure {
    pub errors: Vec<FieldError>,
}

#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("Schema cannot be compiled: {0}")]
    InvalidSchema(String),

    #[error(transparent)]
    Validation(#[from] ValidationFailure),
}

pub type PreviewResult<T> = Result<T, PreviewError>;
