//! Domain-level errors (no I/O concerns)

use thiserror::Error;

/// Domain errors represent malformed catalog input.
/// Lookup misses are not errors: queries return `Option` or an empty `Vec`.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("malformed dataset: {0}")]
    Dataset(#[from] serde_json::Error),

    #[error("unknown grade: {0:?}")]
    UnknownGrade(String),

    #[error("cannot tokenize prerequisites at {remainder:?}")]
    UnexpectedInput { remainder: String },

    #[error("invalid prerequisite expression {input:?}: {message}")]
    InvalidPrerequisites { input: String, message: String },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
