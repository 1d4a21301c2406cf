//! Error types for the lead form.

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Submission error: {0}")]
    Submission(#[from] SubmissionError),

    #[error("Form error: {0}")]
    Form(#[from] FormError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Draft storage errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to open storage: {0}")]
    Open(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors raised while relaying a submission to the ingestion endpoint.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("Request to {endpoint} failed: {reason}")]
    Transport { endpoint: String, reason: String },
}

/// Misuse of the form session API (unknown field, wrong control kind, etc.).
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Field {field} has no option {option}")]
    UnknownOption { field: String, option: String },

    #[error("Field {field} is not a {expected} control")]
    WrongKind {
        field: String,
        expected: &'static str,
    },

    #[error("Form values are incomplete: {0}")]
    Incomplete(String),
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;
