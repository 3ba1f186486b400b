//! Error types for skill-mastery.
//!
//! The evaluators themselves are total and never return errors. Only
//! validation of admin-authored documents and the storage layer can fail.

/// Error types covering validation and persistence.
#[derive(Debug, thiserror::Error)]
pub enum MasteryError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid reward rule: {0}")]
    InvalidRule(String),

    #[error("Invalid rank ladder: {0}")]
    InvalidLadder(String),

    #[error("Invalid mastery requirement: {0}")]
    InvalidRequirement(String),

    #[error("Attempt already recorded: {0}")]
    DuplicateAttempt(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Invalid file format: {0}")]
    InvalidFileFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, MasteryError>;
