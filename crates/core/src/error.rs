//! Domain error model.

use thiserror::Error as ThisError;

/// Result type used across the pricelist crates.
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy shared by the service and the persistence gateway.
///
/// Each variant carries a fixed HTTP status so the API layer can map
/// errors uniformly in one place.
#[derive(Debug, ThisError, Clone, PartialEq, Eq)]
pub enum Error {
    /// Input failed validation. Carries every applicable message, not
    /// just the first.
    #[error("Validation failed")]
    Validation(Vec<String>),

    /// A storage-level constraint (NOT NULL, CHECK, foreign key) was
    /// violated.
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// A uniqueness conflict.
    #[error("Duplicate entry")]
    Duplicate(String),

    /// The addressed record does not exist.
    #[error("{resource} with id {id} not found")]
    NotFound { resource: &'static str, id: i32 },

    /// Any other storage failure. The driver message is preserved for
    /// logs only.
    #[error("Database error")]
    Storage(String),
}

impl Error {
    pub fn validation(errors: Vec<String>) -> Self {
        Self::Validation(errors)
    }

    pub fn not_found(resource: &'static str, id: i32) -> Self {
        Self::NotFound { resource, id }
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// HTTP status code equivalent for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Validation(_) | Error::Constraint(_) => 400,
            Error::NotFound { .. } => 404,
            Error::Duplicate(_) => 409,
            Error::Storage(_) => 500,
        }
    }
}
