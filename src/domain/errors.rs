//! Domain errors for the side-by-side extension service.

use thiserror::Error;

/// Domain-level errors that can occur while serving entity reads.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{entity} with key {key} not found")]
    NotFound { entity: String, key: String },

    #[error("Expected a single {entity} for key {key}, found {count}")]
    MultipleResults { entity: String, key: String, count: usize },

    #[error("Unknown entity set: {service}/{entity}")]
    UnknownEntity { service: String, entity: String },

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Remote product source error: {0}")]
    RemoteSource(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl DomainError {
    /// Shorthand for a keyed lookup that came back empty.
    pub fn not_found(entity: impl Into<String>, key: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.into(),
            key: key.to_string(),
        }
    }

    /// Stable machine-readable code used in OData error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::MultipleResults { .. } => "MULTIPLE_RESULTS",
            Self::UnknownEntity { .. } => "UNKNOWN_ENTITY",
            Self::ValidationFailed(_) => "VALIDATION_FAILED",
            Self::RemoteSource(_) => "REMOTE_SOURCE_ERROR",
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::SerializationError(_) => "SERIALIZATION_ERROR",
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        DomainError::DatabaseError(err.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::SerializationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = DomainError::not_found("Books", 42);
        assert_eq!(err.to_string(), "Books with key 42 not found");
        assert_eq!(err.code(), "NOT_FOUND");
    }

    #[test]
    fn test_multiple_results_message() {
        let err = DomainError::MultipleResults {
            entity: "Books".to_string(),
            key: "1".to_string(),
            count: 2,
        };
        assert_eq!(err.to_string(), "Expected a single Books for key 1, found 2");
    }

    #[test]
    fn test_from_serde_error() {
        let err: DomainError = serde_json::from_str::<i64>("nope").unwrap_err().into();
        assert!(matches!(err, DomainError::SerializationError(_)));
    }
}
