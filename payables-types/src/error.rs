//! Error types for the payables service.

use crate::domain::Method;

/// Domain-level errors (business rule violations).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error("Value must be a positive integer, got {0}")]
    NonPositiveValue(i64),

    #[error("A {0} transaction requires card data")]
    MissingCard(Method),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Repository-level errors (data access failures).
///
/// `Clone` so a configured failure can be handed out repeatedly.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Database error: {0}")]
    Database(String),
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

/// Every storage failure is fatal to the request.
impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        AppError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_errors_map_to_internal_with_message() {
        let err: AppError = RepoError::Database("disk full".into()).into();
        assert!(matches!(err, AppError::Internal(ref msg) if msg == "Database error: disk full"));

        let err: AppError = RepoError::Domain(DomainError::MissingCard(Method::DebitCard)).into();
        assert!(
            matches!(err, AppError::Internal(ref msg) if msg == "A debit_card transaction requires card data")
        );
    }

    #[test]
    fn test_domain_errors_map_to_bad_request() {
        let err: AppError = DomainError::NonPositiveValue(0).into();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
