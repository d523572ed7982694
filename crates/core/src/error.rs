// Central Error Type for the Application

use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Validation failure, raised before any store access
    #[error("Domain error: {0}")]
    Domain(#[from] crate::domain::DomainError),

    /// Backing store unreachable or failing. Never retried here.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
}

impl AppError {
    pub fn is_store_unavailable(&self) -> bool {
        matches!(self, AppError::StoreUnavailable(_))
    }
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;

    #[test]
    fn test_only_store_failures_are_store_unavailable() {
        assert!(AppError::StoreUnavailable("pool closed".into()).is_store_unavailable());

        let validation: AppError = DomainError::InvalidDisposalMethod("drop".into()).into();
        assert!(!validation.is_store_unavailable());
        assert!(validation.to_string().contains("drop"));
    }
}
