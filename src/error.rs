//! Error handling module
//!
//! Centralized error type for ledger operations and transfer transactions.

/// Library-wide Result type
pub type StoreResult<T> = Result<T, StoreError>;

/// Postgres SQLSTATE for `serialization_failure`
const SERIALIZATION_FAILURE: &str = "40001";

/// Postgres SQLSTATE for `deadlock_detected`
const DEADLOCK_DETECTED: &str = "40P01";

/// Errors returned by the ledger and the transfer coordinator
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    // Request errors, raised before any transaction is opened
    #[error("Invalid amount: must be positive (got {0})")]
    InvalidAmount(i64),

    #[error("Cannot transfer to the same account: {0}")]
    SameAccountTransfer(i64),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },

    // Store errors
    #[error("Failed to begin transaction: {0}")]
    Begin(#[source] sqlx::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Failed to commit transaction: {0}")]
    Commit(#[source] sqlx::Error),

    /// The transaction failed and rolling it back failed as well
    #[error("{source}; rollback also failed: {rollback}")]
    Rollback {
        source: Box<StoreError>,
        rollback: sqlx::Error,
    },
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound { entity, id }
    }

    /// Check if this error is a missing row
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::Rollback { source, .. } => source.is_not_found(),
            _ => false,
        }
    }

    /// SQLSTATE reported by Postgres, if the failure came from the server
    pub fn sqlstate(&self) -> Option<String> {
        match self {
            Self::Begin(e) | Self::Database(e) | Self::Commit(e) => e
                .as_database_error()
                .and_then(|db| db.code())
                .map(|code| code.into_owned()),
            Self::Rollback { source, .. } => source.sqlstate(),
            _ => None,
        }
    }

    /// Check if the caller may retry the whole transfer.
    ///
    /// True for serialization failures and deadlocks reported by the store.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.sqlstate().as_deref(),
            Some(SERIALIZATION_FAILURE) | Some(DEADLOCK_DETECTED)
        )
    }

    /// Check if this error is the caller's fault: a rejected request or a
    /// missing row, as opposed to a store failure
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidAmount(_) | Self::SameAccountTransfer(_) | Self::NotFound { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_not_found_display() {
        let err = StoreError::not_found("account", 42);
        assert_eq!(err.to_string(), "account not found: 42");
        assert!(err.is_not_found());
        assert!(err.is_client_error());
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_rollback_reports_both_causes() {
        let err = StoreError::Rollback {
            source: Box::new(StoreError::not_found("account", 9)),
            rollback: sqlx::Error::PoolClosed,
        };

        let message = err.to_string();
        assert!(message.contains("account not found: 9"));
        assert!(message.contains("rollback also failed"));
        assert!(err.is_not_found());
        assert!(err.source().is_some());
    }

    #[test]
    fn test_non_database_errors_have_no_sqlstate() {
        let err = StoreError::Begin(sqlx::Error::PoolTimedOut);
        assert_eq!(err.sqlstate(), None);
        assert!(!err.is_retryable());
        assert!(!err.is_client_error());

        let err = StoreError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, StoreError::Database(_)));
    }

    #[test]
    fn test_request_errors() {
        assert!(StoreError::InvalidAmount(0).is_client_error());
        assert!(StoreError::SameAccountTransfer(1)
            .to_string()
            .contains("same account"));
    }
}
