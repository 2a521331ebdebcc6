use sea_orm::DbErr;

use super::Error;

/// Strategy for handling errors in a retry context
#[derive(Debug, PartialEq, Eq)]
pub enum ErrorRetryStrategy {
    /// Retry with exponential backoff (transient store failures)
    Retry,
    /// Failed permanently (bad request, conflict, bug)
    Fail,
}

impl Error {
    /// Determine error retry strategy based upon application Error type
    pub fn to_retry_strategy(&self) -> ErrorRetryStrategy {
        match self {
            Self::DbErr(db_err) => match db_err {
                // Connection acquisition errors - transient, should retry
                DbErr::ConnectionAcquire(_) => ErrorRetryStrategy::Retry,
                // Connection errors - transient, should retry
                DbErr::Conn(_) => ErrorRetryStrategy::Retry,

                // Query errors, constraint violations and type conversion errors won't
                // resolve with a retry
                _ => ErrorRetryStrategy::Fail,
            },

            // Validation and not-found errors - the caller has to change the input
            Self::ValidationError(_) => ErrorRetryStrategy::Fail,
            Self::NotFoundError(_) => ErrorRetryStrategy::Fail,

            // Conflicts are surfaced so the caller can re-read state first
            Self::ConflictError(_) => ErrorRetryStrategy::Fail,

            // Auth and configuration errors - permanent failures
            Self::AuthError(_) => ErrorRetryStrategy::Fail,
            Self::ConfigError(_) => ErrorRetryStrategy::Fail,

            // Image host failures are reported to the uploader, who may resubmit
            Self::ImageHostError(_) => ErrorRetryStrategy::Fail,
            Self::ReqwestError(_) => ErrorRetryStrategy::Fail,
        }
    }
}
