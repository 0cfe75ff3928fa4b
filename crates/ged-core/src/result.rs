//! Convenience result type alias for the GED client.

use crate::error::AppError;

/// A specialized `Result` type for GED client operations.
pub type AppResult<T> = Result<T, AppError>;
