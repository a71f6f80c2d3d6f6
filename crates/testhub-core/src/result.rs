//! Convenience result type alias for TestHub.

use crate::error::AppError;

/// A specialized `Result` type for TestHub operations.
pub type AppResult<T> = Result<T, AppError>;
