//! Unified Result Types

use super::error::AppError;

/// Application-level Result type
///
/// Used in HTTP handlers and the print service
pub type AppResult<T> = Result<T, AppError>;
