//! Shared utilities
//!
//! - [`AppError`] / [`ApiResponse`] - error type and response envelope
//! - [`logger`] - tracing setup
//! - [`validation`] - request field checks

pub mod error;
pub mod logger;
pub mod result;
pub mod validation;

pub use error::{ApiResponse, AppError, ok_with_message};
pub use result::AppResult;
