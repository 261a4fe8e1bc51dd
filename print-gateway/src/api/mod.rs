//! API routes
//!
//! - [`health`] - liveness probe
//! - [`print`] - printer listing and print submission

pub mod health;
pub mod print;

// Re-export common types for handlers
pub use crate::utils::{ApiResponse, AppResult};
