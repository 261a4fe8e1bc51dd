//! Print Gateway - HTTP front end for raw receipt printing
//!
//! Accepts print jobs as JSON, frames them as ESC/POS and hands the bytes
//! to the local print spooler through `spool-printer`.
//!
//! # Module structure
//!
//! ```text
//! print-gateway/src/
//! ├── core/          # config, state, server
//! ├── api/           # HTTP routes and handlers
//! ├── printing/      # print service, per-printer locks, test receipt
//! └── utils/         # errors, logging, validation
//! ```

pub mod api;
pub mod core;
pub mod printing;
pub mod utils;

// Re-export public types
pub use crate::core::{Config, Server, ServerState, build_app};
pub use utils::{ApiResponse, AppError, AppResult};

/// Initialize logging from the loaded configuration
pub fn setup_environment(config: &Config) {
    utils::logger::init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());
}
