//! Receipt printing
//!
//! - [`PrintService`] - frames jobs and runs spooler submissions off the async runtime
//! - [`PrinterLocks`] - optional one-job-at-a-time per printer
//! - [`sample`] - canned test receipt

pub mod locks;
pub mod sample;
pub mod service;

pub use locks::PrinterLocks;
pub use service::PrintService;
