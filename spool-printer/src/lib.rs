//! # spool-printer
//!
//! Raw ESC/POS printing through the operating system's print spooler.
//!
//! ## Scope
//!
//! - Payload framing: hex / text decoding, line feeds, cutter trailer
//! - Text code pages (CP437 built in, everything else via `encoding_rs`)
//! - One RAW spooler job per submission, with guaranteed cleanup
//! - Installed printer listing
//!
//! HTTP transport stays in `print-gateway`.
//!
//! ## Example
//!
//! ```ignore
//! use spool_printer::{ContentType, CutType, PrintJob, RawSpooler, build_payload, system_backend};
//!
//! let job = PrintJob::new("POS-80", ContentType::EscPosText, "Hello")?
//!     .with_cut(CutType::Full)
//!     .with_feed_lines(3);
//! let bytes = build_payload(&job)?;
//!
//! let spooler = RawSpooler::new(system_backend());
//! spooler.submit(job.printer_name(), &bytes)?;
//! ```

mod directory;
mod encoding;
mod error;
mod escpos;
mod job;
mod platform;
mod spooler;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-exports
pub use directory::{PrinterDescriptor, list_printers};
pub use encoding::{DEFAULT_ENCODING, TextCodec};
pub use error::{PrintError, PrintResult, SpoolStep};
pub use escpos::{FrameBuilder, build_payload, decode_hex, frame_bytes_with_cut, frame_text_with_cut};
pub use job::{ContentType, CutType, DEFAULT_FEED_LINES, PrintJob, validate_printer_name};
pub use platform::system_backend;
pub use spooler::{DEFAULT_DOC_NAME, RawSpooler, SpoolBackend, SpoolSession};

#[cfg(unix)]
pub use platform::CupsSpool;

#[cfg(windows)]
pub use platform::WinSpool;
