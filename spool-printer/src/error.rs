//! Error types for the printer library

use std::fmt;

use thiserror::Error;

/// Spooler transaction step, in lifecycle order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpoolStep {
    Open,
    StartDocument,
    StartPage,
    Write,
    EndPage,
    EndDocument,
    Close,
}

impl fmt::Display for SpoolStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SpoolStep::Open => "open printer",
            SpoolStep::StartDocument => "start document",
            SpoolStep::StartPage => "start page",
            SpoolStep::Write => "write",
            SpoolStep::EndPage => "end page",
            SpoolStep::EndDocument => "end document",
            SpoolStep::Close => "close printer",
        };
        f.write_str(name)
    }
}

/// Printer error types
#[derive(Debug, Error)]
pub enum PrintError {
    /// Missing or invalid request field (empty printer name, out of range option)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Payload could not be decoded into bytes
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// A spooler step reported failure
    #[error("Spooler {step} failed for '{printer}'{}", fmt_code(.code))]
    Spool {
        printer: String,
        step: SpoolStep,
        code: Option<u32>,
    },

    /// The spooler acknowledged fewer bytes than were submitted
    #[error("Incomplete write: {written} of {expected} bytes")]
    ShortWrite { expected: usize, written: usize },

    /// Printer enumeration failed
    #[error("Printer enumeration failed: {0}")]
    Enumeration(String),

    /// Fault raised inside the platform layer
    #[error("Unexpected spooler fault: {0}")]
    Unexpected(String),
}

fn fmt_code(code: &Option<u32>) -> String {
    match code {
        Some(code) => format!(" (error {})", code),
        None => String::new(),
    }
}

impl PrintError {
    /// Shorthand for a spooler step failure
    pub fn spool(printer: &str, step: SpoolStep, code: Option<u32>) -> Self {
        Self::Spool {
            printer: printer.to_string(),
            step,
            code,
        }
    }

    /// True for errors caused by the request rather than the printer
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::InvalidPayload(_))
    }
}

/// Result type for printer operations
pub type PrintResult<T> = Result<T, PrintError>;
