//! Raw spooler client
//!
//! Submits one RAW document to an installed printer. The spooler transaction
//! always runs open → start document → start page → write → end page → end
//! document → close. On success the closing steps are part of the result;
//! on any failure every step that succeeded is still released in reverse
//! order.

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use crate::error::{PrintError, PrintResult, SpoolStep};
use crate::job::validate_printer_name;
use tracing::{error, info, instrument, warn};

/// Document name shown in the OS print queue
pub const DEFAULT_DOC_NAME: &str = "Raw Print Job";

/// Platform print subsystem
pub trait SpoolBackend: Send + Sync {
    /// Open a printer by name
    fn open_printer(&self, name: &str) -> PrintResult<Box<dyn SpoolSession + '_>>;

    /// Names of the printers registered with the OS, in OS order
    fn enum_printers(&self) -> PrintResult<Vec<String>>;

    /// Name of the OS default printer, if one is set
    fn default_printer(&self) -> PrintResult<Option<String>>;
}

/// One open printer handle
pub trait SpoolSession {
    fn start_document(&mut self, doc_name: &str) -> PrintResult<()>;

    fn start_page(&mut self) -> PrintResult<()>;

    /// Write bytes, returning how many the spooler acknowledged
    fn write(&mut self, data: &[u8]) -> PrintResult<usize>;

    fn end_page(&mut self) -> PrintResult<()>;

    fn end_document(&mut self) -> PrintResult<()>;

    fn close(&mut self) -> PrintResult<()>;
}

/// Scoped spooler transaction
///
/// Tracks which steps are open. [`JobScope::finish`] closes them and reports
/// failures; whatever is still open on drop is released page before
/// document before printer, with failures only logged.
struct JobScope<'a> {
    session: Box<dyn SpoolSession + 'a>,
    printer: &'a str,
    printer_open: bool,
    doc_open: bool,
    page_open: bool,
}

impl<'a> JobScope<'a> {
    fn new(session: Box<dyn SpoolSession + 'a>, printer: &'a str) -> Self {
        Self {
            session,
            printer,
            printer_open: true,
            doc_open: false,
            page_open: false,
        }
    }

    fn start_document(&mut self, doc_name: &str) -> PrintResult<()> {
        self.session.start_document(doc_name)?;
        self.doc_open = true;
        Ok(())
    }

    fn start_page(&mut self) -> PrintResult<()> {
        self.session.start_page()?;
        self.page_open = true;
        Ok(())
    }

    fn write(&mut self, data: &[u8]) -> PrintResult<usize> {
        self.session.write(data)
    }

    /// End page, end document and close, stopping at the first failure
    ///
    /// Spoolers may only accept the job when the document ends, so these
    /// steps decide the outcome. Steps after a failed one are left to drop.
    fn finish(&mut self) -> PrintResult<()> {
        if self.page_open {
            self.page_open = false;
            self.session.end_page()?;
        }
        if self.doc_open {
            self.doc_open = false;
            self.session.end_document()?;
        }
        if self.printer_open {
            self.printer_open = false;
            self.session.close()?;
        }
        Ok(())
    }

    fn release(&mut self, step: SpoolStep, result: PrintResult<()>) {
        if let Err(e) = result {
            warn!(printer = self.printer, %step, error = %e, "Spooler release step failed");
        }
    }
}

impl Drop for JobScope<'_> {
    fn drop(&mut self) {
        if self.page_open {
            self.page_open = false;
            let result = self.session.end_page();
            self.release(SpoolStep::EndPage, result);
        }
        if self.doc_open {
            self.doc_open = false;
            let result = self.session.end_document();
            self.release(SpoolStep::EndDocument, result);
        }
        if self.printer_open {
            self.printer_open = false;
            let result = self.session.close();
            self.release(SpoolStep::Close, result);
        }
    }
}

/// Raw spooler client
#[derive(Clone)]
pub struct RawSpooler {
    backend: Arc<dyn SpoolBackend>,
    doc_name: String,
}

impl RawSpooler {
    pub fn new(backend: Arc<dyn SpoolBackend>) -> Self {
        Self {
            backend,
            doc_name: DEFAULT_DOC_NAME.to_string(),
        }
    }

    /// Set the document name shown in the OS queue
    pub fn with_doc_name(mut self, doc_name: impl Into<String>) -> Self {
        self.doc_name = doc_name.into();
        self
    }

    pub fn backend(&self) -> &dyn SpoolBackend {
        self.backend.as_ref()
    }

    /// Submit one raw job, blocking until the spooler has accepted it
    ///
    /// Succeeds only when the spooler acknowledged every byte. A fault raised
    /// by the platform layer is reported as [`PrintError::Unexpected`] after
    /// the opened resources have been released.
    #[instrument(skip(self, data), fields(data_len = data.len()))]
    pub fn submit(&self, printer_name: &str, data: &[u8]) -> PrintResult<()> {
        validate_printer_name(printer_name)?;

        let outcome = catch_unwind(AssertUnwindSafe(|| self.transact(printer_name, data)))
            .unwrap_or_else(|panic| Err(PrintError::Unexpected(panic_message(panic.as_ref()))));

        match &outcome {
            Ok(()) => info!("Print job sent successfully"),
            Err(e) if e.is_validation() => warn!(error = %e, "Print job rejected"),
            Err(e @ PrintError::Spool { code, .. }) => {
                error!(error = %e, code = ?code, "Print job failed")
            }
            Err(e) => error!(error = %e, "Print job failed"),
        }
        outcome
    }

    fn transact(&self, printer_name: &str, data: &[u8]) -> PrintResult<()> {
        let session = self.backend.open_printer(printer_name)?;
        let mut job = JobScope::new(session, printer_name);

        job.start_document(&self.doc_name)?;
        job.start_page()?;

        let written = job.write(data)?;
        if written != data.len() {
            warn!(expected = data.len(), written, "Spooler acknowledged a short write");
            return Err(PrintError::ShortWrite {
                expected: data.len(),
                written,
            });
        }

        job.finish()
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
