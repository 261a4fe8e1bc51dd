//! Print service
//!
//! Bridges async handlers and the blocking spooler client.

use spool_printer::{PrintJob, PrinterDescriptor, RawSpooler, build_payload, list_printers};
use tracing::{debug, instrument};

use super::locks::PrinterLocks;
use crate::utils::{AppError, AppResult};

#[derive(Clone)]
pub struct PrintService {
    spooler: RawSpooler,
    locks: Option<PrinterLocks>,
}

impl PrintService {
    /// Create a service; `serialize` enables the per-printer lock
    pub fn new(spooler: RawSpooler, serialize: bool) -> Self {
        Self {
            spooler,
            locks: serialize.then(PrinterLocks::new),
        }
    }

    /// Frame a job and submit it, returning the number of bytes sent
    #[instrument(skip(self, job), fields(printer = %job.printer_name()))]
    pub async fn print(&self, job: PrintJob) -> AppResult<usize> {
        let bytes = build_payload(&job)?;
        self.submit(job.printer_name().to_string(), bytes).await
    }

    /// Submit already framed bytes
    ///
    /// Runs on the blocking pool. Once started the spooler transaction is
    /// never cancelled, even if the client goes away.
    pub async fn submit(&self, printer: String, bytes: Vec<u8>) -> AppResult<usize> {
        let spooler = self.spooler.clone();
        let locks = self.locks.clone();
        let len = bytes.len();

        tokio::task::spawn_blocking(move || match &locks {
            Some(locks) => locks.run_exclusive(&printer, || spooler.submit(&printer, &bytes)),
            None => spooler.submit(&printer, &bytes),
        })
        .await
        .map_err(|e| AppError::internal(format!("Print task failed: {}", e)))??;

        debug!(bytes = len, "Print job completed");
        Ok(len)
    }

    /// Installed printers with the OS default flagged
    pub async fn printers(&self) -> AppResult<Vec<PrinterDescriptor>> {
        let spooler = self.spooler.clone();

        let printers = tokio::task::spawn_blocking(move || list_printers(spooler.backend()))
            .await
            .map_err(|e| AppError::internal(format!("Printer listing task failed: {}", e)))??;

        Ok(printers)
    }
}
