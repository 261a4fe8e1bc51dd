//! In-memory spooler backend for tests
//!
//! Records every spooler call so tests can assert ordering and cleanup.
//! Clones share the call log but keep their own failure settings.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{PrintError, PrintResult, SpoolStep};
use crate::spooler::{SpoolBackend, SpoolSession};

/// A recorded spooler call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpoolCall {
    Open(String),
    StartDocument(String),
    StartPage,
    Write(Vec<u8>),
    EndPage,
    EndDocument,
    Close,
}

#[derive(Debug, Default)]
struct MockState {
    calls: Vec<SpoolCall>,
    jobs: Vec<Vec<u8>>,
}

#[derive(Debug, Clone, Default)]
struct Behavior {
    fail_at: Option<SpoolStep>,
    short_by: usize,
    panic_on_write: bool,
    enum_error: Option<String>,
}

/// Mock spooler backend
#[derive(Debug, Clone, Default)]
pub struct MockSpooler {
    printers: Vec<String>,
    default: Option<String>,
    behavior: Behavior,
    state: Arc<Mutex<MockState>>,
}

impl MockSpooler {
    /// Backend that knows the given printers, with no default
    pub fn with_printers(names: &[&str]) -> Self {
        Self {
            printers: names.iter().map(|n| n.to_string()).collect(),
            ..Self::default()
        }
    }

    /// Mark a printer as the OS default
    pub fn with_default(mut self, name: &str) -> Self {
        self.default = Some(name.to_string());
        self
    }

    /// Fail when the given step is reached
    pub fn fail_at(mut self, step: SpoolStep) -> Self {
        self.behavior.fail_at = Some(step);
        self
    }

    /// Acknowledge `missing` fewer bytes than written
    pub fn short_write(mut self, missing: usize) -> Self {
        self.behavior.short_by = missing;
        self
    }

    /// Panic inside the write call
    pub fn panic_on_write(mut self) -> Self {
        self.behavior.panic_on_write = true;
        self
    }

    /// Fail printer enumeration
    pub fn fail_enumeration(mut self, message: &str) -> Self {
        self.behavior.enum_error = Some(message.to_string());
        self
    }

    /// All calls recorded so far
    pub fn calls(&self) -> Vec<SpoolCall> {
        self.state.lock().calls.clone()
    }

    /// Payloads of the jobs that completed a full write
    pub fn jobs(&self) -> Vec<Vec<u8>> {
        self.state.lock().jobs.clone()
    }

    pub fn open_count(&self) -> usize {
        self.count(|c| matches!(c, SpoolCall::Open(_)))
    }

    pub fn close_count(&self) -> usize {
        self.count(|c| matches!(c, SpoolCall::Close))
    }

    fn count(&self, pred: impl Fn(&SpoolCall) -> bool) -> usize {
        self.state.lock().calls.iter().filter(|c| pred(c)).count()
    }
}

impl SpoolBackend for MockSpooler {
    fn open_printer(&self, name: &str) -> PrintResult<Box<dyn SpoolSession + '_>> {
        self.state.lock().calls.push(SpoolCall::Open(name.to_string()));

        let known = self.printers.iter().any(|p| p == name);
        if !known || self.behavior.fail_at == Some(SpoolStep::Open) {
            return Err(PrintError::spool(name, SpoolStep::Open, Some(1801)));
        }

        Ok(Box::new(MockSession {
            printer: name.to_string(),
            behavior: self.behavior.clone(),
            state: Arc::clone(&self.state),
        }))
    }

    fn enum_printers(&self) -> PrintResult<Vec<String>> {
        match &self.behavior.enum_error {
            Some(msg) => Err(PrintError::Enumeration(msg.clone())),
            None => Ok(self.printers.clone()),
        }
    }

    fn default_printer(&self) -> PrintResult<Option<String>> {
        Ok(self.default.clone())
    }
}

struct MockSession {
    printer: String,
    behavior: Behavior,
    state: Arc<Mutex<MockState>>,
}

impl MockSession {
    fn step(&self, step: SpoolStep, call: SpoolCall) -> PrintResult<()> {
        self.state.lock().calls.push(call);
        if self.behavior.fail_at == Some(step) {
            return Err(PrintError::spool(&self.printer, step, Some(5)));
        }
        Ok(())
    }
}

impl SpoolSession for MockSession {
    fn start_document(&mut self, doc_name: &str) -> PrintResult<()> {
        self.step(
            SpoolStep::StartDocument,
            SpoolCall::StartDocument(doc_name.to_string()),
        )
    }

    fn start_page(&mut self) -> PrintResult<()> {
        self.step(SpoolStep::StartPage, SpoolCall::StartPage)
    }

    fn write(&mut self, data: &[u8]) -> PrintResult<usize> {
        self.step(SpoolStep::Write, SpoolCall::Write(data.to_vec()))?;
        if self.behavior.panic_on_write {
            panic!("driver fault while writing to {}", self.printer);
        }

        let written = data.len().saturating_sub(self.behavior.short_by);
        if written == data.len() {
            self.state.lock().jobs.push(data.to_vec());
        }
        Ok(written)
    }

    fn end_page(&mut self) -> PrintResult<()> {
        self.step(SpoolStep::EndPage, SpoolCall::EndPage)
    }

    fn end_document(&mut self) -> PrintResult<()> {
        self.step(SpoolStep::EndDocument, SpoolCall::EndDocument)
    }

    fn close(&mut self) -> PrintResult<()> {
        self.step(SpoolStep::Close, SpoolCall::Close)
    }
}
