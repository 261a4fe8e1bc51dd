//! CUPS spooler backend
//!
//! Speaks IPP to the CUPS scheduler (`CUPS_SERVER`, default
//! `localhost:631`). Bytes written between start and end of a document are
//! collected and sent as a single Print-Job with the raw document format when
//! the document ends; the job counts as printed once CUPS accepts it.
//!
//! - Open: Get-Printer-Attributes on the queue
//! - Directory: CUPS-Get-Printers and CUPS-Get-Default

use std::io::Cursor;

use ipp::prelude::*;
use tracing::{debug, info, instrument};

use crate::error::{PrintError, PrintResult, SpoolStep};
use crate::spooler::{SpoolBackend, SpoolSession};

const DEFAULT_SERVER: &str = "localhost:631";

/// Document format that makes CUPS pass bytes through unfiltered
const RAW_FORMAT: &str = "application/vnd.cups-raw";

/// CUPS print spooler
#[derive(Debug, Clone)]
pub struct CupsSpool {
    /// Scheduler base URI, `ipp://host:port`
    server: String,
}

impl CupsSpool {
    /// Scheduler from `CUPS_SERVER`, falling back to `localhost:631`
    pub fn new() -> Self {
        Self::with_server(server_base(std::env::var("CUPS_SERVER").ok().as_deref()))
    }

    fn with_server(server: impl Into<String>) -> Self {
        Self {
            server: server.into(),
        }
    }

    fn printer_uri(&self, name: &str) -> PrintResult<Uri> {
        check_queue_name(name)?;
        format!("{}/printers/{}", self.server, name)
            .parse()
            .map_err(|e| PrintError::Validation(format!("invalid printer name '{}': {}", name, e)))
    }

    fn server_uri(&self) -> PrintResult<Uri> {
        self.server.parse().map_err(|e| {
            PrintError::Enumeration(format!("invalid CUPS server '{}': {}", self.server, e))
        })
    }

    /// Send a scheduler-level request (no printer in the URI)
    fn scheduler_request(
        &self,
        request: impl Into<IppRequestResponse>,
        what: &str,
    ) -> PrintResult<IppRequestResponse> {
        let client = IppClient::new(self.server_uri()?);
        client
            .send(request)
            .map_err(|e| PrintError::Enumeration(format!("{} failed: {}", what, e)))
    }
}

impl Default for CupsSpool {
    fn default() -> Self {
        Self::new()
    }
}

impl SpoolBackend for CupsSpool {
    #[instrument(skip(self))]
    fn open_printer(&self, name: &str) -> PrintResult<Box<dyn SpoolSession + '_>> {
        let uri = self.printer_uri(name)?;

        let operation = IppOperationBuilder::get_printer_attributes(uri.clone()).build();
        let response = IppClient::new(uri.clone()).send(operation).map_err(|e| {
            debug!(error = %e, "Get-Printer-Attributes failed");
            PrintError::spool(name, SpoolStep::Open, None)
        })?;

        let status = response.header().status_code();
        if !status.is_success() {
            debug!(status = ?status, "CUPS refused the queue");
            return Err(PrintError::spool(name, SpoolStep::Open, None));
        }

        Ok(Box::new(CupsSession {
            printer: name.to_string(),
            uri,
            title: None,
            buffer: Vec::new(),
        }))
    }

    fn enum_printers(&self) -> PrintResult<Vec<String>> {
        let response = self.scheduler_request(
            IppOperationBuilder::cups().get_printers(),
            "CUPS-Get-Printers",
        )?;

        let status = response.header().status_code();
        // An empty scheduler answers not-found
        if matches!(status, StatusCode::ClientErrorNotFound) {
            return Ok(Vec::new());
        }
        if !status.is_success() {
            return Err(PrintError::Enumeration(format!(
                "CUPS-Get-Printers returned status {:?}",
                status
            )));
        }

        Ok(printer_names(response.attributes()))
    }

    fn default_printer(&self) -> PrintResult<Option<String>> {
        let request = IppRequestResponse::new(IppVersion::v1_1(), Operation::CupsGetDefault, None);
        let response = self.scheduler_request(request, "CUPS-Get-Default")?;

        let status = response.header().status_code();
        if matches!(status, StatusCode::ClientErrorNotFound) {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(PrintError::Enumeration(format!(
                "CUPS-Get-Default returned status {:?}",
                status
            )));
        }

        Ok(printer_names(response.attributes()).into_iter().next())
    }
}

/// Scheduler base URI from a `CUPS_SERVER` value
///
/// Domain socket paths are not reachable over IPP and use the default.
fn server_base(cups_server: Option<&str>) -> String {
    let server = cups_server
        .map(str::trim)
        .filter(|s| !s.is_empty() && !s.starts_with('/'))
        .unwrap_or(DEFAULT_SERVER);

    if server.contains(':') {
        format!("ipp://{}", server)
    } else {
        format!("ipp://{}:631", server)
    }
}

/// Reject names that are not CUPS queue names
///
/// Besides the characters CUPS forbids, anything that would change the
/// request path or read as an option is refused before a request is made.
fn check_queue_name(name: &str) -> PrintResult<()> {
    let invalid = name.starts_with('-')
        || name
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || matches!(c, '/' | '#' | '?' | '%' | '\\'));

    if invalid {
        return Err(PrintError::Validation(format!(
            "'{}' is not a valid CUPS queue name",
            name
        )));
    }
    Ok(())
}

/// `printer-name` of every printer group, in response order
fn printer_names(attrs: &IppAttributes) -> Vec<String> {
    attrs
        .groups_of(DelimiterTag::PrinterAttributes)
        .filter_map(|group| group.attributes().get("printer-name"))
        .map(|attr| attr.value().to_string())
        .collect()
}

fn job_id(attrs: &IppAttributes) -> Option<i32> {
    attrs
        .groups_of(DelimiterTag::JobAttributes)
        .find_map(|group| match group.attributes().get("job-id")?.value() {
            IppValue::Integer(id) => Some(*id),
            _ => None,
        })
}

/// One Print-Job in the making
struct CupsSession {
    printer: String,
    uri: Uri,
    /// Set between start and end of a document
    title: Option<String>,
    buffer: Vec<u8>,
}

impl CupsSession {
    fn fail(&self, step: SpoolStep) -> PrintError {
        PrintError::spool(&self.printer, step, None)
    }
}

impl SpoolSession for CupsSession {
    fn start_document(&mut self, doc_name: &str) -> PrintResult<()> {
        self.title = Some(doc_name.to_string());
        self.buffer.clear();
        Ok(())
    }

    fn start_page(&mut self) -> PrintResult<()> {
        Ok(())
    }

    fn write(&mut self, data: &[u8]) -> PrintResult<usize> {
        if self.title.is_none() {
            return Err(self.fail(SpoolStep::Write));
        }
        self.buffer.extend_from_slice(data);
        Ok(data.len())
    }

    fn end_page(&mut self) -> PrintResult<()> {
        Ok(())
    }

    fn end_document(&mut self) -> PrintResult<()> {
        let Some(title) = self.title.take() else {
            return Ok(());
        };
        let data = std::mem::take(&mut self.buffer);
        if data.is_empty() {
            debug!(printer = %self.printer, "Nothing written, no job submitted");
            return Ok(());
        }

        let len = data.len();
        let operation = IppOperationBuilder::print_job(self.uri.clone(), IppPayload::new(Cursor::new(data)))
            .job_title(&title)
            .document_format(RAW_FORMAT)
            .build();

        let response = IppClient::new(self.uri.clone()).send(operation).map_err(|e| {
            debug!(error = %e, "Print-Job failed");
            self.fail(SpoolStep::EndDocument)
        })?;

        let status = response.header().status_code();
        if !status.is_success() {
            debug!(status = ?status, "CUPS rejected the job");
            return Err(self.fail(SpoolStep::EndDocument));
        }

        info!(
            printer = %self.printer,
            job_id = ?job_id(response.attributes()),
            bytes = len,
            "CUPS accepted job"
        );
        Ok(())
    }

    fn close(&mut self) -> PrintResult<()> {
        // An unfinished document is dropped, never submitted
        self.title = None;
        self.buffer.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_base() {
        assert_eq!(server_base(None), "ipp://localhost:631");
        assert_eq!(server_base(Some("  ")), "ipp://localhost:631");
        assert_eq!(server_base(Some("/run/cups/cups.sock")), "ipp://localhost:631");
        assert_eq!(server_base(Some("printhost")), "ipp://printhost:631");
        assert_eq!(server_base(Some("printhost:8631")), "ipp://printhost:8631");
    }

    #[test]
    fn test_queue_name_checks() {
        assert!(check_queue_name("POS-80").is_ok());
        assert!(check_queue_name("Kitchen_2.usb").is_ok());

        for name in ["-h", "-h otherhost", "a/b", "pos 80", "q#1", "x?y", "%41", "tab\tname"] {
            assert!(
                matches!(check_queue_name(name), Err(PrintError::Validation(_))),
                "{name:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_option_like_name_rejected_before_any_request() {
        // Port 1 has no scheduler; a request would fail as Open, not Validation
        let spool = CupsSpool::with_server("ipp://127.0.0.1:1");
        let err = match spool.open_printer("-h otherhost") {
            Err(e) => e,
            Ok(_) => panic!("open should fail"),
        };
        assert!(matches!(err, PrintError::Validation(_)));
    }

    #[test]
    fn test_printer_uri() {
        let spool = CupsSpool::with_server("ipp://localhost:631");
        let uri = spool.printer_uri("POS-80").unwrap();
        assert_eq!(uri.to_string(), "ipp://localhost:631/printers/POS-80");
    }

    #[test]
    fn test_unreachable_scheduler() {
        let spool = CupsSpool::with_server("ipp://127.0.0.1:1");
        let err = match spool.open_printer("POS-80") {
            Err(e) => e,
            Ok(_) => panic!("open should fail"),
        };
        assert!(matches!(
            err,
            PrintError::Spool {
                step: SpoolStep::Open,
                ..
            }
        ));
        assert!(matches!(
            spool.enum_printers(),
            Err(PrintError::Enumeration(_))
        ));
        assert!(matches!(
            spool.default_printer(),
            Err(PrintError::Enumeration(_))
        ));
    }

    #[test]
    fn test_session_submits_only_finished_documents() {
        let mut session = CupsSession {
            printer: "POS-80".to_string(),
            uri: "ipp://127.0.0.1:1/printers/POS-80".parse().unwrap(),
            title: None,
            buffer: Vec::new(),
        };

        // Write outside a document is refused
        assert!(session.write(b"x").is_err());

        session.start_document("Raw Print Job").unwrap();
        assert_eq!(session.write(&[0x1B, 0x40]).unwrap(), 2);
        // Closing without ending the document discards it, no request made
        session.close().unwrap();
        assert!(session.buffer.is_empty());
        assert!(session.end_document().is_ok());
    }
}
