//! Print request and response bodies

use serde::{Deserialize, Serialize};
use spool_printer::{ContentType, CutType, DEFAULT_FEED_LINES, PrintJob};

use crate::utils::AppResult;
use crate::utils::validation::{MAX_PRINTER_NAME_LEN, validate_feed_lines, validate_required_text};

/// Body of `POST /api/print/receipt`
///
/// Every field is optional on the wire; missing values take their defaults
/// (`cutPaper` false, `cutType` full, `feedLines` 3, `encodingName` IBM437).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintRequest {
    pub printer_name: Option<String>,
    pub content_type: Option<String>,
    pub payload: Option<String>,
    pub cut_paper: Option<bool>,
    pub cut_type: Option<String>,
    pub feed_lines: Option<i64>,
    pub encoding_name: Option<String>,
}

impl PrintRequest {
    /// Validate the request and turn it into a job
    pub fn into_job(self) -> AppResult<PrintJob> {
        let printer_name = validate_required_text(
            self.printer_name.as_deref(),
            "printerName",
            MAX_PRINTER_NAME_LEN,
        )?;
        let feed_lines = validate_feed_lines(self.feed_lines, DEFAULT_FEED_LINES)?;
        let content_type = ContentType::parse(self.content_type.as_deref().unwrap_or_default());

        let mut job = PrintJob::new(printer_name, content_type, self.payload.unwrap_or_default())?
            .with_feed_lines(feed_lines)
            .with_encoding(self.encoding_name.unwrap_or_default());

        if self.cut_paper.unwrap_or(false) {
            job = job.with_cut(CutType::parse(self.cut_type.as_deref().unwrap_or("full")));
        }
        Ok(job)
    }
}

/// Body of `POST /api/print/raw-bytes`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBytesRequest {
    pub printer_name: Option<String>,
    /// Hex string, separators allowed
    pub payload: Option<String>,
}

/// Body of `POST /api/print/test-print`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestPrintRequest {
    pub printer_name: Option<String>,
}

/// `data` of a successful print response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintOutcome {
    pub bytes_sent: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::AppError;

    fn request(json: serde_json::Value) -> PrintRequest {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_defaults() {
        let job = request(serde_json::json!({"printerName": "POS-80", "payload": "Hi"}))
            .into_job()
            .unwrap();

        assert_eq!(job.printer_name(), "POS-80");
        assert_eq!(job.content_type(), ContentType::Encoded);
        assert!(!job.cut_paper());
        assert_eq!(job.feed_lines(), 3);
        assert_eq!(job.text_encoding(), "IBM437");
    }

    #[test]
    fn test_full_request() {
        let job = request(serde_json::json!({
            "printerName": "POS-80",
            "contentType": " esc_pos_text ",
            "payload": "Hi",
            "cutPaper": true,
            "cutType": "PARTIAL",
            "feedLines": 0,
            "encodingName": "windows-1252"
        }))
        .into_job()
        .unwrap();

        assert_eq!(job.content_type(), ContentType::EscPosText);
        assert_eq!(job.cut_type(), CutType::Partial);
        assert_eq!(job.feed_lines(), 0);
        assert_eq!(job.text_encoding(), "windows-1252");
    }

    #[test]
    fn test_cut_type_ignored_without_cut_paper() {
        let job = request(serde_json::json!({"printerName": "POS-80", "cutType": "partial"}))
            .into_job()
            .unwrap();
        assert!(!job.cut_paper());
    }

    #[test]
    fn test_rejections() {
        let blank = request(serde_json::json!({"printerName": "  "})).into_job();
        assert!(matches!(blank, Err(AppError::Validation(_))));

        let missing = PrintRequest::default().into_job();
        assert!(matches!(missing, Err(AppError::Validation(_))));

        let negative = request(serde_json::json!({"printerName": "POS-80", "feedLines": -2})).into_job();
        assert!(matches!(negative, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_outcome_is_camel_case() {
        let json = serde_json::to_value(PrintOutcome { bytes_sent: 9 }).unwrap();
        assert_eq!(json, serde_json::json!({"bytesSent": 9}));
    }
}
