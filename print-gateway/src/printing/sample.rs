//! Canned receipt for the test-print endpoint

use spool_printer::{ContentType, CutType, PrintJob, PrintResult};

pub const TEST_RECEIPT: &str = "\
=== TEST STORE ===

Item            Qty     Total
----------------------------
Coffee          2       $40
Croissant       1       $25
Orange juice    1       $35
----------------------------
TOTAL: $100

¡Thank you for your purchase!";

/// Text job with a full cut, 3 feed lines, code page 437
pub fn test_receipt_job(printer_name: &str) -> PrintResult<PrintJob> {
    Ok(PrintJob::new(printer_name, ContentType::EscPosText, TEST_RECEIPT)?
        .with_cut(CutType::Full)
        .with_feed_lines(3)
        .with_encoding("IBM437"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use spool_printer::build_payload;

    #[test]
    fn test_receipt_frame() {
        let job = test_receipt_job("POS-80").unwrap();
        let bytes = build_payload(&job).unwrap();

        assert!(bytes.starts_with(b"\n\n\n=== TEST STORE ==="));
        assert!(bytes.ends_with(&[b'\n', b'\n', b'\n', 0x1B, 0x64, 0x02, 0x1D, 0x56, 0x00]));
        // '¡' in code page 437
        assert!(bytes.contains(&0xAD));
    }

    #[test]
    fn test_receipt_requires_printer() {
        assert!(test_receipt_job("").is_err());
    }
}
