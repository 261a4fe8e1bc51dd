//! Print API Handlers

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use spool_printer::{PrinterDescriptor, decode_hex};

use super::types::{PrintOutcome, PrintRequest, RawBytesRequest, TestPrintRequest};
use crate::core::ServerState;
use crate::printing::sample::test_receipt_job;
use crate::utils::validation::{MAX_PRINTER_NAME_LEN, validate_required_text};
use crate::utils::{ApiResponse, AppResult, ok_with_message};

#[derive(Serialize)]
pub struct Liveness {
    timestamp: DateTime<Utc>,
}

/// GET /api/print/test - service liveness
pub async fn test() -> Json<ApiResponse<Liveness>> {
    ok_with_message(
        Liveness {
            timestamp: Utc::now(),
        },
        "Print API is running",
    )
}

/// GET /api/print/printers - installed printers
pub async fn printers(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<PrinterDescriptor>>>> {
    let printers = state.print.printers().await?;
    Ok(ok_with_message(printers, "Printers retrieved"))
}

/// POST /api/print/receipt - framed print job
pub async fn receipt(
    State(state): State<ServerState>,
    payload: Result<Json<PrintRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse<PrintOutcome>>> {
    let Json(request) = payload?;
    let job = request.into_job()?;

    let bytes_sent = state.print.print(job).await?;
    Ok(ok_with_message(PrintOutcome { bytes_sent }, "Print completed"))
}

/// POST /api/print/raw-bytes - hex bytes, no framing
pub async fn raw_bytes(
    State(state): State<ServerState>,
    payload: Result<Json<RawBytesRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse<PrintOutcome>>> {
    let Json(request) = payload?;
    let printer_name = validate_required_text(
        request.printer_name.as_deref(),
        "printerName",
        MAX_PRINTER_NAME_LEN,
    )?;
    let bytes = decode_hex(request.payload.as_deref().unwrap_or_default())?;

    let bytes_sent = state.print.submit(printer_name, bytes).await?;
    Ok(ok_with_message(PrintOutcome { bytes_sent }, "Bytes sent"))
}

/// POST /api/print/test-print - canned receipt through the receipt pipeline
pub async fn test_print(
    State(state): State<ServerState>,
    payload: Result<Json<TestPrintRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse<PrintOutcome>>> {
    let Json(request) = payload?;
    let printer_name = validate_required_text(
        request.printer_name.as_deref(),
        "printerName",
        MAX_PRINTER_NAME_LEN,
    )?;
    let job = test_receipt_job(&printer_name)?;

    let bytes_sent = state.print.print(job).await?;
    Ok(ok_with_message(PrintOutcome { bytes_sent }, "Test print completed"))
}
