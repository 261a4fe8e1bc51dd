//! HTTP API tests against the mock spooler

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use print_gateway::{Config, ServerState, build_app};
use serde_json::{Value, json};
use spool_printer::SpoolStep;
use spool_printer::mock::{MockSpooler, SpoolCall};
use tower::ServiceExt;

fn app(mock: &MockSpooler) -> Router {
    let state = ServerState::new(Config::default(), Arc::new(mock.clone()));
    build_app(state)
}

fn pos80() -> MockSpooler {
    MockSpooler::with_printers(&["POS-80", "Kitchen"]).with_default("POS-80")
}

async fn post(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(
        app,
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_receipt_hex_without_cut() {
    let mock = pos80();
    let (status, body) = post(
        app(&mock),
        "/api/print/receipt",
        json!({"printerName": "POS-80", "contentType": "ESC_POS_HEX", "payload": "1B 40"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["bytesSent"], 2);
    assert_eq!(mock.jobs(), vec![vec![0x1B, 0x40]]);
    assert_eq!(
        mock.calls(),
        vec![
            SpoolCall::Open("POS-80".into()),
            SpoolCall::StartDocument("Raw Print Job".into()),
            SpoolCall::StartPage,
            SpoolCall::Write(vec![0x1B, 0x40]),
            SpoolCall::EndPage,
            SpoolCall::EndDocument,
            SpoolCall::Close,
        ]
    );
}

#[tokio::test]
async fn test_receipt_text_with_cut() {
    let mock = pos80();
    let (status, _) = post(
        app(&mock),
        "/api/print/receipt",
        json!({
            "printerName": "POS-80",
            "contentType": "ESC_POS_TEXT",
            "payload": "Hi",
            "cutPaper": true,
            "feedLines": 1
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        mock.jobs(),
        vec![vec![b'\n', b'H', b'i', b'\n', 0x1B, 0x64, 0x02, 0x1D, 0x56, 0x00]]
    );
}

#[tokio::test]
async fn test_receipt_blank_printer_makes_no_spooler_calls() {
    let mock = pos80();
    let (status, body) = post(
        app(&mock),
        "/api/print/receipt",
        json!({"printerName": "   ", "payload": "Hi"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "printerName is required");
    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn test_receipt_odd_hex_is_rejected() {
    let mock = pos80();
    let (status, body) = post(
        app(&mock),
        "/api/print/receipt",
        json!({"printerName": "POS-80", "contentType": "ESC_POS_HEX", "payload": "1B4"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn test_receipt_feed_lines_out_of_range() {
    let mock = pos80();
    let (status, _) = post(
        app(&mock),
        "/api/print/receipt",
        json!({"printerName": "POS-80", "payload": "Hi", "cutPaper": true, "feedLines": 300}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn test_receipt_unknown_printer() {
    let mock = pos80();
    let (status, body) = post(
        app(&mock),
        "/api/print/receipt",
        json!({"printerName": "Nowhere", "payload": "Hi"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Print failed. Check the printer and its permissions."
    );
    assert_eq!(mock.open_count(), 1);
    assert_eq!(mock.close_count(), 0);
}

#[tokio::test]
async fn test_receipt_failed_write_still_closes() {
    let mock = pos80().fail_at(SpoolStep::Write);
    let (status, _) = post(
        app(&mock),
        "/api/print/receipt",
        json!({"printerName": "POS-80", "payload": "Hi"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(mock.open_count(), mock.close_count());
    assert!(mock.calls().contains(&SpoolCall::EndDocument));
}

#[tokio::test]
async fn test_receipt_rejected_at_end_of_document() {
    let mock = pos80().fail_at(SpoolStep::EndDocument);
    let (status, body) = post(
        app(&mock),
        "/api/print/receipt",
        json!({"printerName": "POS-80", "payload": "Hi"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(mock.close_count(), 1);
}

#[tokio::test]
async fn test_receipt_panic_is_internal_error() {
    let mock = pos80().panic_on_write();
    let (status, body) = post(
        app(&mock),
        "/api/print/receipt",
        json!({"printerName": "POS-80", "payload": "Hi"}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Internal server error");
    assert_eq!(mock.close_count(), 1);
}

#[tokio::test]
async fn test_malformed_json() {
    let mock = pos80();
    let request = Request::post("/api/print/receipt")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"printerName\": "))
        .unwrap();
    let (status, body) = send(app(&mock), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn test_raw_bytes_sent_unframed() {
    let mock = pos80();
    let (status, body) = post(
        app(&mock),
        "/api/print/raw-bytes",
        json!({"printerName": "Kitchen", "payload": "1b-40-0a"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["bytesSent"], 3);
    assert_eq!(mock.jobs(), vec![vec![0x1B, 0x40, 0x0A]]);
}

#[tokio::test]
async fn test_raw_bytes_requires_printer() {
    let mock = pos80();
    let (status, _) = post(app(&mock), "/api/print/raw-bytes", json!({"payload": "1B40"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn test_test_print() {
    let mock = pos80();
    let (status, body) = post(
        app(&mock),
        "/api/print/test-print",
        json!({"printerName": "POS-80"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let jobs = mock.jobs();
    assert_eq!(jobs.len(), 1);
    assert!(jobs[0].starts_with(b"\n\n\n=== TEST STORE ==="));
    assert!(jobs[0].ends_with(&[0x1B, 0x64, 0x02, 0x1D, 0x56, 0x00]));
}

#[tokio::test]
async fn test_test_print_blank_printer_makes_no_spooler_calls() {
    let mock = pos80();

    for body in [json!({"printerName": "  "}), json!({})] {
        let (status, response) = post(app(&mock), "/api/print/test-print", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["success"], false);
        assert_eq!(response["message"], "printerName is required");
    }
    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn test_list_printers() {
    let mock = pos80();
    let (status, body) = get(app(&mock), "/api/print/printers").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"],
        json!([
            {"name": "POS-80", "isDefault": true},
            {"name": "Kitchen", "isDefault": false}
        ])
    );
}

#[tokio::test]
async fn test_list_printers_failure() {
    let mock = pos80().fail_enumeration("spooler service stopped");
    let (status, body) = get(app(&mock), "/api/print/printers").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Error listing printers: spooler service stopped"
    );
}

#[tokio::test]
async fn test_liveness_endpoints() {
    let mock = pos80();

    let (status, body) = get(app(&mock), "/api/print/test").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(body["data"]["timestamp"].is_string());

    let (status, body) = get(app(&mock), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}
