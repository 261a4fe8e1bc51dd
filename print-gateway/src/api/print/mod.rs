//! Print API module
//!
//! | Path | Method | Description |
//! |------|------|------|
//! | /api/print/test | GET | service liveness with server time |
//! | /api/print/printers | GET | installed printers |
//! | /api/print/receipt | POST | framed ESC/POS job |
//! | /api/print/raw-bytes | POST | hex bytes sent as-is |
//! | /api/print/test-print | POST | canned test receipt |

mod handler;
mod types;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub use types::{PrintOutcome, PrintRequest, RawBytesRequest, TestPrintRequest};

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/print", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/test", get(handler::test))
        .route("/printers", get(handler::printers))
        .route("/receipt", post(handler::receipt))
        .route("/raw-bytes", post(handler::raw_bytes))
        .route("/test-print", post(handler::test_print))
}
