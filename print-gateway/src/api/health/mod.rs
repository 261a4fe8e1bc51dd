//! Health check route
//!
//! | Path | Method | Description |
//! |------|------|------|
//! | /health | GET | liveness probe |
//!
//! ```json
//! {
//!   "status": "healthy",
//!   "timestamp": "2025-01-01T12:00:00Z",
//!   "version": "0.1.0"
//! }
//! ```

use axum::{Json, Router, routing::get};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health))
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    timestamp: DateTime<Utc>,
    version: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION"),
    })
}
