//! Unified error handling
//!
//! - [`AppError`] - application error enum
//! - [`ApiResponse`] - response envelope shared by success and error paths
//!
//! # Status mapping
//!
//! | Variant | Status |
//! |------|------|
//! | Validation | 400 |
//! | PrintFailed | 400 |
//! | Enumeration | 400 |
//! | Internal | 500 |

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use spool_printer::PrintError;
use tracing::error;

/// API response envelope
///
/// ```json
/// {
///   "success": true,
///   "message": "Print completed",
///   "data": { ... }
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }
}

/// Application error enum
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Missing or invalid request field, undecodable payload (400)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The spooler rejected the job (400)
    #[error("Print failed: {0}")]
    PrintFailed(String),

    /// Installed printers could not be listed (400)
    #[error("Printer enumeration failed: {0}")]
    Enumeration(String),

    /// Unexpected fault (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),

            // Detail and platform code are logged by the spooler client
            AppError::PrintFailed(_) => (
                StatusCode::BAD_REQUEST,
                "Print failed. Check the printer and its permissions.".to_string(),
            ),

            AppError::Enumeration(msg) => {
                error!(target: "printing", error = %msg, "Printer enumeration failed");
                (
                    StatusCode::BAD_REQUEST,
                    format!("Error listing printers: {}", msg),
                )
            }

            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ApiResponse::failure(message))).into_response()
    }
}

impl From<PrintError> for AppError {
    fn from(e: PrintError) -> Self {
        match e {
            PrintError::Validation(_) | PrintError::InvalidPayload(_) => {
                AppError::Validation(e.to_string())
            }
            PrintError::Spool { .. } | PrintError::ShortWrite { .. } => {
                AppError::PrintFailed(e.to_string())
            }
            PrintError::Enumeration(msg) => AppError::Enumeration(msg),
            PrintError::Unexpected(_) => AppError::Internal(e.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(format!("Invalid request body: {}", rejection.body_text()))
    }
}

// ========== Helper functions ==========

/// Create a successful response with a message
pub fn ok_with_message<T: Serialize>(data: T, message: impl Into<String>) -> Json<ApiResponse<T>> {
    Json(ApiResponse::success(data, message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use spool_printer::SpoolStep;
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    #[test]
    fn test_print_error_mapping() {
        assert!(matches!(
            AppError::from(PrintError::InvalidPayload("odd".into())),
            AppError::Validation(_)
        ));
        assert!(matches!(
            AppError::from(PrintError::spool("POS-80", SpoolStep::Open, Some(1801))),
            AppError::PrintFailed(_)
        ));
        assert!(matches!(
            AppError::from(PrintError::ShortWrite { expected: 4, written: 2 }),
            AppError::PrintFailed(_)
        ));
        assert!(matches!(
            AppError::from(PrintError::Unexpected("boom".into())),
            AppError::Internal(_)
        ));
    }

    #[test]
    fn test_status_codes() {
        let cases = [
            (AppError::validation("x"), StatusCode::BAD_REQUEST),
            (AppError::PrintFailed("x".into()), StatusCode::BAD_REQUEST),
            (AppError::Enumeration("x".into()), StatusCode::BAD_REQUEST),
            (AppError::internal("x"), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    /// Counts ERROR events seen by the subscriber
    struct ErrorCounter(Arc<AtomicUsize>);

    impl<S: tracing::Subscriber> Layer<S> for ErrorCounter {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() == tracing::Level::ERROR {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    fn errors_logged(f: impl FnOnce()) -> usize {
        let count = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(ErrorCounter(Arc::clone(&count)));
        tracing::subscriber::with_default(subscriber, f);
        count.load(Ordering::SeqCst)
    }

    #[test]
    fn test_print_failure_is_not_logged_again() {
        let err = AppError::from(PrintError::spool("POS-80", SpoolStep::Write, Some(5)));
        assert_eq!(errors_logged(|| drop(err.into_response())), 0);

        let err = AppError::internal("join failed");
        assert_eq!(errors_logged(|| drop(err.into_response())), 1);
    }

    #[test]
    fn test_failure_envelope_omits_data() {
        let json = serde_json::to_value(ApiResponse::failure("nope")).unwrap();
        assert_eq!(json, serde_json::json!({"success": false, "message": "nope"}));
    }
}
