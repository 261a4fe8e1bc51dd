use spool_printer::DEFAULT_DOC_NAME;

/// Gateway configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|--------|------|
/// | HTTP_HOST | 0.0.0.0 | bind address |
/// | HTTP_PORT | 5000 | HTTP port |
/// | CORS_ORIGINS | http://localhost:4200,http://localhost:8080 | allowed origins, comma-separated |
/// | ENVIRONMENT | development | runtime environment |
/// | LOG_LEVEL | info | level used when RUST_LOG is unset |
/// | LOG_DIR | (none) | daily rolling log directory |
/// | SERIALIZE_PER_PRINTER | true | one job at a time per printer |
/// | PRINT_DOC_NAME | Raw Print Job | document name in the OS queue |
/// | MAX_BODY_BYTES | 1048576 | request body limit |
///
/// # Example
///
/// ```ignore
/// HTTP_PORT=9000 CORS_ORIGINS=https://pos.example.com cargo run -p print-gateway
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub http_host: String,
    pub http_port: u16,
    /// Origins allowed to call the API with credentials
    pub cors_origins: Vec<String>,
    /// development | production
    pub environment: String,
    pub log_level: String,
    pub log_dir: Option<String>,
    /// Hold a per-printer lock for the duration of each spooler transaction
    pub serialize_per_printer: bool,
    pub doc_name: String,
    pub max_body_bytes: usize,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset or unparsable values fall back to defaults.
    pub fn from_env() -> Self {
        Self {
            http_host: std::env::var("HTTP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            cors_origins: std::env::var("CORS_ORIGINS")
                .map(|v| parse_origins(&v))
                .unwrap_or_else(|_| default_origins()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|s| !s.is_empty()),
            serialize_per_printer: std::env::var("SERIALIZE_PER_PRINTER")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            doc_name: std::env::var("PRINT_DOC_NAME")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_DOC_NAME.into()),
            max_body_bytes: std::env::var("MAX_BODY_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1024 * 1024),
        }
    }

    /// Socket address string for the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_host: "0.0.0.0".into(),
            http_port: 5000,
            cors_origins: default_origins(),
            environment: "development".into(),
            log_level: "info".into(),
            log_dir: None,
            serialize_per_printer: true,
            doc_name: DEFAULT_DOC_NAME.into(),
            max_body_bytes: 1024 * 1024,
        }
    }
}

fn default_origins() -> Vec<String> {
    vec![
        "http://localhost:4200".to_string(),
        "http://localhost:8080".to_string(),
    ]
}

/// Split a comma-separated origin list, dropping blanks
fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.trim_end_matches('/').to_string())
        .collect()
}
