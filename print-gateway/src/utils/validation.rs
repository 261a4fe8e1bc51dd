//! Input validation helpers

use crate::utils::AppError;

/// Printer names (winspool caps them at 220 UTF-16 units)
pub const MAX_PRINTER_NAME_LEN: usize = 256;

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(
    value: Option<&str>,
    field: &str,
    max_len: usize,
) -> Result<String, AppError> {
    let value = value.unwrap_or_default();
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} is required")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(value.to_string())
}

/// Validate an optional line count; missing values take the default.
pub fn validate_feed_lines(value: Option<i64>, default: u8) -> Result<u8, AppError> {
    match value {
        None => Ok(default),
        Some(n) => u8::try_from(n).map_err(|_| {
            AppError::validation(format!("feedLines must be between 0 and {}, got {n}", u8::MAX))
        }),
    }
}
