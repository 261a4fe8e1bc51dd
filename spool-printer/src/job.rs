//! Print job description

use crate::encoding::{DEFAULT_ENCODING, TextCodec};
use crate::error::{PrintError, PrintResult};

/// Line feeds added around framed payloads when the request gives none
pub const DEFAULT_FEED_LINES: u8 = 3;

/// How the payload string is turned into bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    /// Hex-encoded ESC/POS byte stream
    EscPosHex,
    /// Literal text, padded on both sides when cut framing is applied
    EscPosText,
    /// Text encoded as raw bytes, padded after only
    Encoded,
}

impl ContentType {
    /// Parse a wire value; anything unrecognized is `Encoded`
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "ESC_POS_HEX" | "RAW_HEX" => Self::EscPosHex,
            "ESC_POS_TEXT" | "RAW_TEXT" => Self::EscPosText,
            _ => Self::Encoded,
        }
    }
}

/// Paper cut performed after the payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CutType {
    #[default]
    Full,
    Partial,
}

impl CutType {
    /// Parse a wire value; anything other than `partial` is a full cut
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("partial") {
            Self::Partial
        } else {
            Self::Full
        }
    }
}

/// A validated print job
///
/// Built with [`PrintJob::new`] and refined with the `with_*` methods.
#[derive(Debug, Clone)]
pub struct PrintJob {
    printer_name: String,
    content_type: ContentType,
    payload: String,
    cut: Option<CutType>,
    feed_lines: u8,
    text_encoding: String,
}

impl PrintJob {
    /// Create a job for a printer; the name must not be blank
    pub fn new(
        printer_name: impl Into<String>,
        content_type: ContentType,
        payload: impl Into<String>,
    ) -> PrintResult<Self> {
        let printer_name = printer_name.into();
        validate_printer_name(&printer_name)?;

        Ok(Self {
            printer_name,
            content_type,
            payload: payload.into(),
            cut: None,
            feed_lines: DEFAULT_FEED_LINES,
            text_encoding: DEFAULT_ENCODING.to_string(),
        })
    }

    /// Cut the paper after the payload
    pub fn with_cut(mut self, cut_type: CutType) -> Self {
        self.cut = Some(cut_type);
        self
    }

    /// Line feeds used by cut framing
    pub fn with_feed_lines(mut self, lines: u8) -> Self {
        self.feed_lines = lines;
        self
    }

    /// Encoding name for text payloads; blank keeps the default
    pub fn with_encoding(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !name.trim().is_empty() {
            self.text_encoding = name;
        }
        self
    }

    pub fn printer_name(&self) -> &str {
        &self.printer_name
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn cut_paper(&self) -> bool {
        self.cut.is_some()
    }

    /// Cut type, `Full` unless a partial cut was requested
    pub fn cut_type(&self) -> CutType {
        self.cut.unwrap_or_default()
    }

    pub fn feed_lines(&self) -> u8 {
        self.feed_lines
    }

    pub fn text_encoding(&self) -> &str {
        &self.text_encoding
    }

    /// Codec for the requested text encoding
    pub fn codec(&self) -> TextCodec {
        TextCodec::resolve(&self.text_encoding)
    }
}

/// Reject blank printer names before any spooler call is made
pub fn validate_printer_name(name: &str) -> PrintResult<()> {
    if name.trim().is_empty() {
        return Err(PrintError::Validation("printer name is required".to_string()));
    }
    Ok(())
}
