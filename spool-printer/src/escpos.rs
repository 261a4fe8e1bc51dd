//! ESC/POS payload framing
//!
//! Turns a [`PrintJob`] into the exact byte sequence handed to the spooler:
//! hex or text decoding, optional line-feed padding and the cutter trailer.

use crate::encoding::TextCodec;
use crate::error::{PrintError, PrintResult};
use crate::job::{ContentType, CutType, PrintJob};
use tracing::{debug, instrument};

const ESC: u8 = 0x1B;
const GS: u8 = 0x1D;
const LF: u8 = 0x0A;

/// Lines fed by the fixed `ESC d n` command before cutting
const TRAILER_FEED_LINES: u8 = 2;

/// ESC/POS frame builder
pub struct FrameBuilder {
    buf: Vec<u8>,
}

impl FrameBuilder {
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(256),
        }
    }

    /// Write raw bytes directly
    pub fn raw(&mut self, bytes: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    /// Write `lines` bare LF bytes
    pub fn line_feeds(&mut self, lines: u8) -> &mut Self {
        self.buf.extend(std::iter::repeat_n(LF, lines as usize));
        self
    }

    /// Write `lines` newlines through a codec
    pub fn encoded_newlines(&mut self, codec: TextCodec, lines: u8) -> &mut Self {
        let newline = codec.encode("\n");
        for _ in 0..lines {
            self.buf.extend_from_slice(&newline);
        }
        self
    }

    /// Print and feed n lines (ESC d n)
    pub fn feed(&mut self, lines: u8) -> &mut Self {
        self.buf.extend_from_slice(&[ESC, b'd', lines]);
        self
    }

    /// Cut paper
    pub fn cut(&mut self, cut_type: CutType) -> &mut Self {
        match cut_type {
            // ESC m - partial cut
            CutType::Partial => self.buf.extend_from_slice(&[ESC, b'm']),
            // GS V 0 - full cut
            CutType::Full => self.buf.extend_from_slice(&[GS, b'V', 0x00]),
        }
        self
    }

    /// Feed-two-lines command followed by the cut
    pub fn cut_trailer(&mut self, cut_type: CutType) -> &mut Self {
        self.feed(TRAILER_FEED_LINES).cut(cut_type)
    }

    pub fn build(self) -> Vec<u8> {
        self.buf
    }
}

impl Default for FrameBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode a hex string into bytes
///
/// Spaces, hyphens and line breaks are ignored. A blank string decodes to
/// no bytes.
pub fn decode_hex(input: &str) -> PrintResult<Vec<u8>> {
    let cleaned: String = input
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '\n' | '\r'))
        .collect();

    hex::decode(&cleaned).map_err(|e| match e {
        hex::FromHexError::OddLength => {
            PrintError::InvalidPayload("hex string must have an even length".to_string())
        }
        hex::FromHexError::InvalidHexCharacter { c, index } => PrintError::InvalidPayload(
            format!("invalid hex character {:?} at position {}", c, index),
        ),
        other => PrintError::InvalidPayload(other.to_string()),
    })
}

/// Payload bytes followed by LF padding and the cut trailer
pub fn frame_bytes_with_cut(payload: &[u8], cut_type: CutType, feed_lines: u8) -> Vec<u8> {
    let mut frame = FrameBuilder::new();
    frame
        .raw(payload)
        .line_feeds(feed_lines)
        .cut_trailer(cut_type);
    frame.build()
}

/// Text padded with newlines on both sides, then the cut trailer
pub fn frame_text_with_cut(
    text: &str,
    codec: TextCodec,
    cut_type: CutType,
    feed_lines: u8,
) -> Vec<u8> {
    let mut frame = FrameBuilder::new();
    frame
        .encoded_newlines(codec, feed_lines)
        .raw(&codec.encode(text))
        .encoded_newlines(codec, feed_lines)
        .cut_trailer(cut_type);
    frame.build()
}

/// Build the final byte sequence for a job
#[instrument(skip(job), fields(content_type = ?job.content_type(), cut = job.cut_paper()))]
pub fn build_payload(job: &PrintJob) -> PrintResult<Vec<u8>> {
    let cut_type = job.cut_type();
    let feed_lines = job.feed_lines();

    let bytes = match job.content_type() {
        ContentType::EscPosHex => {
            let bytes = decode_hex(job.payload())?;
            if job.cut_paper() {
                frame_bytes_with_cut(&bytes, cut_type, feed_lines)
            } else {
                bytes
            }
        }
        ContentType::EscPosText => {
            let codec = job.codec();
            debug!(encoding = codec.name(), text = job.payload(), "Text payload");
            if job.cut_paper() {
                frame_text_with_cut(job.payload(), codec, cut_type, feed_lines)
            } else {
                codec.encode(job.payload())
            }
        }
        ContentType::Encoded => {
            let bytes = job.codec().encode(job.payload());
            if job.cut_paper() {
                frame_bytes_with_cut(&bytes, cut_type, feed_lines)
            } else {
                bytes
            }
        }
    };

    Ok(bytes)
}
