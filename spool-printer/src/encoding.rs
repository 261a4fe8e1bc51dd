//! Text encodings for receipt printers
//!
//! Most ESC/POS printers power up in code page 437, which is not a WHATWG
//! encoding, so it is provided here as a built-in table. Every other name is
//! resolved through `encoding_rs` labels. Resolution never fails: unknown
//! names fall back to UTF-8.

use encoding_rs::{Encoding, UTF_8};
use tracing::debug;

/// Name used when a request does not specify an encoding
pub const DEFAULT_ENCODING: &str = "IBM437";

/// Names accepted for code page 437 (compared lowercase)
const CP437_LABELS: &[&str] = &[
    "ibm437",
    "ibm-437",
    "cp437",
    "437",
    "oem437",
    "dos-437",
    "pc437",
    "cspc8codepage437",
];

/// Code page 437, bytes 0x80..=0xFF
const CP437_HIGH: [char; 128] = [
    'Ç', 'ü', 'é', 'â', 'ä', 'à', 'å', 'ç', 'ê', 'ë', 'è', 'ï', 'î', 'ì', 'Ä', 'Å', //
    'É', 'æ', 'Æ', 'ô', 'ö', 'ò', 'û', 'ù', 'ÿ', 'Ö', 'Ü', '¢', '£', '¥', '₧', 'ƒ', //
    'á', 'í', 'ó', 'ú', 'ñ', 'Ñ', 'ª', 'º', '¿', '⌐', '¬', '½', '¼', '¡', '«', '»', //
    '░', '▒', '▓', '│', '┤', '╡', '╢', '╖', '╕', '╣', '║', '╗', '╝', '╜', '╛', '┐', //
    '└', '┴', '┬', '├', '─', '┼', '╞', '╟', '╚', '╔', '╩', '╦', '╠', '═', '╬', '╧', //
    '╨', '╤', '╥', '╙', '╘', '╒', '╓', '╫', '╪', '┘', '┌', '█', '▄', '▌', '▐', '▀', //
    'α', 'ß', 'Γ', 'π', 'Σ', 'σ', 'µ', 'τ', 'Φ', 'Θ', 'Ω', 'δ', '∞', 'φ', 'ε', '∩', //
    '≡', '±', '≥', '≤', '⌠', '⌡', '÷', '≈', '°', '∙', '·', '√', 'ⁿ', '²', '■', '\u{A0}',
];

/// A resolved text codec
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextCodec {
    /// DOS OEM code page 437
    #[default]
    Cp437,
    /// Any encoding known to `encoding_rs`
    Standard(&'static Encoding),
}

impl TextCodec {
    /// Resolve an encoding name to a codec
    ///
    /// Blank and unrecognized names resolve to UTF-8.
    pub fn resolve(name: &str) -> Self {
        let label = name.trim();
        if label.is_empty() {
            return Self::Standard(UTF_8);
        }

        let lower = label.to_ascii_lowercase();
        if CP437_LABELS.contains(&lower.as_str()) {
            return Self::Cp437;
        }

        match Encoding::for_label(label.as_bytes()) {
            Some(encoding) => Self::Standard(encoding),
            None => {
                debug!(encoding = label, "Unknown encoding, falling back to UTF-8");
                Self::Standard(UTF_8)
            }
        }
    }

    /// Canonical name of the codec
    pub fn name(&self) -> &'static str {
        match self {
            Self::Cp437 => DEFAULT_ENCODING,
            Self::Standard(encoding) => encoding.name(),
        }
    }

    /// Encode text into printer bytes
    ///
    /// Characters the code page cannot represent become `?` for CP437 and
    /// numeric character references for `encoding_rs` single/multi-byte
    /// encodings. UTF-16 labels encode as UTF-8.
    pub fn encode(&self, text: &str) -> Vec<u8> {
        match self {
            Self::Cp437 => text.chars().map(cp437_byte).collect(),
            Self::Standard(encoding) => {
                let (bytes, _, _) = encoding.encode(text);
                bytes.into_owned()
            }
        }
    }
}

fn cp437_byte(c: char) -> u8 {
    if c.is_ascii() {
        return c as u8;
    }
    CP437_HIGH
        .iter()
        .position(|&mapped| mapped == c)
        .map(|idx| 0x80 + idx as u8)
        .unwrap_or(b'?')
}
