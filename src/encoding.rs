//! Byte-level input normalization.
//!
//! Valve tools write KeyValues files in several encodings; localization files
//! in particular are usually UTF-16LE. Before parsing, the raw bytes are
//! turned into UTF-8 text:
//!
//! - `00 00 FE FF` / `FF FE 00 00`: UTF-32 big/little endian
//! - `FE FF` / `FF FE`: UTF-16 big/little endian
//! - anything else is taken as UTF-8
//!
//! The UTF-32 marks are checked first because `FF FE 00 00` also starts with
//! the UTF-16LE mark. Leading byte order marks are stripped from the result.

use std::borrow::Cow;

use tracing::warn;

use crate::KvError;

const BOM: char = '\u{FEFF}';

/// Detected input encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Utf8,
    Utf16Be,
    Utf16Le,
    Utf32Be,
    Utf32Le,
}

/// Detect the encoding from a byte order mark, defaulting to UTF-8.
pub fn detect(bytes: &[u8]) -> Encoding {
    if bytes.starts_with(&[0x00, 0x00, 0xFE, 0xFF]) {
        Encoding::Utf32Be
    } else if bytes.starts_with(&[0xFF, 0xFE, 0x00, 0x00]) {
        Encoding::Utf32Le
    } else if bytes.starts_with(&[0xFE, 0xFF]) {
        Encoding::Utf16Be
    } else if bytes.starts_with(&[0xFF, 0xFE]) {
        Encoding::Utf16Le
    } else {
        Encoding::Utf8
    }
}

/// Decode raw file bytes to UTF-8 text with any leading BOM removed.
pub fn normalize(bytes: &[u8]) -> Result<String, KvError> {
    let text = match detect(bytes) {
        Encoding::Utf8 => match String::from_utf8_lossy(bytes) {
            Cow::Borrowed(s) => s.to_string(),
            Cow::Owned(s) => {
                warn!("input is not valid UTF-8, invalid sequences were replaced");
                s
            }
        },
        Encoding::Utf16Be => decode_utf16(bytes, u16::from_be_bytes)?,
        Encoding::Utf16Le => decode_utf16(bytes, u16::from_le_bytes)?,
        Encoding::Utf32Be => decode_utf32(bytes, u32::from_be_bytes)?,
        Encoding::Utf32Le => decode_utf32(bytes, u32::from_le_bytes)?,
    };

    Ok(strip_bom(&text).to_string())
}

/// Remove every leading U+FEFF.
pub fn strip_bom(text: &str) -> &str {
    text.trim_start_matches(BOM)
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> Result<String, KvError> {
    if bytes.len() % 2 != 0 {
        return Err(encoding_error("UTF-16 input has an odd number of bytes"));
    }

    let units = bytes.chunks_exact(2).map(|c| unit([c[0], c[1]]));
    char::decode_utf16(units)
        .map(|r| r.map_err(|e| encoding_error(format!("unpaired UTF-16 surrogate 0x{:04X}", e.unpaired_surrogate()))))
        .collect()
}

fn decode_utf32(bytes: &[u8], unit: fn([u8; 4]) -> u32) -> Result<String, KvError> {
    if bytes.len() % 4 != 0 {
        return Err(encoding_error("UTF-32 input length is not a multiple of 4"));
    }

    bytes
        .chunks_exact(4)
        .map(|c| {
            let code = unit([c[0], c[1], c[2], c[3]]);
            char::from_u32(code)
                .ok_or_else(|| encoding_error(format!("invalid UTF-32 code point 0x{:08X}", code)))
        })
        .collect()
}

fn encoding_error(message: impl Into<String>) -> KvError {
    KvError::Encoding {
        message: message.into(),
        hint: Some("Save the file as UTF-8 or UTF-16 with a byte order mark".into()),
        code: Some(310),
    }
}
