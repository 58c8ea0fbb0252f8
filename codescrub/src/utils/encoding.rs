// codescrub/src/utils/encoding.rs
//! Text decoding for input files.
//!
//! Files are tried as UTF-8 (with or without a byte-order mark) and fall back
//! to Latin-1, which accepts every byte sequence. The detected encoding is
//! reused when the sanitized copy is written.

use serde::Serialize;
use thiserror::Error;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Encoding detected for an input and reused for its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TextEncoding {
    #[serde(rename = "utf-8")]
    Utf8,
    #[serde(rename = "utf-8-sig")]
    Utf8Bom,
    #[serde(rename = "latin-1")]
    Latin1,
}

impl TextEncoding {
    pub fn label(self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Utf8Bom => "utf-8-sig",
            TextEncoding::Latin1 => "latin-1",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodingError {
    #[error("character {0:?} at offset {1} cannot be written as {2}")]
    Unrepresentable(char, usize, &'static str),
}

/// Decodes raw bytes, returning the text and the encoding that succeeded.
pub fn decode(bytes: &[u8]) -> (String, TextEncoding) {
    if let Some(rest) = bytes.strip_prefix(UTF8_BOM) {
        if let Ok(text) = std::str::from_utf8(rest) {
            return (text.to_string(), TextEncoding::Utf8Bom);
        }
    }
    match std::str::from_utf8(bytes) {
        Ok(text) => (text.to_string(), TextEncoding::Utf8),
        Err(_) => (bytes.iter().map(|&b| b as char).collect(), TextEncoding::Latin1),
    }
}

/// Encodes `text` back into `encoding`.
pub fn encode(text: &str, encoding: TextEncoding) -> Result<Vec<u8>, EncodingError> {
    match encoding {
        TextEncoding::Utf8 => Ok(text.as_bytes().to_vec()),
        TextEncoding::Utf8Bom => {
            let mut out = Vec::with_capacity(UTF8_BOM.len() + text.len());
            out.extend_from_slice(UTF8_BOM);
            out.extend_from_slice(text.as_bytes());
            Ok(out)
        }
        TextEncoding::Latin1 => text
            .char_indices()
            .map(|(offset, c)| {
                u8::try_from(u32::from(c))
                    .map_err(|_| EncodingError::Unrepresentable(c, offset, encoding.label()))
            })
            .collect(),
    }
}
