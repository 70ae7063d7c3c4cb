//! Spreadsheet-compatible text encoding.
//!
//! Spreadsheet tools detect tab-separated Unicode text when the file is
//! UTF-16LE with a leading byte-order mark. This step is kept separate from
//! CSV generation so it can be swapped or dropped on its own.

use crate::constants::UTF16LE_BOM;

/// Encode UTF-8 text as UTF-16 little-endian, prefixed with the BOM `FF FE`.
pub fn utf16le_with_bom(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(UTF16LE_BOM.len() + text.len() * 2);
    out.extend_from_slice(&UTF16LE_BOM);
    for unit in text.encode_utf16() {
        out.extend_from_slice(&unit.to_le_bytes());
    }
    out
}

/// Decode BOM-prefixed UTF-16LE bytes back to text.
///
/// Returns None if the BOM is missing, the length is odd, or the code units
/// are not valid UTF-16.
pub fn decode_utf16le_with_bom(bytes: &[u8]) -> Option<String> {
    let body = bytes.strip_prefix(&UTF16LE_BOM)?;
    if body.len() % 2 != 0 {
        return None;
    }
    let units: Vec<u16> = body
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    String::from_utf16(&units).ok()
}
