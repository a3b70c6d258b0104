#![forbid(unsafe_code)]

//! Hex text helpers shared by configuration, the CLI and proof files.

use crate::VdfResult;

/// Decode hex text, tolerating a `0x`/`0X` prefix, odd digit counts and
/// surrounding whitespace.
pub fn decode_hex(text: &str) -> VdfResult<Vec<u8>> {
    let trimmed = text.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    if digits.len() % 2 == 1 {
        Ok(hex::decode(format!("0{digits}"))?)
    } else {
        Ok(hex::decode(digits)?)
    }
}

/// Lowercase hex with a `0x` prefix.
#[must_use]
pub fn encode_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}
