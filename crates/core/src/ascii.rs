//! The fixed 7-bit ASCII alphabet.
//!
//! Ids `0..128` map one-to-one onto ASCII code points. Everything above that
//! range is a learned merge symbol.

use crate::core::SymbolId;
use crate::error::{Result, TokenizerError};

/// Number of reserved symbol ids, one per ASCII code point.
pub const ASCII_SIZE: usize = 128;

/// First id handed out to a learned merge.
pub const FIRST_MERGE_ID: SymbolId = ASCII_SIZE as SymbolId;

/// Check that every character of `text` is ASCII.
///
/// Reports the first offending character and its char index.
pub fn validate_ascii(text: &str) -> Result<()> {
    match text.chars().enumerate().find(|(_, ch)| !ch.is_ascii()) {
        Some((position, ch)) => Err(TokenizerError::NonAscii { ch, position }),
        None => Ok(()),
    }
}

/// Map each character of `text` to its ASCII code, preserving order.
pub fn string_to_ascii(text: &str) -> Result<Vec<SymbolId>> {
    validate_ascii(text)?;
    Ok(text.bytes().map(SymbolId::from).collect())
}

/// Inverse of [`string_to_ascii`].
///
/// Fails on the first id that is not a raw ASCII code.
pub fn ascii_to_string(ids: &[SymbolId]) -> Result<String> {
    ids.iter()
        .map(|&id| {
            u8::try_from(id)
                .ok()
                .filter(u8::is_ascii)
                .map(char::from)
                .ok_or(TokenizerError::Vocabulary(id))
        })
        .collect()
}
