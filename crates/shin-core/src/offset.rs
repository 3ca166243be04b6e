// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Conversions between character indices (what the cursor counts) and UTF-8
//! byte offsets (what `str` slicing needs).

/// Character index of the character starting at `byte`.
///
/// `byte == text.len()` maps to the character count.
///
/// # Panics
///
/// If `byte` does not fall on a character boundary of `text`.  Callers only
/// ever pass offsets derived from `text` itself, so a misaligned offset is a
/// bug that must not silently misplace the cursor.
pub fn byte_to_char_index(text: &str, byte: usize) -> usize {
    assert!(
        text.is_char_boundary(byte),
        "byte offset {byte} is not on a character boundary of {text:?}"
    );
    text[..byte].chars().count()
}

/// Byte offset where character `index` starts; indices past the end map to
/// `text.len()`.
pub fn char_to_byte_index(text: &str, index: usize) -> usize {
    text.char_indices().nth(index).map_or(text.len(), |(i, _)| i)
}
