// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Word-boundary search for Ctrl+Left / Ctrl+Right.
//!
//! Characters are split into two classes: ASCII word characters
//! (`[A-Za-z0-9_]`) and everything else.  A boundary is any position where
//! the classes of the characters on either side differ; the positions before
//! the first and after the last character count as non-word.
//!
//! Only ASCII is treated as word material.  Non-ASCII letters are non-word
//! characters, so in `"héllo"` the `é` is its own segment between two
//! boundaries and word jumps stop on both sides of it.
//!
//! A non-ASCII character therefore only stands alone when ASCII word
//! characters surround it.  Consecutive non-ASCII characters form one
//! non-word run with no boundaries inside it: `"日本語"` has none at all, and
//! `"日本語 text"` has boundaries only around `text`.  This is the classic
//! `\b` behaviour of ASCII regular expressions, kept as is.

use crate::offset::{byte_to_char_index, char_to_byte_index};

pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Byte offsets of every boundary in `text`, ascending.
fn boundaries(text: &str) -> impl Iterator<Item = usize> + '_ {
    let mut prev_word = false;
    let inner = text.char_indices().filter_map(move |(i, c)| {
        let word = is_word_char(c);
        let at_boundary = word != prev_word;
        prev_word = word;
        at_boundary.then_some(i)
    });
    let end = text
        .chars()
        .next_back()
        .filter(|&c| is_word_char(c))
        .map(|_| text.len());
    inner.chain(end)
}

/// Nearest boundary before `cursor` (a character index), or 0.
///
/// Only the text left of the cursor is examined, so the cursor position
/// itself is a boundary whenever a word character precedes it.  In that case
/// the search moves on to the boundary before it, which keeps repeated jumps
/// moving left.
pub fn previous_boundary(text: &str, cursor: usize) -> usize {
    let head = &text[..char_to_byte_index(text, cursor)];
    let found: Vec<usize> = boundaries(head).collect();

    let boundary = match found.as_slice() {
        [.., last] if *last != head.len() => *last,
        [.., second_last, _] => *second_last,
        _ => return 0,
    };
    byte_to_char_index(head, boundary)
}

/// Nearest boundary after `cursor` (a character index), or the length of
/// `text` in characters.
///
/// Only the text right of the cursor is examined; when the cursor already
/// sits on a boundary the next one further right is returned.
pub fn next_boundary(text: &str, cursor: usize) -> usize {
    let start = char_to_byte_index(text, cursor);
    let tail = &text[start..];
    let mut found = boundaries(tail);

    let boundary = match (found.next(), found.next()) {
        (Some(0), Some(second)) => second,
        (Some(first), _) if first != 0 => first,
        _ => return text.chars().count(),
    };
    byte_to_char_index(text, start + boundary)
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
