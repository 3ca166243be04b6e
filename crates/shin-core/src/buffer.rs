// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use crate::command::Direction;
use crate::offset::char_to_byte_index;
use crate::word;

/// The line being composed.
///
/// The cursor counts characters, never bytes, and always lies in
/// `0..=len()`.  Operations that change the text return `true` when they did
/// so; motions return whether the cursor moved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuffer {
    text: String,
    cursor: usize,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A buffer holding `text` with the cursor at its end.
    pub fn with_text(text: impl Into<String>) -> Self {
        let mut buf = Self::new();
        buf.replace(text);
        buf
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    fn cursor_byte(&self) -> usize {
        char_to_byte_index(&self.text, self.cursor)
    }

    pub fn insert(&mut self, c: char) -> bool {
        let at = self.cursor_byte();
        self.text.insert(at, c);
        self.cursor += 1;
        true
    }

    /// Backspace.
    pub fn delete_before(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let at = self.cursor_byte();
        self.text.remove(at);
        true
    }

    /// Delete.
    pub fn delete_after(&mut self) -> bool {
        if self.cursor >= self.len() {
            return false;
        }
        let at = self.cursor_byte();
        self.text.remove(at);
        true
    }

    /// Move by `offset` characters, clamped to the line.
    pub fn move_by(&mut self, offset: isize) -> bool {
        let len = self.len() as isize;
        let target = (self.cursor as isize).saturating_add(offset).clamp(0, len);
        self.set_cursor(target as usize)
    }

    pub fn move_home(&mut self) -> bool {
        self.set_cursor(0)
    }

    pub fn move_end(&mut self) -> bool {
        self.set_cursor(self.len())
    }

    /// Jump to the nearest word boundary in `direction`.
    pub fn move_to_boundary(&mut self, direction: Direction) -> bool {
        let target = match direction {
            Direction::Backward => word::previous_boundary(&self.text, self.cursor),
            Direction::Forward => word::next_boundary(&self.text, self.cursor),
        };
        self.set_cursor(target.min(self.len()))
    }

    fn set_cursor(&mut self, pos: usize) -> bool {
        let moved = pos != self.cursor;
        self.cursor = pos;
        moved
    }

    /// Replace the whole text and put the cursor at its end.
    pub fn replace(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        let changed = text != self.text;
        self.text = text;
        self.cursor = self.len();
        changed
    }

    pub fn clear(&mut self) -> bool {
        let changed = !self.text.is_empty();
        self.text.clear();
        self.cursor = 0;
        changed
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    /// Buffer with `text` and the cursor at character `cursor`.
    fn at(text: &str, cursor: usize) -> LineBuffer {
        let mut b = LineBuffer::with_text(text);
        b.move_home();
        b.move_by(cursor as isize);
        b
    }

    // ── Insertion / deletion ──────────────────────────────────────────────────

    #[test]
    fn typing_appends_and_advances() {
        let mut b = LineBuffer::new();
        for c in "ls -l".chars() {
            assert!(b.insert(c));
        }
        assert_eq!(b.text(), "ls -l");
        assert_eq!(b.cursor(), 5);
    }

    #[test]
    fn insert_in_the_middle() {
        let mut b = at("gt", 1);
        b.insert('i');
        assert_eq!(b.text(), "git");
        assert_eq!(b.cursor(), 2);
    }

    #[test]
    fn insert_then_backspace_restores_every_position() {
        let original = "café ls";
        for cursor in 0..=original.chars().count() {
            for c in ['x', 'é', 'ÿ'] {
                let mut b = at(original, cursor);
                let before = b.clone();
                b.insert(c);
                assert!(b.delete_before());
                assert_eq!(b, before, "cursor {cursor}, char {c:?}");
            }
        }
    }

    #[test]
    fn backspace_at_start_is_a_no_op() {
        let mut b = at("abc", 0);
        assert!(!b.delete_before());
        assert_eq!(b.text(), "abc");
        assert_eq!(b.cursor(), 0);
    }

    #[test]
    fn backspace_removes_multibyte_character() {
        let mut b = LineBuffer::with_text("naïve");
        b.move_by(-2);
        assert!(b.delete_before());
        assert_eq!(b.text(), "nave");
        assert_eq!(b.cursor(), 2);
    }

    #[test]
    fn delete_removes_under_cursor_and_keeps_position() {
        let mut b = at("éa", 0);
        assert!(b.delete_after());
        assert_eq!(b.text(), "a");
        assert_eq!(b.cursor(), 0);
    }

    #[test]
    fn delete_at_end_is_a_no_op() {
        let mut b = LineBuffer::with_text("abc");
        assert!(!b.delete_after());
        assert_eq!(b.text(), "abc");
    }

    // ── Motion ────────────────────────────────────────────────────────────────

    #[test]
    fn move_by_clamps_to_line() {
        for offset in [isize::MIN, -100, -1, 0, 1, 100, isize::MAX] {
            for start in 0..=3 {
                let mut b = at("abc", start);
                b.move_by(offset);
                assert!(b.cursor() <= 3, "offset {offset} from {start}");
            }
        }
        let mut b = at("abc", 1);
        b.move_by(isize::MIN);
        assert_eq!(b.cursor(), 0);
        b.move_by(isize::MAX);
        assert_eq!(b.cursor(), 3);
    }

    #[test]
    fn move_reports_whether_cursor_moved() {
        let mut b = at("ab", 0);
        assert!(!b.move_by(-1));
        assert!(b.move_by(1));
        assert!(b.move_end());
        assert!(!b.move_end());
        assert!(b.move_home());
    }

    #[test]
    fn word_jumps_use_boundaries() {
        let mut b = LineBuffer::with_text("git status");
        b.move_to_boundary(Direction::Backward);
        assert_eq!(b.cursor(), 4);
        b.move_to_boundary(Direction::Backward);
        assert_eq!(b.cursor(), 3);
        b.move_to_boundary(Direction::Forward);
        assert_eq!(b.cursor(), 4);
        b.move_to_boundary(Direction::Forward);
        assert_eq!(b.cursor(), 10);
        assert_eq!(b.text(), "git status");
    }

    // ── Whole-line operations ─────────────────────────────────────────────────

    #[test]
    fn replace_puts_cursor_at_end() {
        let mut b = at("gi", 1);
        assert!(b.replace("git log"));
        assert_eq!(b.cursor(), 7);
        assert!(!b.replace("git log"));
    }

    #[test]
    fn clear_empties_and_resets_cursor() {
        let mut b = LineBuffer::with_text("rm -rf build");
        assert!(b.clear());
        assert!(b.is_empty());
        assert_eq!(b.cursor(), 0);
        assert!(!b.clear());
    }
}
