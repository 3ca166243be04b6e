// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use crate::keys::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Backward,
    Forward,
}

/// Everything a key press can ask the composer to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditCommand {
    InsertChar(char),
    /// Move the cursor by a signed number of characters.
    MoveCursor(isize),
    /// Move to the nearest word boundary in the given direction.
    JumpWord(Direction),
    Home,
    End,
    DeleteBefore,
    DeleteAfter,
    RecallUp,
    RecallDown,
    Submit,
    Cancel,
}

impl EditCommand {
    /// Map a key event to a command.
    ///
    /// Releases and keys the composer does not handle yield `None`.  Only
    /// printable Latin-1 characters are inserted literally; other keysyms are
    /// left to the host rather than guessed at.
    pub fn decode(key: &KeyEvent) -> Option<Self> {
        if key.is_release() {
            return None;
        }
        let ctrl = key.has_control();

        let cmd = match key.keyval {
            KEY_RETURN | KEY_KP_ENTER => Self::Submit,
            KEY_ESCAPE => Self::Cancel,
            KEY_BACKSPACE => Self::DeleteBefore,
            KEY_DELETE | KEY_KP_DELETE => Self::DeleteAfter,
            KEY_UP | KEY_KP_UP => Self::RecallUp,
            KEY_DOWN | KEY_KP_DOWN => Self::RecallDown,
            KEY_LEFT | KEY_KP_LEFT if ctrl => Self::JumpWord(Direction::Backward),
            KEY_RIGHT | KEY_KP_RIGHT if ctrl => Self::JumpWord(Direction::Forward),
            KEY_LEFT | KEY_KP_LEFT => Self::MoveCursor(-1),
            KEY_RIGHT | KEY_KP_RIGHT => Self::MoveCursor(1),
            KEY_HOME | KEY_KP_HOME => Self::Home,
            KEY_END | KEY_KP_END => Self::End,
            other => {
                let c = char::from_u32(other).filter(|&c| is_printable_latin1(c))?;
                Self::InsertChar(c)
            }
        };
        Some(cmd)
    }

    /// Whether the command edits or moves within the line, as opposed to
    /// recall navigation and submit/cancel.
    pub fn is_edit(&self) -> bool {
        !matches!(self, Self::RecallUp | Self::RecallDown | Self::Submit | Self::Cancel)
    }
}

/// Printable characters of the single-byte (Latin-1) range: ASCII graphic
/// characters plus space, and U+00A1..=U+00FF except the soft hyphen.
pub fn is_printable_latin1(c: char) -> bool {
    matches!(c, ' '..='~' | '\u{a1}'..='\u{ff}') && c != '\u{ad}'
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(keyval: u32) -> Option<EditCommand> {
        EditCommand::decode(&KeyEvent::press(keyval))
    }

    fn decode_ctrl(keyval: u32) -> Option<EditCommand> {
        EditCommand::decode(&KeyEvent::press(keyval).with_state(CONTROL_MASK))
    }

    #[test]
    fn releases_are_ignored() {
        for k in [KEY_RETURN, KEY_ESCAPE, 'a' as u32, KEY_UP] {
            let ev = KeyEvent::press(k).with_state(RELEASE_MASK);
            assert_eq!(EditCommand::decode(&ev), None, "{k:#x}");
        }
    }

    #[test]
    fn main_and_keypad_keys_decode_alike() {
        let pairs = [
            (KEY_RETURN, KEY_KP_ENTER),
            (KEY_DELETE, KEY_KP_DELETE),
            (KEY_UP, KEY_KP_UP),
            (KEY_DOWN, KEY_KP_DOWN),
            (KEY_LEFT, KEY_KP_LEFT),
            (KEY_RIGHT, KEY_KP_RIGHT),
            (KEY_HOME, KEY_KP_HOME),
            (KEY_END, KEY_KP_END),
        ];
        for (main, kp) in pairs {
            assert_eq!(decode(main), decode(kp), "{main:#x} vs {kp:#x}");
            assert!(decode(main).is_some());
        }
    }

    #[test]
    fn control_switches_arrows_to_word_jumps() {
        assert_eq!(decode(KEY_LEFT), Some(EditCommand::MoveCursor(-1)));
        assert_eq!(decode(KEY_RIGHT), Some(EditCommand::MoveCursor(1)));
        assert_eq!(decode_ctrl(KEY_LEFT), Some(EditCommand::JumpWord(Direction::Backward)));
        assert_eq!(decode_ctrl(KEY_KP_RIGHT), Some(EditCommand::JumpWord(Direction::Forward)));
    }

    #[test]
    fn control_does_not_affect_home_and_end() {
        assert_eq!(decode_ctrl(KEY_HOME), Some(EditCommand::Home));
        assert_eq!(decode_ctrl(KEY_END), Some(EditCommand::End));
    }

    #[test]
    fn printable_latin1_characters_insert() {
        assert_eq!(decode('a' as u32), Some(EditCommand::InsertChar('a')));
        assert_eq!(decode(' ' as u32), Some(EditCommand::InsertChar(' ')));
        assert_eq!(decode('~' as u32), Some(EditCommand::InsertChar('~')));
        assert_eq!(decode(0xe9), Some(EditCommand::InsertChar('é')));
        assert_eq!(decode(0xff), Some(EditCommand::InsertChar('ÿ')));
    }

    #[test]
    fn control_characters_and_gaps_are_not_inserted() {
        for k in [0x00, 0x09, 0x1b, 0x7f, 0x85, 0xa0, 0xad] {
            assert_eq!(decode(k), None, "{k:#x}");
        }
    }

    #[test]
    fn characters_beyond_latin1_are_passed_through() {
        assert_eq!(decode(0x20ac), None);
        assert_eq!(decode(keysym_for_char('€')), None);
        assert_eq!(decode(KEY_TAB), None);
        assert_eq!(decode(KEY_PAGE_UP), None);
    }

    #[test]
    fn recall_and_session_keys_are_not_edits() {
        assert!(!EditCommand::RecallUp.is_edit());
        assert!(!EditCommand::Submit.is_edit());
        assert!(!EditCommand::Cancel.is_edit());
        assert!(EditCommand::Home.is_edit());
        assert!(EditCommand::InsertChar('x').is_edit());
    }
}
