// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Key events as delivered by the input-method host: an X keysym, the raw
//! device keycode, and a modifier bitmask using the IBus bit layout.

// ── Modifier masks ────────────────────────────────────────────────────────────

pub const SHIFT_MASK: u32 = 1 << 0;
pub const CONTROL_MASK: u32 = 1 << 2;
pub const MOD1_MASK: u32 = 1 << 3;
pub const SUPER_MASK: u32 = 1 << 26;
pub const RELEASE_MASK: u32 = 1 << 30;

// ── Key symbols ───────────────────────────────────────────────────────────────

pub const KEY_BACKSPACE: u32 = 0xff08;
pub const KEY_TAB: u32 = 0xff09;
pub const KEY_RETURN: u32 = 0xff0d;
pub const KEY_ESCAPE: u32 = 0xff1b;
pub const KEY_HOME: u32 = 0xff50;
pub const KEY_LEFT: u32 = 0xff51;
pub const KEY_UP: u32 = 0xff52;
pub const KEY_RIGHT: u32 = 0xff53;
pub const KEY_DOWN: u32 = 0xff54;
pub const KEY_PAGE_UP: u32 = 0xff55;
pub const KEY_PAGE_DOWN: u32 = 0xff56;
pub const KEY_END: u32 = 0xff57;
pub const KEY_KP_ENTER: u32 = 0xff8d;
pub const KEY_KP_HOME: u32 = 0xff95;
pub const KEY_KP_LEFT: u32 = 0xff96;
pub const KEY_KP_UP: u32 = 0xff97;
pub const KEY_KP_RIGHT: u32 = 0xff98;
pub const KEY_KP_DOWN: u32 = 0xff99;
pub const KEY_KP_END: u32 = 0xff9c;
pub const KEY_KP_DELETE: u32 = 0xff9f;
pub const KEY_DELETE: u32 = 0xffff;

/// Offset X uses for keysyms of characters outside Latin-1.
pub const UNICODE_KEYSYM_BASE: u32 = 0x0100_0000;

/// Keysym for a character: Latin-1 characters map to themselves, everything
/// else to `UNICODE_KEYSYM_BASE + code point`.
pub fn keysym_for_char(c: char) -> u32 {
    let cp = c as u32;
    if cp <= 0xff {
        cp
    } else {
        UNICODE_KEYSYM_BASE + cp
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub keyval: u32,
    /// Hardware keycode; carried for logging only.
    pub keycode: u32,
    pub state: u32,
}

impl KeyEvent {
    pub fn new(keyval: u32, keycode: u32, state: u32) -> Self {
        Self { keyval, keycode, state }
    }

    /// A key press with no modifiers.
    pub fn press(keyval: u32) -> Self {
        Self::new(keyval, 0, 0)
    }

    pub fn with_state(mut self, state: u32) -> Self {
        self.state |= state;
        self
    }

    pub fn is_release(&self) -> bool {
        self.state & RELEASE_MASK != 0
    }

    pub fn has_control(&self) -> bool {
        self.state & CONTROL_MASK != 0
    }
}
