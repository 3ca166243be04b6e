// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! The composer: a single editable line with word motion and prefix-driven
//! history recall, driven one key event at a time.

mod buffer;
mod command;
pub mod keys;
mod navigator;
mod offset;
mod render;
mod session;
pub mod word;

pub use buffer::LineBuffer;
pub use command::{Direction, EditCommand};
pub use keys::KeyEvent;
pub use navigator::{Navigator, RecallState};
pub use offset::{byte_to_char_index, char_to_byte_index};
pub use render::{Attribute, AttributeKind, Preedit, Surface};
pub use session::{Flow, HostEvent, Session, SessionOptions};
