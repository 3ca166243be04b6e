// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use crate::LineBuffer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    UnderlineSingle,
}

/// Styling applied to the character range `start..end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribute {
    pub kind: AttributeKind,
    pub start: usize,
    pub end: usize,
}

/// Snapshot of the line as the host should display it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preedit {
    pub text: String,
    /// Cursor position in characters.
    pub cursor: usize,
    pub attributes: Vec<Attribute>,
    /// Hidden while the line is empty.
    pub visible: bool,
}

impl Preedit {
    pub fn from_buffer(buffer: &LineBuffer) -> Self {
        Self {
            text: buffer.text().to_string(),
            cursor: buffer.cursor(),
            attributes: vec![Attribute {
                kind: AttributeKind::UnderlineSingle,
                start: 0,
                end: buffer.len(),
            }],
            visible: !buffer.is_empty(),
        }
    }
}

/// Where the composer's output goes: the host input-method surface.
pub trait Surface {
    /// Show the line being composed.
    fn update_preedit(&mut self, preedit: &Preedit);

    /// Insert finished text into the focused application.
    fn commit_text(&mut self, text: &str);
}
