// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use shin_history::HistoryIndex;
use tracing::{debug, warn};

use crate::LineBuffer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecallState {
    /// The buffer holds what the user is editing.
    Live,
    /// The buffer holds the n-th most recent match (1-based) for the frozen
    /// prefix.
    Recalling(u32),
}

/// Up/Down history recall over a [`LineBuffer`].
///
/// The prefix is frozen when recall starts, so walking through matches does
/// not narrow the search to the recalled text itself.
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    frozen_prefix: String,
    offset: u32,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RecallState {
        match self.offset {
            0 => RecallState::Live,
            n => RecallState::Recalling(n),
        }
    }

    pub fn is_recalling(&self) -> bool {
        self.offset > 0
    }

    /// Text the buffer held when the current (or last) recall started.
    pub fn frozen_prefix(&self) -> &str {
        &self.frozen_prefix
    }

    /// Step to the next older match.  Returns `true` if the buffer changed.
    ///
    /// At the oldest match this does nothing.  Store errors are logged and
    /// treated the same way.
    pub fn up(&mut self, buffer: &mut LineBuffer, history: &dyn HistoryIndex) -> bool {
        if self.offset == 0 {
            self.frozen_prefix = buffer.text().to_string();
        }

        match history.lookup(&self.frozen_prefix, self.offset) {
            Ok(Some(command)) => {
                buffer.replace(command);
                self.offset += 1;
                debug!(
                    offset = self.offset,
                    prefix = %self.frozen_prefix,
                    "recalled older command"
                );
                true
            }
            Ok(None) => {
                debug!(offset = self.offset, prefix = %self.frozen_prefix, "no older command");
                false
            }
            Err(e) => {
                warn!(error = %e, "history lookup failed");
                false
            }
        }
    }

    /// Step back towards the live text.  Returns `true` if the buffer changed.
    ///
    /// From the most recent match this restores the frozen prefix.  If the
    /// expected newer match has disappeared from the store, nothing changes.
    pub fn down(&mut self, buffer: &mut LineBuffer, history: &dyn HistoryIndex) -> bool {
        match self.offset {
            0 => false,
            1 => {
                self.restore(buffer);
                true
            }
            n => match history.lookup(&self.frozen_prefix, n - 2) {
                Ok(Some(command)) => {
                    buffer.replace(command);
                    self.offset = n - 1;
                    debug!(offset = self.offset, "recalled newer command");
                    true
                }
                Ok(None) => {
                    warn!(
                        offset = n,
                        prefix = %self.frozen_prefix,
                        "newer history entry vanished during recall"
                    );
                    false
                }
                Err(e) => {
                    warn!(error = %e, "history lookup failed");
                    false
                }
            },
        }
    }

    /// Abandon recall and put the frozen prefix back into the buffer.
    pub fn restore(&mut self, buffer: &mut LineBuffer) {
        buffer.replace(self.frozen_prefix.as_str());
        self.offset = 0;
    }

    /// Return to live editing, keeping whatever the buffer holds.
    pub fn reset(&mut self) {
        self.offset = 0;
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
