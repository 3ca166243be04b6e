// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Command history shared by every composer session.
//!
//! Commands are kept in a single SQLite table keyed by the command text.
//! Re-running a command bumps its timestamp and use count instead of adding a
//! row, and recall walks matches for a typed prefix from newest to oldest.

mod error;
mod store;

pub use error::HistoryError;
pub use store::{default_path, HistoryEntry, HistoryIndex, HistoryStore, PREFIX_RANGE_END};
