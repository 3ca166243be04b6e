// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("creating history directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("opening history database {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("history database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("refusing to record an empty command")]
    EmptyCommand,

    #[error("stored timestamp {0} is out of range")]
    BadTimestamp(i64),

    #[error("history connection lock poisoned")]
    Poisoned,
}
