// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use crate::HistoryError;

/// Upper sentinel appended to a prefix to form the `BETWEEN` range.
///
/// Entries are expected to consist of characters that sort below U+00FF, so
/// `[prefix, prefix + 'ÿ']` holds exactly the commands starting with `prefix`.
/// Commands whose character right after the prefix sorts above U+00FF fall
/// outside the range and are not recalled.
pub const PREFIX_RANGE_END: char = '\u{FF}';

const SCHEMA: &str = "
    PRAGMA journal_mode = WAL;

    CREATE TABLE IF NOT EXISTS history (
        command   TEXT    NOT NULL,
        last_used INTEGER NOT NULL,
        use_count INTEGER NOT NULL
    );

    CREATE UNIQUE INDEX IF NOT EXISTS command_index ON history (command);
    CREATE INDEX IF NOT EXISTS last_used_index ON history (last_used);
    CREATE INDEX IF NOT EXISTS use_count_index ON history (use_count);
";

/// The seam between the composer and wherever history is kept.
pub trait HistoryIndex: Send + Sync {
    /// Insert `command`, or bump its timestamp and use count if already present.
    fn record(&self, command: &str) -> Result<(), HistoryError>;

    /// The `skip`-th most recent command starting with `prefix`, or `None`
    /// once the matches are exhausted.
    fn lookup(&self, prefix: &str, skip: u32) -> Result<Option<String>, HistoryError>;
}

/// One distinct command as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub command: String,
    pub last_used: DateTime<Utc>,
    pub use_count: u64,
}

/// Default location of the history database:
/// `$XDG_DATA_HOME/shin/history.db` (i.e. `~/.local/share/shin/history.db`).
pub fn default_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".local")
                .join("share")
        })
        .join("shin")
        .join("history.db")
}

/// SQLite-backed history store.
///
/// Concurrent sessions (in this process or others) share the database file;
/// each statement runs in its own implicit transaction and SQLite's locking
/// serializes writers, with `busy_timeout` making contending writers wait
/// instead of failing.
pub struct HistoryStore {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl HistoryStore {
    /// Open the database at `path`, creating the directory and schema when the
    /// file does not exist yet.
    ///
    /// An existing file is trusted as-is, so the common startup path costs a
    /// single `stat` plus the open.
    pub fn open(path: &Path, busy_timeout: Duration) -> Result<Self, HistoryError> {
        let fresh = !path.exists();

        if fresh {
            if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                fs::create_dir_all(dir).map_err(|source| HistoryError::CreateDir {
                    path: dir.to_path_buf(),
                    source,
                })?;
            }
        }

        let conn = Connection::open(path).map_err(|source| HistoryError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        conn.busy_timeout(busy_timeout)?;

        if fresh {
            info!(path = %path.display(), "creating history database");
            if let Err(e) = conn.execute_batch(SCHEMA) {
                // A half-initialised file would be trusted by the fast path on
                // the next start.
                drop(conn);
                let _ = fs::remove_file(path);
                return Err(e.into());
            }
        } else {
            debug!(path = %path.display(), "opened existing history database");
        }

        Ok(Self { conn: Mutex::new(conn), path: Some(path.to_path_buf()) })
    }

    pub fn open_in_memory() -> Result<Self, HistoryError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn: Mutex::new(conn), path: None })
    }

    /// Location of the backing file; `None` for in-memory stores.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, HistoryError> {
        self.conn.lock().map_err(|_| HistoryError::Poisoned)
    }

    /// Record `command` as used at `at`.
    pub fn record_at(&self, command: &str, at: DateTime<Utc>) -> Result<(), HistoryError> {
        if command.is_empty() {
            return Err(HistoryError::EmptyCommand);
        }
        self.conn()?.execute(
            "INSERT INTO history (command, last_used, use_count)
             VALUES (?1, ?2, 1)
             ON CONFLICT (command) DO UPDATE
             SET last_used = excluded.last_used, use_count = use_count + 1",
            params![command, at.timestamp_micros()],
        )?;
        debug!(command, "recorded command");
        Ok(())
    }

    /// Fetch the stored row for exactly `command`.
    pub fn entry(&self, command: &str) -> Result<Option<HistoryEntry>, HistoryError> {
        let row = self
            .conn()?
            .query_row(
                "SELECT command, last_used, use_count FROM history WHERE command = ?1",
                params![command],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .optional()?;
        row.map(into_entry).transpose()
    }

    /// Up to `limit` commands starting with `prefix`, most recent first.
    pub fn recent(&self, prefix: &str, limit: usize) -> Result<Vec<HistoryEntry>, HistoryError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT command, last_used, use_count FROM history
             WHERE command BETWEEN ?1 AND ?2
             ORDER BY last_used DESC, rowid
             LIMIT ?3",
        )?;
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = stmt
            .query_map(params![prefix, range_end(prefix), limit], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;
        rows.into_iter().map(into_entry).collect()
    }

    /// Number of distinct commands stored.
    pub fn len(&self) -> Result<usize, HistoryError> {
        let n: i64 = self.conn()?.query_row("SELECT COUNT(*) FROM history", [], |row| row.get(0))?;
        Ok(n as usize)
    }

    pub fn is_empty(&self) -> Result<bool, HistoryError> {
        Ok(self.len()? == 0)
    }
}

impl HistoryIndex for HistoryStore {
    fn record(&self, command: &str) -> Result<(), HistoryError> {
        self.record_at(command, Utc::now())
    }

    fn lookup(&self, prefix: &str, skip: u32) -> Result<Option<String>, HistoryError> {
        // BETWEEN rather than LIKE: case sensitive, no escaping of `%`/`_`,
        // and served by the unique index on `command`.
        let found = self
            .conn()?
            .query_row(
                "SELECT command FROM history
                 WHERE command BETWEEN ?1 AND ?2
                 ORDER BY last_used DESC, rowid
                 LIMIT 1 OFFSET ?3",
                params![prefix, range_end(prefix), skip],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found)
    }
}

fn range_end(prefix: &str) -> String {
    let mut end = String::with_capacity(prefix.len() + PREFIX_RANGE_END.len_utf8());
    end.push_str(prefix);
    end.push(PREFIX_RANGE_END);
    end
}

fn into_entry((command, micros, count): (String, i64, i64)) -> Result<HistoryEntry, HistoryError> {
    let last_used = DateTime::from_timestamp_micros(micros)
        .ok_or(HistoryError::BadTimestamp(micros))?;
    Ok(HistoryEntry { command, last_used, use_count: count as u64 })
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
