// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub exec: ExecConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Explicit path of the history database.  When unset the store lives in
    /// the platform data directory (`~/.local/share/shin/history.db` on Linux).
    pub path: Option<PathBuf>,
    /// How long a writer waits for a lock held by another session before
    /// SQLite gives up with `SQLITE_BUSY`.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

fn default_busy_timeout_ms() -> u64 {
    5_000
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            path: None,
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}

impl HistoryConfig {
    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecConfig {
    /// Shell used to run the composed line (invoked as `<shell> -c <line>`)
    #[serde(default = "default_shell")]
    pub shell: String,
    /// Command prefix placed in front of every submitted line, e.g. `"sudo"`.
    /// Overridden by the `SHIN_DEFAULT_COMMAND` environment variable.
    pub default_command: Option<String>,
    /// Directory prepended to `PATH` for the executed line.
    /// Defaults to `~/.config/shin/bin`.
    pub bin_dir: Option<PathBuf>,
}

fn default_shell() -> String {
    "bash".into()
}

impl Default for ExecConfig {
    fn default() -> Self {
        Self {
            shell: default_shell(),
            default_command: None,
            bin_dir: None,
        }
    }
}

impl ExecConfig {
    /// The configured bin directory, or `<config dir>/shin/bin`.
    pub fn resolved_bin_dir(&self) -> PathBuf {
        self.bin_dir.clone().unwrap_or_else(|| {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from(".config"))
                .join("shin")
                .join("bin")
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Delay between ending a session and terminating the process, giving
    /// in-flight host responses time to flush.
    #[serde(default = "default_exit_grace_ms")]
    pub exit_grace_ms: u64,
    /// A focus-out arriving sooner than this after activation is ignored.
    #[serde(default = "default_focus_out_grace_ms")]
    pub focus_out_grace_ms: u64,
    /// Prompt drawn in front of the line by the terminal host.
    #[serde(default = "default_prompt")]
    pub prompt: String,
}

fn default_exit_grace_ms() -> u64 {
    100
}

fn default_focus_out_grace_ms() -> u64 {
    250
}

fn default_prompt() -> String {
    "$ ".into()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            exit_grace_ms: default_exit_grace_ms(),
            focus_out_grace_ms: default_focus_out_grace_ms(),
            prompt: default_prompt(),
        }
    }
}

impl SessionConfig {
    pub fn exit_grace(&self) -> Duration {
        Duration::from_millis(self.exit_grace_ms)
    }

    pub fn focus_out_grace(&self) -> Duration {
        Duration::from_millis(self.focus_out_grace_ms)
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let cfg: Config = toml::from_str("").unwrap();
        assert_eq!(cfg.history.busy_timeout_ms, 5_000);
        assert!(cfg.history.path.is_none());
        assert_eq!(cfg.exec.shell, "bash");
        assert_eq!(cfg.session.exit_grace_ms, 100);
        assert_eq!(cfg.session.focus_out_grace_ms, 250);
        assert_eq!(cfg.session.prompt, "$ ");
    }

    #[test]
    fn partial_section_keeps_remaining_defaults() {
        let cfg: Config = toml::from_str("[session]\nexit_grace_ms = 10\n").unwrap();
        assert_eq!(cfg.session.exit_grace(), Duration::from_millis(10));
        assert_eq!(cfg.session.focus_out_grace(), Duration::from_millis(250));
    }

    #[test]
    fn explicit_bin_dir_wins_over_default() {
        let exec = ExecConfig {
            bin_dir: Some(PathBuf::from("/opt/shin/bin")),
            ..ExecConfig::default()
        };
        assert_eq!(exec.resolved_bin_dir(), PathBuf::from("/opt/shin/bin"));
    }

    #[test]
    fn default_bin_dir_ends_in_shin_bin() {
        let dir = ExecConfig::default().resolved_bin_dir();
        assert!(dir.ends_with("shin/bin"), "{}", dir.display());
    }
}
