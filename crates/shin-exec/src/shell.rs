// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("spawning {shell}: {source}")]
    Spawn {
        shell: String,
        #[source]
        source: std::io::Error,
    },
}

/// What a command that actually ran produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecOutput {
    /// stdout and stderr, interleaved in the order they were written.
    pub output: Vec<u8>,
    /// Exit code; `None` when the process was killed by a signal.
    pub status: Option<i32>,
}

impl ExecOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Runs a composed command line.
///
/// A non-zero exit is still `Ok`: the command ran and its output is worth
/// showing.  Only a failure to start the process is an error.
#[async_trait]
pub trait Executor: Send + Sync {
    async fn execute(&self, line: &str) -> Result<ExecOutput, ExecError>;
}

/// Executes lines through `<shell> -c`.
#[derive(Debug, Clone)]
pub struct ShellExecutor {
    pub shell: String,
    /// Prepended to `PATH` so user scripts can shadow system commands.
    pub bin_dir: Option<PathBuf>,
    /// Placed in front of every line, e.g. `"sudo"`.
    pub default_command: Option<String>,
}

impl Default for ShellExecutor {
    fn default() -> Self {
        Self::new("bash")
    }
}

impl ShellExecutor {
    pub fn new(shell: impl Into<String>) -> Self {
        Self { shell: shell.into(), bin_dir: None, default_command: None }
    }

    pub fn with_bin_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.bin_dir = Some(dir.into());
        self
    }

    pub fn with_default_command(mut self, cmd: Option<String>) -> Self {
        self.default_command = cmd.filter(|c| !c.trim().is_empty());
        self
    }

    /// The script handed to `<shell> -c` for `line`.
    ///
    /// The first statement folds stderr into stdout for the rest of the
    /// script, so the captured output keeps the order the program wrote it in.
    pub fn script(&self, line: &str) -> String {
        let mut script = String::from("exec 2>&1\n");
        if let Some(dir) = &self.bin_dir {
            script.push_str("PATH=\"");
            script.push_str(&escape_double_quoted(&dir.display().to_string()));
            script.push_str(":$PATH\" && ");
        }
        if let Some(cmd) = &self.default_command {
            script.push_str(cmd);
            script.push(' ');
        }
        script.push_str(line);
        script
    }
}

#[async_trait]
impl Executor for ShellExecutor {
    async fn execute(&self, line: &str) -> Result<ExecOutput, ExecError> {
        debug!(shell = %self.shell, line, "executing composed line");

        let mut cmd = Command::new(&self.shell);
        cmd.arg("-c").arg(self.script(line));
        // The composer owns the terminal or IME surface; the child gets no
        // stdin and, on Unix, no controlling terminal (setsid), so it cannot
        // read keystrokes or write escape sequences to /dev/tty.
        cmd.stdin(Stdio::null());
        cmd.kill_on_drop(true);
        #[cfg(unix)]
        unsafe {
            cmd.pre_exec(|| {
                libc::setsid();
                Ok(())
            });
        }

        let out = cmd.output().await.map_err(|source| ExecError::Spawn {
            shell: self.shell.clone(),
            source,
        })?;

        let mut output = out.stdout;
        // Only output the shell wrote before `exec 2>&1` ends up here.
        if !out.stderr.is_empty() {
            output.extend_from_slice(&out.stderr);
        }

        debug!(status = ?out.status.code(), bytes = output.len(), "command finished");
        Ok(ExecOutput { output, status: out.status.code() })
    }
}

fn escape_double_quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '"' | '\\' | '$' | '`') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
