// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
mod output;
mod shell;

pub use output::format_output;
pub use shell::{ExecError, ExecOutput, Executor, ShellExecutor};
