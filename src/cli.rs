// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "shin",
    about = "Compose a shell command on one line, run it, and insert its output",
    version,
    long_about = None,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config file (overrides auto-discovery)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// History database to use instead of the configured one
    #[arg(long, value_name = "PATH", env = "SHIN_HISTORY")]
    pub history: Option<PathBuf>,

    /// Increase verbosity (-v = debug, -vv = trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate shell completion script
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
    /// Print the effective configuration and exit
    ShowConfig,
    /// List the most recently used commands, newest first
    History {
        /// Only show commands starting with this text
        #[arg(value_name = "PREFIX", default_value = "")]
        prefix: String,
        /// Maximum number of commands to show
        #[arg(long, short = 'n', default_value = "20")]
        limit: usize,
    },
}

pub fn print_completions(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "shin", &mut std::io::stdout());
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn verbosity_counts_flags() {
        let cli = Cli::try_parse_from(["shin", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(cli.command.is_none());
    }

    #[test]
    fn history_subcommand_defaults() {
        let cli = Cli::try_parse_from(["shin", "history"]).unwrap();
        match cli.command {
            Some(Commands::History { prefix, limit }) => {
                assert_eq!(prefix, "");
                assert_eq!(limit, 20);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn history_subcommand_with_prefix_and_limit() {
        let cli = Cli::try_parse_from(["shin", "history", "git", "-n", "5"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::History { ref prefix, limit: 5 }) if prefix == "git"
        ));
    }

    #[test]
    fn global_options_parse() {
        let args = ["shin", "-c", "/tmp/shin.toml", "--history", "/tmp/h.db"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/shin.toml")));
        assert_eq!(cli.history, Some(PathBuf::from("/tmp/h.db")));
    }
}
