// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
mod cli;
mod shutdown;
mod terminal;

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};
use shin_config::Config;
use shin_core::{Session, SessionOptions};
use shin_exec::ShellExecutor;
use shin_history::HistoryStore;
use shutdown::ExitTimer;
use terminal::TerminalSurface;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    // Handle subcommands first
    if let Some(cmd) = &cli.command {
        match cmd {
            Commands::Completions { shell } => {
                cli::print_completions(*shell);
                return Ok(());
            }
            Commands::ShowConfig => {
                let config = shin_config::load(cli.config.as_deref())?;
                print!("{}", toml::to_string_pretty(&config).context("serializing configuration")?);
                return Ok(());
            }
            Commands::History { prefix, limit } => {
                let config = shin_config::load(cli.config.as_deref())?;
                let store = open_history(&cli, &config)?;
                return print_history(&store, prefix, *limit);
            }
        }
    }

    let config = shin_config::load(cli.config.as_deref())?;
    // Without history there is no session: fail before touching the terminal.
    let store = open_history(&cli, &config)?;
    let executor = build_executor(&config);

    let surface = TerminalSurface::new(io::stdout(), config.session.prompt.clone());
    let options = SessionOptions { focus_out_grace: config.session.focus_out_grace() };
    let mut session = Session::new(Arc::new(store), Arc::new(executor), surface, options);

    terminal::run(&mut session).await?;

    let commits = session.surface_mut().take_commits();
    drop(session);
    // Output goes out before the grace starts.
    print_commits(&commits)?;

    ExitTimer::schedule(config.session.exit_grace()).wait().await;
    Ok(())
}

fn print_commits(commits: &[String]) -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();
    for text in commits {
        writeln!(stdout, "{text}").context("writing command output")?;
    }
    stdout.flush().context("flushing command output")?;
    Ok(())
}

fn history_path(cli: &Cli, config: &Config) -> PathBuf {
    cli.history
        .clone()
        .or_else(|| config.history.path.clone())
        .unwrap_or_else(shin_history::default_path)
}

fn open_history(cli: &Cli, config: &Config) -> anyhow::Result<HistoryStore> {
    let path = history_path(cli, config);
    info!(path = %path.display(), "opening history");
    HistoryStore::open(&path, config.history.busy_timeout())
        .with_context(|| format!("cannot open history store at {}", path.display()))
}

fn build_executor(config: &Config) -> ShellExecutor {
    ShellExecutor::new(config.exec.shell.clone())
        .with_bin_dir(config.exec.resolved_bin_dir())
        .with_default_command(config.exec.default_command.clone())
}

/// List recent commands for `prefix`, newest first.
fn print_history(store: &HistoryStore, prefix: &str, limit: usize) -> anyhow::Result<()> {
    let entries = store.recent(prefix, limit).context("reading history")?;
    if entries.is_empty() {
        println!("No matching commands.");
        return Ok(());
    }
    for e in &entries {
        println!(
            "{}  {:>5}  {}",
            e.last_used.format("%Y-%m-%d %H:%M:%S"),
            e.use_count,
            e.command
        );
    }
    Ok(())
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
