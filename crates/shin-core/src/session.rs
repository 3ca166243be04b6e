// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use std::sync::Arc;
use std::time::{Duration, Instant};

use shin_exec::{format_output, Executor};
use shin_history::HistoryIndex;
use tracing::{debug, error, info, warn};

use crate::{EditCommand, KeyEvent, LineBuffer, Navigator, Preedit, Surface};

/// Events delivered by the host input-method layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// The composer was activated.
    Enable,
    FocusIn,
    FocusOut,
    /// The host asked to abandon whatever is being composed.
    Reset,
    Key(KeyEvent),
}

/// Whether the session keeps going after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// Composition is over; the host should schedule shutdown.
    Exit,
}

#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Focus-out events arriving this soon after `Enable` are ignored.
    pub focus_out_grace: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self { focus_out_grace: Duration::from_millis(250) }
    }
}

/// One composition session.
///
/// Owns the line being edited and the recall position, shares the history
/// store with any other live session, and reports every visible change to
/// its [`Surface`].  Events must be fed one at a time, in arrival order.
///
/// Recording a submitted line runs on tokio's blocking pool, so the session
/// must be driven from within a tokio runtime.  Recall lookups run inline:
/// they are short reads, and in WAL mode readers do not wait for writers.
pub struct Session<S: Surface> {
    buffer: LineBuffer,
    navigator: Navigator,
    history: Arc<dyn HistoryIndex>,
    executor: Arc<dyn Executor>,
    surface: S,
    options: SessionOptions,
    enabled_at: Option<Instant>,
}

impl<S: Surface> Session<S> {
    pub fn new(
        history: Arc<dyn HistoryIndex>,
        executor: Arc<dyn Executor>,
        surface: S,
        options: SessionOptions,
    ) -> Self {
        Self {
            buffer: LineBuffer::new(),
            navigator: Navigator::new(),
            history,
            executor,
            surface,
            options,
            enabled_at: None,
        }
    }

    pub fn buffer(&self) -> &LineBuffer {
        &self.buffer
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub async fn handle(&mut self, event: HostEvent) -> Flow {
        match event {
            HostEvent::Enable => {
                info!("session enabled");
                self.enabled_at = Some(Instant::now());
                Flow::Continue
            }
            HostEvent::FocusIn => Flow::Continue,
            HostEvent::FocusOut => {
                let within_grace = self
                    .enabled_at
                    .is_some_and(|t| t.elapsed() < self.options.focus_out_grace);
                if within_grace {
                    debug!("ignoring focus-out right after enable");
                    return Flow::Continue;
                }
                info!("focus lost, ending session");
                self.clear();
                Flow::Exit
            }
            HostEvent::Reset => {
                info!("reset by host, ending session");
                self.clear();
                Flow::Exit
            }
            HostEvent::Key(key) => self.handle_key(&key).await,
        }
    }

    pub async fn handle_key(&mut self, key: &KeyEvent) -> Flow {
        debug!(keyval = key.keyval, keycode = key.keycode, state = key.state, "key event");
        match EditCommand::decode(key) {
            Some(cmd) => self.apply(cmd).await,
            None => Flow::Continue,
        }
    }

    pub async fn apply(&mut self, cmd: EditCommand) -> Flow {
        if cmd.is_edit() {
            self.navigator.reset();
        }

        let changed = match cmd {
            EditCommand::InsertChar(c) => self.buffer.insert(c),
            EditCommand::MoveCursor(offset) => {
                self.buffer.move_by(offset);
                true
            }
            EditCommand::JumpWord(direction) => {
                self.buffer.move_to_boundary(direction);
                true
            }
            EditCommand::Home => {
                self.buffer.move_home();
                true
            }
            EditCommand::End => {
                self.buffer.move_end();
                true
            }
            EditCommand::DeleteBefore => self.buffer.delete_before(),
            EditCommand::DeleteAfter => self.buffer.delete_after(),
            EditCommand::RecallUp => self.navigator.up(&mut self.buffer, self.history.as_ref()),
            EditCommand::RecallDown => self.navigator.down(&mut self.buffer, self.history.as_ref()),
            EditCommand::Submit => return self.submit().await,
            EditCommand::Cancel => return self.cancel(),
        };

        if changed {
            self.render();
        }
        Flow::Continue
    }

    async fn submit(&mut self) -> Flow {
        let line = self.buffer.text().to_string();
        if line.is_empty() {
            info!("empty line submitted, ending session");
            self.clear();
            return Flow::Exit;
        }

        self.record(&line).await;

        let result = self.executor.execute(&line).await;
        self.clear();

        match result {
            Ok(out) => {
                if !out.success() {
                    info!(status = ?out.status, "command exited unsuccessfully");
                }
                self.surface.commit_text(&format_output(&out.output));
            }
            Err(e) => error!(error = %e, line = %line, "command could not be started"),
        }
        Flow::Exit
    }

    /// Store `line` in history on the blocking pool.
    ///
    /// A writer may wait up to the store's busy timeout for another session's
    /// lock, which must not stall the runtime.  Failures are logged only.
    async fn record(&self, line: &str) {
        let history = Arc::clone(&self.history);
        let line = line.to_string();
        match tokio::task::spawn_blocking(move || history.record(&line)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!(error = %e, "failed to record command in history"),
            Err(e) => warn!(error = %e, "history writer task failed"),
        }
    }

    /// Escape: leave recall if there is a typed prefix to go back to,
    /// otherwise give up on the line entirely.
    fn cancel(&mut self) -> Flow {
        if self.navigator.is_recalling() && !self.navigator.frozen_prefix().is_empty() {
            debug!(prefix = %self.navigator.frozen_prefix(), "recall cancelled");
            self.navigator.restore(&mut self.buffer);
            self.render();
            return Flow::Continue;
        }
        info!("composition cancelled");
        self.clear();
        Flow::Exit
    }

    fn clear(&mut self) {
        self.buffer.clear();
        self.navigator.reset();
        self.render();
    }

    fn render(&mut self) {
        let preedit = Preedit::from_buffer(&self.buffer);
        debug!(text = %preedit.text, cursor = preedit.cursor, visible = preedit.visible, "render");
        self.surface.update_preedit(&preedit);
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
