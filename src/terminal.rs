// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Terminal host: drives a [`Session`] from crossterm events and draws the
//! preedit on the current terminal line.

use std::io::{self, Write};

use anyhow::Context;
use crossterm::cursor::MoveToColumn;
use crossterm::event::{
    DisableFocusChange, EnableFocusChange, Event, EventStream, KeyCode, KeyEvent as TermKey,
    KeyEventKind, KeyModifiers,
};
use crossterm::style::{self, Print, SetAttribute};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, Clear, ClearType};
use crossterm::{execute, queue};
use futures::StreamExt;
use shin_core::keys::*;
use shin_core::{char_to_byte_index, AttributeKind, Flow, HostEvent, Preedit, Session, Surface};
use tracing::{debug, warn};
use unicode_width::UnicodeWidthStr;

/// Translate a terminal event into what the session understands.
///
/// Ctrl+C abandons the line the way a host reset does.  Keys with no keysym
/// equivalent are dropped.
pub fn translate(event: &Event) -> Option<HostEvent> {
    match event {
        Event::FocusGained => Some(HostEvent::FocusIn),
        Event::FocusLost => Some(HostEvent::FocusOut),
        Event::Key(key) => translate_key(key),
        _ => None,
    }
}

fn translate_key(key: &TermKey) -> Option<HostEvent> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        return (key.kind != KeyEventKind::Release).then_some(HostEvent::Reset);
    }

    let keyval = match key.code {
        KeyCode::Enter => KEY_RETURN,
        KeyCode::Esc => KEY_ESCAPE,
        KeyCode::Backspace => KEY_BACKSPACE,
        KeyCode::Delete => KEY_DELETE,
        KeyCode::Tab => KEY_TAB,
        KeyCode::Up => KEY_UP,
        KeyCode::Down => KEY_DOWN,
        KeyCode::Left => KEY_LEFT,
        KeyCode::Right => KEY_RIGHT,
        KeyCode::Home => KEY_HOME,
        KeyCode::End => KEY_END,
        KeyCode::PageUp => KEY_PAGE_UP,
        KeyCode::PageDown => KEY_PAGE_DOWN,
        KeyCode::Char(c) => keysym_for_char(c),
        _ => return None,
    };

    let mut state = 0;
    for (modifier, mask) in [
        (KeyModifiers::SHIFT, SHIFT_MASK),
        (KeyModifiers::CONTROL, CONTROL_MASK),
        (KeyModifiers::ALT, MOD1_MASK),
        (KeyModifiers::SUPER, SUPER_MASK),
    ] {
        if key.modifiers.contains(modifier) {
            state |= mask;
        }
    }
    if key.kind == KeyEventKind::Release {
        state |= RELEASE_MASK;
    }

    Some(HostEvent::Key(KeyEvent::new(keyval, 0, state)))
}

/// Draws the preedit after a prompt on the current line.
///
/// Committed text is held back until the terminal has left raw mode; see
/// [`TerminalSurface::take_commits`].
pub struct TerminalSurface<W: Write> {
    out: W,
    prompt: String,
    commits: Vec<String>,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, prompt: impl Into<String>) -> Self {
        Self { out, prompt: prompt.into(), commits: Vec::new() }
    }

    pub fn take_commits(&mut self) -> Vec<String> {
        std::mem::take(&mut self.commits)
    }

    fn draw(&mut self, preedit: &Preedit) -> io::Result<()> {
        queue!(self.out, MoveToColumn(0), Clear(ClearType::CurrentLine), Print(&self.prompt))?;

        let underlined = |i: usize| {
            preedit
                .attributes
                .iter()
                .any(|a| a.kind == AttributeKind::UnderlineSingle && (a.start..a.end).contains(&i))
        };
        let mut on = false;
        for (i, c) in preedit.text.chars().enumerate() {
            let want = underlined(i);
            if want != on {
                let attr = if want {
                    style::Attribute::Underlined
                } else {
                    style::Attribute::NoUnderline
                };
                queue!(self.out, SetAttribute(attr))?;
                on = want;
            }
            queue!(self.out, Print(c))?;
        }
        if on {
            queue!(self.out, SetAttribute(style::Attribute::NoUnderline))?;
        }

        let before_cursor = &preedit.text[..char_to_byte_index(&preedit.text, preedit.cursor)];
        let column = self.prompt.width() + before_cursor.width();
        queue!(self.out, MoveToColumn(u16::try_from(column).unwrap_or(u16::MAX)))?;
        self.out.flush()
    }

    #[cfg(test)]
    fn output(&self) -> &W {
        &self.out
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn update_preedit(&mut self, preedit: &Preedit) {
        if let Err(e) = self.draw(preedit) {
            warn!(error = %e, "failed to draw preedit");
        }
    }

    fn commit_text(&mut self, text: &str) {
        self.commits.push(text.to_string());
    }
}

/// Raw mode plus focus reporting for as long as the guard lives.
struct RawMode;

impl RawMode {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let guard = Self;
        execute!(io::stdout(), EnableFocusChange)?;
        Ok(guard)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = execute!(
            io::stdout(),
            DisableFocusChange,
            MoveToColumn(0),
            Clear(ClearType::CurrentLine)
        );
        let _ = disable_raw_mode();
    }
}

/// Feed terminal events to `session` until it asks to exit or input ends.
///
/// The terminal is back in cooked mode when this returns.
pub async fn run<W: Write>(session: &mut Session<TerminalSurface<W>>) -> anyhow::Result<()> {
    let _raw = RawMode::enter().context("failed to put terminal into raw mode")?;

    session.handle(HostEvent::Enable).await;
    let initial = Preedit::from_buffer(session.buffer());
    session.surface_mut().update_preedit(&initial);

    let mut events = EventStream::new();
    while let Some(event) = events.next().await {
        let event = event.context("failed to read terminal event")?;
        let Some(host_event) = translate(&event) else {
            debug!(?event, "ignoring terminal event");
            continue;
        };
        if session.handle(host_event).await == Flow::Exit {
            break;
        }
    }
    Ok(())
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
