// src/watch.rs
//
// Auto-copy: watch the clipboard and upgrade every new terminal copy to escape-coded text.
//
// States: Idle | Watching. One transition, `tick`, meant to be driven by a poll loop.
// Feedback guard: the text we wrote last is remembered, and seeing it again on the
// clipboard is recorded as "seen" without converting. No locks; the caller owns the
// watcher and drives it from one place.
// Only terminal exports are converted (see `is_terminal_export`); HTML copied from a
// browser or editor is left alone.

use crate::clipboard::{Clipboard, ClipboardError};
use crate::convert::is_terminal_export;
use crate::fragment::extract_fragment;
use crate::markup_to_ansi;
use tracing::{debug, info};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum State {
    #[default]
    Idle,
    Watching,
}

/// What one `tick` did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tick {
    /// Not watching; the clipboard was not touched.
    Idle,
    /// Clipboard empty or unchanged since the last tick.
    Unchanged,
    /// The clipboard holds what we wrote ourselves.
    OwnWrite,
    /// New content, but no markup worth converting.
    NothingToConvert,
    /// New content converted and written back.
    Converted(String),
}

#[derive(Clone, Debug, Default)]
pub struct Watcher {
    state: State,
    last_seen: String,
    last_written: String,
}

impl Watcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn is_watching(&self) -> bool {
        self.state == State::Watching
    }

    pub fn start(&mut self) {
        if self.state == State::Idle {
            info!("auto-copy on");
        }
        self.state = State::Watching;
    }

    pub fn stop(&mut self) {
        if self.state == State::Watching {
            info!("auto-copy off");
        }
        self.state = State::Idle;
    }

    /// Flip the state; returns the new one.
    pub fn toggle(&mut self) -> State {
        match self.state {
            State::Idle => self.start(),
            State::Watching => self.stop(),
        }
        self.state
    }

    /// One poll step.
    pub fn tick<C: Clipboard + ?Sized>(
        &mut self,
        clipboard: &mut C,
    ) -> Result<Tick, ClipboardError> {
        if self.state == State::Idle {
            return Ok(Tick::Idle);
        }

        let text = clipboard.read_text()?;
        if text.is_empty() || text == self.last_seen {
            return Ok(Tick::Unchanged);
        }
        if text == self.last_written {
            debug!("clipboard holds our own output");
            self.last_seen = text;
            return Ok(Tick::OwnWrite);
        }
        self.last_seen = text;

        Ok(match self.copy_once(clipboard)? {
            Some(ansi) => Tick::Converted(ansi),
            None => Tick::NothingToConvert,
        })
    }

    /// Read markup, convert it, write the result back. Works whether or not we are
    /// watching. `None` when the clipboard held nothing to convert, or markup that did
    /// not come from a terminal.
    pub fn copy_once<C: Clipboard + ?Sized>(
        &mut self,
        clipboard: &mut C,
    ) -> Result<Option<String>, ClipboardError> {
        let raw = clipboard.read_markup()?;
        if !is_terminal_export(extract_fragment(&raw)) {
            debug!("clipboard markup is not a terminal export");
            return Ok(None);
        }
        let Some(ansi) = markup_to_ansi(&raw) else {
            debug!("no markup on the clipboard");
            return Ok(None);
        };

        clipboard.write_text(&ansi)?;
        debug!(bytes = ansi.len(), "wrote escape-coded text");
        self.last_written.clone_from(&ansi);
        self.last_seen.clone_from(&ansi);
        Ok(Some(ansi))
    }
}
