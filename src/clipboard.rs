// src/clipboard.rs
//
// The clipboard as a capability: markup in, plain text in/out. The converter never
// touches it; the watcher and the CLI do, through this trait, so tests can swap in a
// memory-backed clipboard.
//
// An empty clipboard (or one without the requested flavour) reads as "".
//
// On Linux (X11 and Wayland) the writing process owns what it put on the clipboard, and
// the contents vanish when it exits unless a clipboard manager copies them first. A
// short-lived writer therefore has to hold on until someone else takes over:
// `Ownership::HoldUntilReplaced`.

use thiserror::Error;
use tracing::{info, trace};

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("failed to open the system clipboard: {0}")]
    Open(#[source] arboard::Error),

    #[error("failed to read {flavor} from the clipboard: {source}")]
    Read {
        flavor: &'static str,
        #[source]
        source: arboard::Error,
    },

    #[error("failed to write text to the clipboard: {0}")]
    Write(#[source] arboard::Error),
}

pub trait Clipboard {
    /// Current selection as styled markup (HTML flavour).
    fn read_markup(&mut self) -> Result<String, ClipboardError>;

    /// Current plain-text contents.
    fn read_text(&mut self) -> Result<String, ClipboardError>;

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// What a write does once the text is on the clipboard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Ownership {
    /// Return immediately. Right for a long-running process.
    #[default]
    Release,
    /// On Linux, block until another application takes the clipboard over, so the text
    /// outlives this process. Same as `Release` elsewhere.
    HoldUntilReplaced,
}

impl Ownership {
    pub fn waits(self) -> bool {
        cfg!(target_os = "linux") && self == Ownership::HoldUntilReplaced
    }
}

/// The platform clipboard, via `arboard`.
pub struct SystemClipboard {
    inner: arboard::Clipboard,
    ownership: Ownership,
}

impl SystemClipboard {
    pub fn new() -> Result<Self, ClipboardError> {
        Self::with_ownership(Ownership::Release)
    }

    pub fn with_ownership(ownership: Ownership) -> Result<Self, ClipboardError> {
        let inner = arboard::Clipboard::new().map_err(ClipboardError::Open)?;
        Ok(SystemClipboard { inner, ownership })
    }

    #[cfg(target_os = "linux")]
    fn write_and_wait(&mut self, text: &str) -> Result<(), ClipboardError> {
        use arboard::SetExtLinux;

        self.inner
            .set()
            .wait()
            .text(text)
            .map_err(ClipboardError::Write)
    }

    #[cfg(not(target_os = "linux"))]
    fn write_and_wait(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.inner.set_text(text).map_err(ClipboardError::Write)
    }
}

fn empty_if_unavailable(
    flavor: &'static str,
    res: Result<String, arboard::Error>,
) -> Result<String, ClipboardError> {
    match res {
        Ok(s) => Ok(s),
        Err(arboard::Error::ContentNotAvailable) => {
            trace!(flavor, "clipboard has no content of this kind");
            Ok(String::new())
        }
        Err(source) => Err(ClipboardError::Read { flavor, source }),
    }
}

impl Clipboard for SystemClipboard {
    fn read_markup(&mut self) -> Result<String, ClipboardError> {
        empty_if_unavailable("html", self.inner.get().html())
    }

    fn read_text(&mut self) -> Result<String, ClipboardError> {
        empty_if_unavailable("text", self.inner.get_text())
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.ownership.waits() {
            info!("holding the clipboard until another application takes it over");
            return self.write_and_wait(text);
        }
        self.inner.set_text(text).map_err(ClipboardError::Write)
    }
}

/// In-memory clipboard. Writing text clears the markup flavour, as a real copy would.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryClipboard {
    pub markup: String,
    pub text: String,
    pub writes: usize,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate a terminal copy: markup plus its plain-text rendition.
    pub fn copy(&mut self, markup: &str, text: &str) {
        self.markup = markup.to_string();
        self.text = text.to_string();
    }
}

impl Clipboard for MemoryClipboard {
    fn read_markup(&mut self) -> Result<String, ClipboardError> {
        Ok(self.markup.clone())
    }

    fn read_text(&mut self) -> Result<String, ClipboardError> {
        Ok(self.text.clone())
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.markup.clear();
        self.text = text.to_string();
        self.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_held_writes_wait_and_only_on_linux() {
        assert_eq!(Ownership::default(), Ownership::Release);
        assert!(!Ownership::Release.waits());
        assert_eq!(
            Ownership::HoldUntilReplaced.waits(),
            cfg!(target_os = "linux")
        );
    }

    #[test]
    fn memory_clipboard_write_replaces_both_flavours() {
        let mut clip = MemoryClipboard::new();
        clip.copy("<div>x</div>", "x");
        assert_eq!(clip.read_markup().unwrap(), "<div>x</div>");
        assert_eq!(clip.read_text().unwrap(), "x");

        clip.write_text("y").unwrap();
        assert_eq!(clip.read_markup().unwrap(), "");
        assert_eq!(clip.read_text().unwrap(), "y");
        assert_eq!(clip.writes, 1);
    }
}
