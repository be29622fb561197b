// src/convert.rs
//
// Markup fragment → escape-coded text.
//
// - <div> ... </div>   line container. Open is a no-op; close ends the line, UNLESS the
//                      visible text so far ends in a non-whitespace character. That is
//                      taken as a soft wrap from the export: no newline, and the trailing
//                      run of resets is retracted so the active style carries on into the
//                      next container.
// - <br>, <br/>, </br> one newline, never merged.
// - <span style=...>   style sequences on open, a reset on close. A self-closing
//                      <span .../> has no content and no close, so it emits nothing.
// - text               entity-decoded and copied verbatim.
// - any other tag      ignored.
// Trailing newlines are trimmed from the result.
//
// Style scopes are not kept on a stack: every close emits a reset, and a merge takes the
// resets back. For the single nesting level the export produces this is the same as
// leaving the innermost scope open across the boundary.

use crate::entities::decode_entities;
use crate::sgr::{last_visible_char, retract_trailing_resets, Sgr};
use crate::style::style_to_sgr;
use crate::tokenize::{tokenize, Tag, Token};
use std::fmt::Write as _;
use tracing::{debug, trace};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TagKind {
    Line,
    Break,
    Style,
    Other,
}

fn classify(tag: &Tag<'_>) -> TagKind {
    if tag.is_named("div") {
        TagKind::Line
    } else if tag.is_named("br") {
        TagKind::Break
    } else if tag.is_named("span") {
        TagKind::Style
    } else {
        TagKind::Other
    }
}

/// Convert a markup fragment to text with SGR escapes. Total over any input.
pub fn convert_to_ansi(fragment: &str) -> String {
    let mut conv = Converter::with_capacity(fragment.len());
    for token in tokenize(fragment) {
        conv.feed(token);
    }
    conv.finish()
}

/// Streaming state for one conversion. Feed tokens in document order, then `finish`.
#[derive(Debug, Default)]
pub struct Converter {
    out: String,
    merges: usize,
}

impl Converter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Converter {
            out: String::with_capacity(capacity),
            merges: 0,
        }
    }

    pub fn feed(&mut self, token: Token<'_>) {
        match token {
            Token::Text(text) => self.out.push_str(&decode_entities(text)),
            Token::Tag(tag) => self.tag(&tag),
        }
    }

    fn tag(&mut self, tag: &Tag<'_>) {
        match (classify(tag), tag.is_end()) {
            (TagKind::Line, true) => self.end_line(),
            (TagKind::Line, false) => {}
            (TagKind::Break, _) => self.out.push('\n'),
            (TagKind::Style, true) => self.push_sgr(Sgr::Reset),
            (TagKind::Style, false) if tag.self_closing() => {
                trace!(tag = tag.raw(), "ignoring self-closing span")
            }
            (TagKind::Style, false) => {
                if let Some(style) = tag.attr("style") {
                    for sgr in style_to_sgr(style) {
                        self.push_sgr(sgr);
                    }
                }
            }
            (TagKind::Other, _) => trace!(tag = tag.raw(), "ignoring tag"),
        }
    }

    fn end_line(&mut self) {
        if should_merge_with_next_line(&self.out) {
            retract_trailing_resets(&mut self.out);
            self.merges += 1;
        } else {
            self.out.push('\n');
        }
    }

    fn push_sgr(&mut self, sgr: Sgr) {
        write!(self.out, "{sgr}").ok();
    }

    pub fn finish(mut self) -> String {
        let kept = self.out.trim_end_matches('\n').len();
        self.out.truncate(kept);
        debug!(
            bytes = self.out.len(),
            merges = self.merges,
            "converted fragment"
        );
        self.out
    }
}

/// Whether `fragment` has the shape of a terminal export: `<div>` lines holding
/// `<span>` runs and `<br>`s, optionally inside a document envelope. Any other element
/// (paragraphs, links, lists, ...) means the markup came from somewhere else.
pub fn is_terminal_export(fragment: &str) -> bool {
    let mut lines = 0usize;
    for token in tokenize(fragment) {
        let Token::Tag(tag) = token else { continue };
        match classify(&tag) {
            TagKind::Line => lines += 1,
            TagKind::Break | TagKind::Style => {}
            TagKind::Other if is_envelope(&tag) => {}
            TagKind::Other => {
                debug!(tag = tag.raw(), "not a terminal export");
                return false;
            }
        }
    }
    lines > 0
}

// Comments and doctypes parse with an empty name.
fn is_envelope(tag: &Tag<'_>) -> bool {
    ["", "html", "head", "body", "meta"]
        .iter()
        .any(|name| tag.is_named(name))
}

/// A line whose visible text ends in non-whitespace is treated as soft-wrapped.
/// Empty visible text never merges.
pub fn should_merge_with_next_line(out: &str) -> bool {
    last_visible_char(out).is_some_and(|c| !c.is_whitespace())
}
