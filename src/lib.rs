// src/lib.rs
//
// ansicopy — terminal-selection HTML → ANSI escape-coded text
//
// Pipeline: raw clipboard payload → extract_fragment → convert_to_ansi → text with
// SGR sequences, ready to paste into another terminal or ANSI-aware viewer.
//
// The core (fragment, tokenize, entities, palette, style, sgr, convert) is pure and
// infallible: any string in, a string out. `clipboard` and `watch` are the glue used
// by the binary.

pub mod clipboard;
pub mod convert;
pub mod entities;
pub mod fragment;
pub mod palette;
pub mod sgr;
pub mod style;
pub mod tokenize;
pub mod watch;

pub use clipboard::{Clipboard, ClipboardError, MemoryClipboard, Ownership, SystemClipboard};
pub use convert::{convert_to_ansi, is_terminal_export, should_merge_with_next_line, Converter};
pub use entities::decode_entities;
pub use fragment::extract_fragment;
pub use palette::{nearest_ansi16, parse_color, Rgb, PALETTE};
pub use sgr::{strip_sgr, Sgr};
pub use style::style_to_sgr;
pub use tokenize::{tokenize, Tag, Token, Tokens};
pub use watch::{State, Tick, Watcher};

/// Full pipeline over a raw clipboard payload. `None` when there is nothing to
/// convert: the payload, or the fragment inside it, is empty or whitespace.
pub fn markup_to_ansi(raw: &str) -> Option<String> {
    if raw.trim().is_empty() {
        return None;
    }
    let fragment = extract_fragment(raw);
    if fragment.trim().is_empty() {
        return None;
    }
    Some(convert_to_ansi(fragment))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_payloads_short_circuit() {
        assert_eq!(markup_to_ansi(""), None);
        assert_eq!(markup_to_ansi(" \r\n\t"), None);
        assert_eq!(
            markup_to_ansi("<html><!--StartFragment-->  <!--EndFragment--></html>"),
            None
        );
    }

    #[test]
    fn runs_extract_then_convert() {
        assert_eq!(
            markup_to_ansi("<html><!--StartFragment--><div>a<br>b</div><!--EndFragment--></html>")
                .as_deref(),
            Some("a\nb")
        );
    }
}
