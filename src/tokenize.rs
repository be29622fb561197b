// src/tokenize.rs
//
// Linear, total tokenizer for the markup a terminal "copy as HTML" produces.
//
// - A token is either a tag (`<` up to the NEXT `>`, no quote awareness) or a maximal
//   run of text containing no `<`.
// - A `<` with no `>` after it starts a text run that reaches end of input; the text is
//   copied through rather than dropped.
// - No nesting validation. Comments, doctypes and `<>` are just tags with odd names.
// - Everything scans bytes; slices are only cut at ASCII delimiters, so they stay valid
//   UTF-8.

use memchr::memchr;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token<'a> {
    Tag(Tag<'a>),
    Text(&'a str),
}

/// Lazy iterator over the tokens of a fragment, in document order.
#[derive(Clone, Debug)]
pub struct Tokens<'a> {
    src: &'a str,
    pos: usize,
}

pub fn tokenize(src: &str) -> Tokens<'_> {
    Tokens { src, pos: 0 }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        let rest = &self.src[self.pos..];
        let bytes = rest.as_bytes();
        if bytes.is_empty() {
            return None;
        }

        if bytes[0] == b'<' {
            if let Some(off) = memchr(b'>', &bytes[1..]) {
                let end = off + 2;
                self.pos += end;
                return Some(Token::Tag(Tag::parse(&rest[..end])));
            }
            // Unterminated: the remainder is text.
            self.pos = self.src.len();
            return Some(Token::Text(rest));
        }

        let end = memchr(b'<', bytes).unwrap_or(bytes.len());
        self.pos += end;
        Some(Token::Text(&rest[..end]))
    }
}

/* =============================== Tag parsing ============================= */

#[inline]
fn is_name_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b':'
}

#[inline]
fn is_ws(b: u8) -> bool {
    b == b' ' || b == b'\t' || b == b'\n' || b == b'\r' || b == b'\x0c'
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tag<'a> {
    raw: &'a str,
    name: &'a str,
    name_end: usize,
    is_end: bool,
    self_closing: bool,
}

impl<'a> Tag<'a> {
    /// Parse raw `<...>` text. Never fails; a tag with no readable name gets "".
    pub fn parse(raw: &'a str) -> Tag<'a> {
        let tag = raw.as_bytes();
        let n = tag.len();
        let mut i = n.min(1);

        let mut is_end = false;
        if i < n && tag[i] == b'/' {
            is_end = true;
            i += 1;
        }
        while i < n && is_ws(tag[i]) {
            i += 1;
        }
        let start = i;
        while i < n && is_name_char(tag[i]) {
            i += 1;
        }

        // self-closing? check before '>'
        let mut j = n.saturating_sub(1);
        while j > 0 && is_ws(tag[j - 1]) {
            j -= 1;
        }
        let self_closing = j >= 2 && tag[j - 1] == b'/';

        Tag {
            raw,
            name: &raw[start..i],
            name_end: i,
            is_end,
            self_closing,
        }
    }

    pub fn raw(&self) -> &'a str {
        self.raw
    }

    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    pub fn is_end(&self) -> bool {
        self.is_end
    }

    /// `<name ... />`: opens nothing that a later close would end.
    pub fn self_closing(&self) -> bool {
        self.self_closing
    }

    /// Value of attribute `name` (ASCII case-insensitive). Quoted values come back
    /// without their quotes; a bare attribute yields "".
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        let tag = self.raw.as_bytes();
        let len = if tag.last() == Some(&b'>') {
            tag.len() - 1
        } else {
            tag.len()
        };
        let mut i = self.name_end;

        while i < len {
            // skip whitespace and slashes
            while i < len && (is_ws(tag[i]) || tag[i] == b'/') {
                i += 1;
            }
            if i >= len {
                break;
            }

            if !is_name_char(tag[i]) {
                // Not a valid name start; advance to avoid infinite loops.
                i += 1;
                continue;
            }
            let name_start = i;
            while i < len && is_name_char(tag[i]) {
                i += 1;
            }
            let matched = self.raw[name_start..i].eq_ignore_ascii_case(name);

            while i < len && is_ws(tag[i]) {
                i += 1;
            }

            if i >= len || tag[i] != b'=' {
                if matched {
                    return Some("");
                }
                continue;
            }
            i += 1;
            while i < len && is_ws(tag[i]) {
                i += 1;
            }

            let (value_start, value_end);
            if i < len && (tag[i] == b'"' || tag[i] == b'\'') {
                let q = tag[i];
                i += 1;
                value_start = i;
                while i < len && tag[i] != q {
                    i += 1;
                }
                value_end = i;
                if i < len {
                    i += 1;
                }
            } else {
                value_start = i;
                while i < len && !is_ws(tag[i]) {
                    i += 1;
                }
                value_end = i;
            }

            if matched {
                return Some(&self.raw[value_start..value_end]);
            }
        }
        None
    }
}
