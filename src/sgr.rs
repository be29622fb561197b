// src/sgr.rs
//
// SGR ("Select Graphic Rendition") escape sequences: ESC '[' <params> 'm'.
//
// - `Sgr` is the typed form of every sequence the converter emits. Its `Display`
//   renders the raw escape, so it can be pushed straight into a `String`.
// - The visible-text helpers look through ANY sequence of the shape
//   ESC '[' [0-9;]* 'm', not only the ones we produced.

use memchr::memchr;
use std::borrow::Cow;
use std::fmt;

pub const ESC: u8 = 0x1b;

/// The rendered form of [`Sgr::Reset`].
pub const RESET: &str = "\x1b[0m";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sgr {
    Reset,
    Bold,
    Italic,
    Underline,
    Strikethrough,
    /// Foreground colour, palette index 0..=15.
    Fg(u8),
    /// Background colour, palette index 0..=15.
    Bg(u8),
}

impl Sgr {
    /// The numeric SGR parameter.
    pub fn code(self) -> u8 {
        match self {
            Sgr::Reset => 0,
            Sgr::Bold => 1,
            Sgr::Italic => 3,
            Sgr::Underline => 4,
            Sgr::Strikethrough => 9,
            Sgr::Fg(index) => palette_code(index, 30, 90),
            Sgr::Bg(index) => palette_code(index, 40, 100),
        }
    }
}

// 0..=7 map onto the standard range, 8..=15 onto the bright range.
#[inline]
fn palette_code(index: u8, base: u8, bright_base: u8) -> u8 {
    let index = index & 0x0f;
    if index < 8 {
        base + index
    } else {
        bright_base + (index - 8)
    }
}

impl fmt::Display for Sgr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\x1b[{}m", self.code())
    }
}

/* ========================= Visible-text helpers ========================= */

#[inline]
fn is_param_byte(b: u8) -> bool {
    b.is_ascii_digit() || b == b';'
}

/// Byte length of the SGR sequence starting at `s[0]`, if one starts there.
fn sgr_len_at(s: &[u8]) -> Option<usize> {
    if s.len() < 3 || s[0] != ESC || s[1] != b'[' {
        return None;
    }
    let mut i = 2;
    while i < s.len() && is_param_byte(s[i]) {
        i += 1;
    }
    (i < s.len() && s[i] == b'm').then_some(i + 1)
}

/// Byte length of the SGR sequence `s` ends with, if any.
fn sgr_suffix_len(s: &[u8]) -> Option<usize> {
    let n = s.len();
    if n < 3 || s[n - 1] != b'm' {
        return None;
    }
    let mut j = n - 1;
    while j > 0 && is_param_byte(s[j - 1]) {
        j -= 1;
    }
    (j >= 2 && s[j - 1] == b'[' && s[j - 2] == ESC).then_some(n - (j - 2))
}

/// Remove every SGR sequence, leaving the visible text.
pub fn strip_sgr(s: &str) -> Cow<'_, str> {
    let bytes = s.as_bytes();
    let Some(first) = memchr(ESC, bytes) else {
        return Cow::Borrowed(s);
    };

    let mut out = String::with_capacity(s.len());
    let mut copied = 0usize;
    let mut i = first;
    while i < bytes.len() {
        let Some(off) = memchr(ESC, &bytes[i..]) else {
            break;
        };
        let at = i + off;
        match sgr_len_at(&bytes[at..]) {
            Some(len) => {
                out.push_str(&s[copied..at]);
                copied = at + len;
                i = copied;
            }
            None => i = at + 1,
        }
    }
    out.push_str(&s[copied..]);
    Cow::Owned(out)
}

/// Last character of `s` once SGR sequences are ignored.
pub fn last_visible_char(s: &str) -> Option<char> {
    let mut end = s.len();
    while let Some(len) = sgr_suffix_len(&s.as_bytes()[..end]) {
        end -= len;
    }
    // `end` always lands on the ESC byte of a sequence, which is a char boundary.
    s[..end].chars().next_back()
}

/// Drop a trailing run of one or more resets from `out`. Returns how many went.
pub fn retract_trailing_resets(out: &mut String) -> usize {
    let mut removed = 0;
    while out.ends_with(RESET) {
        out.truncate(out.len() - RESET.len());
        removed += 1;
    }
    removed
}
