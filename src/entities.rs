// src/entities.rs
//
// The handful of named entities a terminal HTML export actually uses.
// Decoding is a single left-to-right pass, so "&amp;lt;" becomes "&lt;". A chain of
// per-entity replacements would decode that text twice and yield "<"; this does not.
// Unknown or unterminated entities are copied through untouched.

use memchr::memchr;
use std::borrow::Cow;

const ENTITIES: &[(&str, char)] = &[
    ("&nbsp;", ' '),
    ("&amp;", '&'),
    ("&lt;", '<'),
    ("&gt;", '>'),
    ("&quot;", '"'),
    ("&apos;", '\''),
];

pub fn decode_entities(text: &str) -> Cow<'_, str> {
    let Some(first) = memchr(b'&', text.as_bytes()) else {
        return Cow::Borrowed(text);
    };

    let mut out = String::with_capacity(text.len());
    out.push_str(&text[..first]);
    let mut rest = &text[first..];

    while let Some(off) = memchr(b'&', rest.as_bytes()) {
        out.push_str(&rest[..off]);
        rest = &rest[off..];
        match ENTITIES.iter().find(|(name, _)| rest.starts_with(name)) {
            Some(&(name, ch)) => {
                out.push(ch);
                rest = &rest[name.len()..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_known_entities() {
        assert_eq!(
            decode_entities("a&nbsp;&amp;&lt;b&gt;&quot;c&quot;&apos;"),
            "a &<b>\"c\"'"
        );
    }

    #[test]
    fn entity_free_text_is_borrowed() {
        assert!(matches!(decode_entities("plain text"), Cow::Borrowed("plain text")));
    }

    #[test]
    fn single_pass() {
        assert_eq!(decode_entities("&amp;lt;"), "&lt;");
    }

    #[test]
    fn unknown_and_bare_ampersands_pass_through() {
        assert_eq!(decode_entities("&copy; & &amp"), "&copy; & &amp");
        assert_eq!(decode_entities("AT&T"), "AT&T");
        assert_eq!(decode_entities("&"), "&");
    }
}
