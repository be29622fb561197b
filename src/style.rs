// src/style.rs
//
// Inline `style` attribute → SGR sequences.
//
// Declarations are `property: value` pairs separated by ';'. Only the first ':' splits a
// pair. Keys are matched case-insensitively, values are trimmed. Recognized:
//   color, background-color  → nearest 16-colour fg/bg
//   font-weight              → bold for "bold" or a numeric weight >= 700
//   font-style               → italic for "italic"
//   text-decoration          → underline and/or strikethrough (independent checks)
// Everything else, and any pair with an empty key or value, is skipped.

use crate::palette::{nearest_ansi16, parse_color};
use crate::sgr::Sgr;
use tracing::trace;

/// SGR sequences for a style attribute, in declaration order.
pub fn style_to_sgr(style: &str) -> Vec<Sgr> {
    let mut out = Vec::new();
    for (prop, value) in declarations(style) {
        push_declaration(&prop, value, &mut out);
    }
    out
}

/// Iterate well-formed `(lowercased key, trimmed value)` pairs.
fn declarations(style: &str) -> impl Iterator<Item = (String, &str)> {
    style.split(';').filter_map(|decl| {
        let (prop, value) = decl.split_once(':')?;
        let (prop, value) = (prop.trim(), value.trim());
        if prop.is_empty() || value.is_empty() {
            return None;
        }
        Some((prop.to_ascii_lowercase(), value))
    })
}

fn push_declaration(prop: &str, value: &str, out: &mut Vec<Sgr>) {
    match prop {
        "color" => {
            if let Some(rgb) = parse_color(value) {
                out.push(Sgr::Fg(nearest_ansi16(rgb)));
            }
        }
        "background-color" => {
            if let Some(rgb) = parse_color(value) {
                out.push(Sgr::Bg(nearest_ansi16(rgb)));
            }
        }
        "font-weight" => {
            if is_bold(value) {
                out.push(Sgr::Bold);
            }
        }
        "font-style" => {
            if value.eq_ignore_ascii_case("italic") {
                out.push(Sgr::Italic);
            }
        }
        "text-decoration" => {
            let value = value.to_ascii_lowercase();
            if value.contains("underline") {
                out.push(Sgr::Underline);
            }
            if value.contains("line-through") {
                out.push(Sgr::Strikethrough);
            }
        }
        _ => trace!(prop, value, "ignoring style declaration"),
    }
}

/// "bold", or a weight whose leading digits are >= 700 ("700", "800px").
fn is_bold(value: &str) -> bool {
    if value.eq_ignore_ascii_case("bold") {
        return true;
    }
    let digits = value.bytes().take_while(u8::is_ascii_digit).count();
    value[..digits].parse::<u32>().is_ok_and(|w| w >= 700)
}
