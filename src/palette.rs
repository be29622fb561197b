// src/palette.rs
//
// Colour values → 16-colour terminal palette.
//
// - Accepted colour syntax: #RRGGBB, #RGB, rgb(r, g, b), rgba(r, g, b, a) (alpha ignored),
//   and the 16 CSS basic colour keywords. Anything else is "no colour".
// - Quantization picks the nearest reference colour by squared Euclidean distance in
//   RGB space; ties go to the lowest index.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    fn distance_sq(self, other: Rgb) -> u32 {
        let d = |a: u8, b: u8| {
            let x = i32::from(a) - i32::from(b);
            (x * x) as u32
        };
        d(self.r, other.r) + d(self.g, other.g) + d(self.b, other.b)
    }
}

/// Reference palette: 0..=7 standard, 8..=15 bright (VS Code terminal defaults,
/// bright white from xterm).
pub const PALETTE: [Rgb; 16] = [
    Rgb::new(0x00, 0x00, 0x00), // black
    Rgb::new(0xcd, 0x31, 0x31), // red
    Rgb::new(0x0d, 0xbc, 0x79), // green
    Rgb::new(0xe5, 0xe5, 0x10), // yellow
    Rgb::new(0x24, 0x72, 0xc8), // blue
    Rgb::new(0xbc, 0x3f, 0xbc), // magenta
    Rgb::new(0x11, 0xa8, 0xcd), // cyan
    Rgb::new(0xe5, 0xe5, 0xe5), // white
    Rgb::new(0x66, 0x66, 0x66), // bright black
    Rgb::new(0xf1, 0x4c, 0x4c), // bright red
    Rgb::new(0x23, 0xd1, 0x8b), // bright green
    Rgb::new(0xf5, 0xf5, 0x43), // bright yellow
    Rgb::new(0x3b, 0x8e, 0xea), // bright blue
    Rgb::new(0xd6, 0x70, 0xd6), // bright magenta
    Rgb::new(0x29, 0xb8, 0xdb), // bright cyan
    Rgb::new(0xff, 0xff, 0xff), // bright white
];

/// Index (0..=15) of the palette entry closest to `rgb`.
pub fn nearest_ansi16(rgb: Rgb) -> u8 {
    let mut best = 0usize;
    let mut best_dist = u32::MAX;
    for (i, &candidate) in PALETTE.iter().enumerate() {
        let dist = rgb.distance_sq(candidate);
        if dist < best_dist {
            best_dist = dist;
            best = i;
        }
    }
    best as u8
}

/* ============================= Colour parsing ============================ */

/// Resolve a CSS colour value. `None` means "apply no colour".
pub fn parse_color(value: &str) -> Option<Rgb> {
    let value = value.trim();
    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex(hex);
    }

    let lower = value.to_ascii_lowercase();
    if let Some(args) = function_args(&lower, "rgba") {
        return parse_components(args, 3..=4);
    }
    if let Some(args) = function_args(&lower, "rgb") {
        return parse_components(args, 3..=3);
    }
    named_color(&lower)
}

fn parse_hex(hex: &str) -> Option<Rgb> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        6 => Some(Rgb::new(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        3 => {
            // Each nibble is doubled: #abc == #aabbcc.
            let nibble = |i: usize| channel(&hex[i..=i]).map(|v| v * 0x11);
            Some(Rgb::new(nibble(0)?, nibble(1)?, nibble(2)?))
        }
        _ => None,
    }
}

/// `name(...)` → the text between the parentheses.
fn function_args<'a>(value: &'a str, name: &str) -> Option<&'a str> {
    value
        .strip_prefix(name)?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')
}

fn parse_components(args: &str, arity: std::ops::RangeInclusive<usize>) -> Option<Rgb> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    if !arity.contains(&parts.len()) {
        return None;
    }
    // Only the first three matter; alpha is not even validated.
    let channel = |s: &str| -> Option<u8> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        // All-digit strings only fail to parse on overflow, which clamps too.
        Some(s.parse::<u32>().unwrap_or(u32::MAX).min(255) as u8)
    };
    Some(Rgb::new(
        channel(parts[0])?,
        channel(parts[1])?,
        channel(parts[2])?,
    ))
}

fn named_color(name: &str) -> Option<Rgb> {
    let rgb = match name {
        "black" => Rgb::new(0x00, 0x00, 0x00),
        "silver" => Rgb::new(0xc0, 0xc0, 0xc0),
        "gray" | "grey" => Rgb::new(0x80, 0x80, 0x80),
        "white" => Rgb::new(0xff, 0xff, 0xff),
        "maroon" => Rgb::new(0x80, 0x00, 0x00),
        "red" => Rgb::new(0xff, 0x00, 0x00),
        "purple" => Rgb::new(0x80, 0x00, 0x80),
        "fuchsia" | "magenta" => Rgb::new(0xff, 0x00, 0xff),
        "green" => Rgb::new(0x00, 0x80, 0x00),
        "lime" => Rgb::new(0x00, 0xff, 0x00),
        "olive" => Rgb::new(0x80, 0x80, 0x00),
        "yellow" => Rgb::new(0xff, 0xff, 0x00),
        "navy" => Rgb::new(0x00, 0x00, 0x80),
        "blue" => Rgb::new(0x00, 0x00, 0xff),
        "teal" => Rgb::new(0x00, 0x80, 0x80),
        "aqua" | "cyan" => Rgb::new(0x00, 0xff, 0xff),
        _ => return None,
    };
    Some(rgb)
}
