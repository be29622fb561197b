// src/fragment.rs
//
// Clipboard HTML payloads (e.g. Windows CF_HTML) wrap the copied markup in a header and
// a document envelope. The real content sits between the two fragment comments.
// Missing either marker → the whole payload is the fragment.

use memchr::memmem;

pub const START_MARKER: &str = "<!--StartFragment-->";
pub const END_MARKER: &str = "<!--EndFragment-->";

/// The markup strictly between the fragment markers, or `raw` itself.
pub fn extract_fragment(raw: &str) -> &str {
    let start = memmem::find(raw.as_bytes(), START_MARKER.as_bytes());
    let end = memmem::find(raw.as_bytes(), END_MARKER.as_bytes());
    match (start, end) {
        (Some(s), Some(e)) => {
            let from = s + START_MARKER.len();
            // End marker before the start marker: nothing lies between them.
            if e >= from {
                &raw[from..e]
            } else {
                ""
            }
        }
        _ => raw,
    }
}
