//! Helpers for logging user-supplied text. Quest titles, display names and
//! guild names come straight from clients, so anything that reaches a log
//! line is flattened to a single line and capped in length first.

use std::fmt::Write;

use crate::validation::MAX_TITLE_LENGTH;

/// Render a user-supplied string safe for a single log line.
///
/// Newlines, carriage returns and tabs become their escaped forms and other
/// control characters are shown as `\xNN`. The preview is capped at
/// [`MAX_TITLE_LENGTH`] characters, the longest text a record can carry,
/// with an ellipsis marking anything cut off.
pub fn escape_log(s: &str) -> String {
    let mut out = String::with_capacity(s.len().min(MAX_TITLE_LENGTH));
    let mut chars = s.chars();
    for ch in chars.by_ref().take(MAX_TITLE_LENGTH) {
        match ch {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\\' => out.push_str("\\\\"),
            c if c.is_control() => {
                let _ = write!(out, "\\x{:02X}", c as u32);
            }
            c => out.push(c),
        }
    }
    if chars.next().is_some() {
        out.push('…');
    }
    out
}
