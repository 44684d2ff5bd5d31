//! Text and parameter escaping.

/// Escapes a text value: backslash, newline, comma, semicolon. Carriage
/// returns are dropped.
#[must_use]
pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            ',' => out.push_str("\\,"),
            ';' => out.push_str("\\;"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out
}

/// Escapes one component of a structured value. Commas are left alone so
/// that list-valued components stay readable to 3.0 clients.
#[must_use]
pub(crate) fn escape_component(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            ';' => out.push_str("\\;"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out
}

/// Caret-encodes a parameter value (RFC 6868) and reports whether it must
/// be quoted.
#[must_use]
pub fn escape_param_value(s: &str) -> (String, bool) {
    let mut out = String::with_capacity(s.len());
    let mut needs_quotes = false;
    for c in s.chars() {
        match c {
            '^' => out.push_str("^^"),
            '\n' => out.push_str("^n"),
            '"' => out.push_str("^'"),
            ':' | ';' | ',' => {
                needs_quotes = true;
                out.push(c);
            }
            '\r' => {}
            _ => out.push(c),
        }
    }
    (out, needs_quotes)
}
