//! vCard serializer.

use super::escape::escape_param_value;
use super::fold::fold_line;
use crate::rfc::vcard::core::{VCard, VCardParameter, VCardProperty};

/// Serializes a list of vCards into one document.
#[must_use]
pub fn serialize(cards: &[VCard]) -> String {
    cards.iter().map(serialize_single).collect()
}

/// Serializes one vCard with CRLF line endings and folded lines.
#[must_use]
pub fn serialize_single(card: &VCard) -> String {
    let mut out = String::new();
    out.push_str("BEGIN:VCARD\r\n");
    out.push_str("VERSION:");
    out.push_str(card.version.as_str());
    out.push_str("\r\n");

    for prop in &card.properties {
        out.push_str(&fold_line(&content_line(prop)));
        out.push_str("\r\n");
    }

    out.push_str("END:VCARD\r\n");
    out
}

fn content_line(prop: &VCardProperty) -> String {
    let mut line = String::new();
    if let Some(group) = &prop.group {
        line.push_str(group);
        line.push('.');
    }
    line.push_str(&prop.name);
    for param in &prop.params {
        line.push(';');
        write_param(&mut line, param);
    }
    line.push(':');
    line.push_str(&prop.value);
    line
}

fn write_param(line: &mut String, param: &VCardParameter) {
    line.push_str(&param.name);
    line.push('=');
    for (i, value) in param.values.iter().enumerate() {
        if i > 0 {
            line.push(',');
        }
        let (escaped, needs_quotes) = escape_param_value(value);
        if needs_quotes {
            line.push('"');
            line.push_str(&escaped);
            line.push('"');
        } else {
            line.push_str(&escaped);
        }
    }
}
