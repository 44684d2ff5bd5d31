//! Line unfolding and content line splitting.

use super::error::{ParseError, ParseErrorKind, ParseResult};
use crate::rfc::vcard::core::VCardParameter;

/// Unfolds a vCard document by removing line continuations.
///
/// A continuation is a line break (CRLF or bare LF) followed by a single
/// space or tab; both the break and that one whitespace character vanish.
#[must_use]
pub fn unfold(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        let is_break = match c {
            '\r' if chars.peek() == Some(&'\n') => {
                chars.next();
                true
            }
            '\n' => true,
            _ => false,
        };

        if !is_break {
            result.push(c);
        } else if matches!(chars.peek(), Some(' ' | '\t')) {
            chars.next();
        } else {
            result.push('\n');
        }
    }

    result
}

/// A content line split into group, name, parameters and raw value.
#[derive(Debug, Clone)]
pub struct ContentLine {
    pub group: Option<String>,
    /// Uppercase property name.
    pub name: String,
    pub params: Vec<VCardParameter>,
    /// Value text as written, still escaped.
    pub value: String,
}

/// Parses `[group.]name[;param[=value]]*:value`.
///
/// ## Errors
/// Returns an error when the colon separator is missing or the property
/// name contains characters outside `[A-Za-z0-9-]`.
pub fn parse_content_line(line: &str, line_num: usize) -> ParseResult<ContentLine> {
    let colon_pos = find_value_separator(line).ok_or_else(|| {
        ParseError::new(
            ParseErrorKind::InvalidPropertyName,
            line_num,
            "missing colon separator",
        )
    })?;

    let (name_params, value) = line.split_at(colon_pos);
    let value = &value[1..];

    let (group, name_params) = parse_group(name_params);

    let (name, params_str) = match name_params.split_once(';') {
        Some((name, params)) => (name, Some(params)),
        None => (name_params, None),
    };

    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(ParseError::new(
            ParseErrorKind::InvalidPropertyName,
            line_num,
            format!("invalid property name: {name}"),
        ));
    }

    let params = match params_str {
        Some(s) => parse_parameters(s, line_num)?,
        None => Vec::new(),
    };

    Ok(ContentLine {
        group: group.map(String::from),
        name: name.to_ascii_uppercase(),
        params,
        value: value.to_string(),
    })
}

/// First colon outside a quoted parameter value.
fn find_value_separator(line: &str) -> Option<usize> {
    let mut in_quotes = false;

    for (i, c) in line.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ':' if !in_quotes => return Some(i),
            _ => {}
        }
    }

    None
}

fn parse_group(s: &str) -> (Option<&str>, &str) {
    let head = s.split(';').next().unwrap_or(s);
    if let Some(dot_pos) = head.find('.') {
        let potential_group = &s[..dot_pos];
        if !potential_group.is_empty()
            && potential_group
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return (Some(potential_group), &s[dot_pos + 1..]);
        }
    }
    (None, s)
}

fn parse_parameters(s: &str, line_num: usize) -> ParseResult<Vec<VCardParameter>> {
    let mut params = Vec::new();
    let mut remaining = s;

    while !remaining.is_empty() {
        let (param, rest) = parse_single_parameter(remaining, line_num)?;
        if let Some(param) = param {
            params.push(param);
        }
        remaining = rest;
    }

    Ok(params)
}

/// Parses one parameter and returns the rest of the parameter string.
///
/// A bare token without `=` (3.0 style `TEL;CELL:`) becomes a `TYPE` value,
/// except `BASE64`/`B` which become `ENCODING`.
fn parse_single_parameter(
    s: &str,
    line_num: usize,
) -> ParseResult<(Option<VCardParameter>, &str)> {
    let bare_end = s.find(';').unwrap_or(s.len());
    let eq_pos = s.find('=').filter(|&pos| pos < bare_end);

    let Some(eq_pos) = eq_pos else {
        let token = s[..bare_end].trim();
        let rest = s.get(bare_end + 1..).unwrap_or("");
        if token.is_empty() {
            return Ok((None, rest));
        }
        let param = if token.eq_ignore_ascii_case("base64") || token.eq_ignore_ascii_case("b") {
            VCardParameter::new("ENCODING", token)
        } else {
            VCardParameter::type_param(token)
        };
        return Ok((Some(param), rest));
    };

    let name = s[..eq_pos].trim();
    if name.is_empty() {
        return Err(ParseError::new(
            ParseErrorKind::InvalidParameter,
            line_num,
            "empty parameter name",
        ));
    }

    let (values, remaining) = parse_param_values(&s[eq_pos + 1..]);
    Ok((Some(VCardParameter::multi(name, values)), remaining))
}

/// Parses comma-separated, possibly quoted, parameter values.
fn parse_param_values(s: &str) -> (Vec<String>, &str) {
    let mut values = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = s.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => values.push(std::mem::take(&mut current)),
            ';' if !in_quotes => {
                values.push(current);
                return (values, &s[i + 1..]);
            }
            // RFC 6868
            '^' => match chars.peek().map(|&(_, next)| next) {
                Some('n') => {
                    chars.next();
                    current.push('\n');
                }
                Some('\'') => {
                    chars.next();
                    current.push('"');
                }
                Some('^') => {
                    chars.next();
                    current.push('^');
                }
                _ => current.push('^'),
            },
            _ => current.push(c),
        }
    }

    values.push(current);
    (values, "")
}
