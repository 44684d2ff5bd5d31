//! PROPFIND request XML parsing.

use quick_xml::Reader;
use quick_xml::events::Event;

use super::error::{ParseError, ParseResult};
use super::xml::{Namespaces, local_name};
use crate::rfc::dav::core::{PropertyName, PropfindRequest};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    AllProp,
    PropName,
    Prop,
}

/// Parses a PROPFIND request body.
///
/// An empty body is an `allprop` request (RFC 4918 §9.1).
///
/// ## Errors
/// Returns an error if the XML is malformed or the root element is not
/// `propfind`.
#[tracing::instrument(skip(xml), fields(xml_len = xml.len()))]
pub fn parse_propfind(xml: &[u8]) -> ParseResult<PropfindRequest> {
    if xml.iter().all(u8::is_ascii_whitespace) {
        tracing::debug!("Empty PROPFIND body, treating as allprop");
        return Ok(PropfindRequest::allprop());
    }

    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut namespaces = Namespaces::default();
    let mut depth = 0usize;
    let mut seen_root = false;
    let mut mode: Option<Mode> = None;
    // Depth of the open `prop` or `include` container; its direct children are properties.
    let mut container: Option<usize> = None;
    let mut properties: Vec<PropertyName> = Vec::new();

    loop {
        let event = reader.read_event()?;
        let (e, is_empty) = match event {
            Event::Start(e) => (e, false),
            Event::Empty(e) => (e, true),
            Event::End(_) => {
                depth = depth.saturating_sub(1);
                if container == Some(depth) {
                    container = None;
                }
                continue;
            }
            Event::Eof => break,
            _ => continue,
        };

        namespaces.collect(&e)?;
        let name = local_name(&e)?;

        if !seen_root {
            if name != "propfind" {
                return Err(ParseError::unexpected_element(&name));
            }
            seen_root = true;
        } else if depth == 1 {
            match name.as_str() {
                "allprop" => mode = Some(Mode::AllProp),
                "propname" => mode = Some(Mode::PropName),
                "prop" => {
                    mode.get_or_insert(Mode::Prop);
                    container = Some(depth);
                }
                "include" => container = Some(depth),
                _ => {}
            }
        } else if container.is_some_and(|c| depth == c + 1) {
            properties.push(PropertyName::new(namespaces.resolve(&e)?));
        } else {
            // Nested content of a property element
        }

        if is_empty {
            if container == Some(depth) {
                container = None;
            }
        } else {
            depth += 1;
        }
    }

    if !seen_root {
        return Err(ParseError::missing_element("propfind"));
    }
    if depth != 0 {
        return Err(ParseError::xml("unexpected end of document"));
    }

    let request = match mode {
        Some(Mode::PropName) => PropfindRequest::PropName,
        Some(Mode::Prop) => PropfindRequest::Prop(properties),
        Some(Mode::AllProp) | None => PropfindRequest::AllProp {
            include: properties,
        },
    };
    tracing::debug!(?request, "Parsed PROPFIND body");

    Ok(request)
}
