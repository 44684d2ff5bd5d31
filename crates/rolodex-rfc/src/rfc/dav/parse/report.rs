//! REPORT request XML parsing.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::error::{ParseError, ParseResult};
use super::xml::{Namespaces, local_name};
use crate::rfc::dav::core::{
    AddressbookMultiget, AddressbookQuery, Href, PropertyName, ReportKind, ReportRequest,
    SyncCollection, SyncLevel,
};

/// Reads only as far as the root element and maps its local name to a
/// report kind.
///
/// Returns `Ok(None)` for a well-formed root naming a report this server
/// does not implement.
///
/// ## Errors
/// Returns an error if the document is malformed before the root element
/// or has no root element at all.
pub fn peek_report_kind(xml: &[u8]) -> ParseResult<Option<ReportKind>> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) => {
                let name = local_name(&e)?;
                let kind = ReportKind::from_root(&name);
                tracing::debug!(root = %name, ?kind, "Peeked REPORT root element");
                return Ok(kind);
            }
            Event::Eof => return Err(ParseError::missing_element("report root element")),
            _ => {}
        }
    }
}

/// Parses a REPORT request body into the matching report shape.
///
/// ## Errors
/// Returns an error if the XML is malformed or the root element is not one
/// of the supported reports.
#[tracing::instrument(skip(xml), fields(xml_len = xml.len()))]
pub fn parse_report(xml: &[u8]) -> ParseResult<ReportRequest> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut body = ReportBody::default();
    let mut depth = 0usize;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                body.open(&e, depth)?;
                depth += 1;
            }
            Event::Empty(e) => {
                body.open(&e, depth)?;
                body.close(depth);
            }
            Event::Text(t) => {
                if body.capture.is_some() {
                    body.text.push_str(&reader.decoder().decode(t.as_ref())?);
                }
            }
            Event::End(_) => {
                depth = depth.saturating_sub(1);
                body.close(depth);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if depth != 0 {
        return Err(ParseError::xml("unexpected end of document"));
    }

    body.finish()
}

/// Text-bearing children of the report root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Capture {
    Href,
    SyncToken,
    SyncLevel,
}

/// Accumulates the parts of a report body as events stream past.
#[derive(Default)]
struct ReportBody {
    namespaces: Namespaces,
    kind: Option<ReportKind>,
    properties: Vec<PropertyName>,
    hrefs: Vec<Href>,
    sync_token: String,
    sync_level: SyncLevel,
    has_filter: bool,
    /// Depth of the open `prop` element.
    prop_depth: Option<usize>,
    capture: Option<Capture>,
    text: String,
}

impl ReportBody {
    fn open(&mut self, e: &BytesStart<'_>, depth: usize) -> ParseResult<()> {
        self.namespaces.collect(e)?;
        let name = local_name(e)?;

        if depth == 0 {
            let kind =
                ReportKind::from_root(&name).ok_or_else(|| ParseError::unexpected_element(&name))?;
            self.kind = Some(kind);
            return Ok(());
        }

        if let Some(prop_depth) = self.prop_depth {
            if depth == prop_depth + 1 {
                self.properties
                    .push(PropertyName::new(self.namespaces.resolve(e)?));
            }
            return Ok(());
        }

        if depth == 1 {
            match name.as_str() {
                "prop" => self.prop_depth = Some(depth),
                "href" => self.start_capture(Capture::Href),
                "sync-token" => self.start_capture(Capture::SyncToken),
                "sync-level" => self.start_capture(Capture::SyncLevel),
                "filter" => self.has_filter = true,
                _ => {}
            }
        }
        Ok(())
    }

    fn start_capture(&mut self, capture: Capture) {
        self.capture = Some(capture);
        self.text.clear();
    }

    /// Handles the end of the element opened at `depth`.
    fn close(&mut self, depth: usize) {
        if self.prop_depth == Some(depth) {
            self.prop_depth = None;
        }
        if depth != 1 {
            return;
        }
        let text = self.text.trim();
        match self.capture.take() {
            Some(Capture::Href) if !text.is_empty() => self.hrefs.push(Href::new(text)),
            Some(Capture::SyncToken) => self.sync_token = text.to_string(),
            Some(Capture::SyncLevel) => {
                self.sync_level = if text.eq_ignore_ascii_case("infinity") {
                    SyncLevel::Infinity
                } else {
                    SyncLevel::One
                };
            }
            _ => {}
        }
        self.text.clear();
    }

    fn finish(self) -> ParseResult<ReportRequest> {
        let request = match self.kind {
            Some(ReportKind::SyncCollection) => ReportRequest::SyncCollection(SyncCollection {
                sync_token: self.sync_token,
                sync_level: self.sync_level,
                properties: self.properties,
            }),
            Some(ReportKind::AddressbookMultiget) => {
                ReportRequest::AddressbookMultiget(AddressbookMultiget {
                    hrefs: self.hrefs,
                    properties: self.properties,
                })
            }
            Some(ReportKind::AddressbookQuery) => {
                ReportRequest::AddressbookQuery(AddressbookQuery {
                    has_filter: self.has_filter,
                    properties: self.properties,
                })
            }
            None => return Err(ParseError::missing_element("report root element")),
        };
        Ok(request)
    }
}
