//! Multistatus response types.

use super::href::Href;
use super::property::DavProperty;

/// A multistatus response (RFC 4918 §13).
#[derive(Debug, Clone, Default)]
pub struct Multistatus {
    pub responses: Vec<PropstatResponse>,
    /// Emitted after the responses for `sync-collection` reports.
    pub sync_token: Option<String>,
}

impl Multistatus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_response(&mut self, response: PropstatResponse) {
        self.responses.push(response);
    }

    pub fn set_sync_token(&mut self, token: impl Into<String>) {
        self.sync_token = Some(token.into());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }
}

/// A single response within a multistatus.
///
/// Either carries `propstats`, or a bare `status` when the resource itself
/// is being reported on (a deleted member in a sync diff).
#[derive(Debug, Clone)]
pub struct PropstatResponse {
    pub href: Href,
    pub propstats: Vec<Propstat>,
    pub status: Option<Status>,
}

impl PropstatResponse {
    /// Creates a 200 OK response with properties.
    #[must_use]
    pub fn ok(href: impl Into<Href>, properties: Vec<DavProperty>) -> Self {
        Self {
            href: href.into(),
            propstats: vec![Propstat::new(Status::Ok, properties)],
            status: None,
        }
    }

    /// Creates a response with found and not-found properties; empty groups
    /// are omitted.
    #[must_use]
    pub fn with_found_and_not_found(
        href: impl Into<Href>,
        found: Vec<DavProperty>,
        not_found: Vec<DavProperty>,
    ) -> Self {
        let mut propstats = Vec::new();
        if !found.is_empty() {
            propstats.push(Propstat::new(Status::Ok, found));
        }
        if !not_found.is_empty() {
            propstats.push(Propstat::new(Status::NotFound, not_found));
        }
        Self {
            href: href.into(),
            propstats,
            status: None,
        }
    }

    /// Creates a 404 response without a prop block.
    #[must_use]
    pub fn gone(href: impl Into<Href>) -> Self {
        Self {
            href: href.into(),
            propstats: Vec::new(),
            status: Some(Status::NotFound),
        }
    }
}

/// Property status grouping.
#[derive(Debug, Clone)]
pub struct Propstat {
    pub status: Status,
    pub properties: Vec<DavProperty>,
}

impl Propstat {
    #[must_use]
    pub fn new(status: Status, properties: Vec<DavProperty>) -> Self {
        Self { status, properties }
    }
}

/// HTTP status inside a multistatus body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    NotFound,
}

impl Status {
    #[must_use]
    pub const fn code(self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::NotFound => 404,
        }
    }

    #[must_use]
    pub const fn reason_phrase(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::NotFound => "Not Found",
        }
    }

    #[must_use]
    pub fn status_line(self) -> String {
        format!("HTTP/1.1 {} {}", self.code(), self.reason_phrase())
    }
}
