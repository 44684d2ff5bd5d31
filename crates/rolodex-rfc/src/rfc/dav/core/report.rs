//! REPORT request types.

use super::href::Href;
use super::namespace::{QName, carddav_props};
use super::property::PropertyName;

/// The report types this server answers, keyed by root element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    SyncCollection,
    AddressbookMultiget,
    AddressbookQuery,
}

impl ReportKind {
    /// Maps a root element local name to a report kind.
    #[must_use]
    pub fn from_root(local_name: &str) -> Option<Self> {
        match local_name {
            "sync-collection" => Some(Self::SyncCollection),
            "addressbook-multiget" => Some(Self::AddressbookMultiget),
            "addressbook-query" => Some(Self::AddressbookQuery),
            _ => None,
        }
    }

    #[must_use]
    pub fn qname(self) -> QName {
        match self {
            Self::SyncCollection => QName::dav("sync-collection"),
            Self::AddressbookMultiget => carddav_props::addressbook_multiget(),
            Self::AddressbookQuery => carddav_props::addressbook_query(),
        }
    }
}

/// A fully decoded REPORT body.
#[derive(Debug, Clone)]
pub enum ReportRequest {
    SyncCollection(SyncCollection),
    AddressbookMultiget(AddressbookMultiget),
    AddressbookQuery(AddressbookQuery),
}

impl ReportRequest {
    #[must_use]
    pub fn kind(&self) -> ReportKind {
        match self {
            Self::SyncCollection(_) => ReportKind::SyncCollection,
            Self::AddressbookMultiget(_) => ReportKind::AddressbookMultiget,
            Self::AddressbookQuery(_) => ReportKind::AddressbookQuery,
        }
    }

    #[must_use]
    pub fn properties(&self) -> &[PropertyName] {
        match self {
            Self::SyncCollection(r) => &r.properties,
            Self::AddressbookMultiget(r) => &r.properties,
            Self::AddressbookQuery(r) => &r.properties,
        }
    }

    /// Whether the client asked for inline vCard bodies.
    #[must_use]
    pub fn wants_address_data(&self) -> bool {
        let address_data = carddav_props::address_data();
        self.properties().iter().any(|p| p.is(&address_data))
    }
}

/// `DAV:sync-collection` (RFC 6578).
#[derive(Debug, Clone)]
pub struct SyncCollection {
    /// Token text as sent; empty on initial sync.
    pub sync_token: String,
    pub sync_level: SyncLevel,
    pub properties: Vec<PropertyName>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncLevel {
    #[default]
    One,
    Infinity,
}

/// `CARDDAV:addressbook-multiget`.
#[derive(Debug, Clone)]
pub struct AddressbookMultiget {
    pub hrefs: Vec<Href>,
    pub properties: Vec<PropertyName>,
}

/// `CARDDAV:addressbook-query`.
///
/// The filter is accepted but never evaluated: every live contact matches.
/// `has_filter` only records whether one was present.
#[derive(Debug, Clone)]
pub struct AddressbookQuery {
    pub has_filter: bool,
    pub properties: Vec<PropertyName>,
}
