//! DAV property types.

use super::namespace::QName;

/// A requested property name (without value).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyName(pub QName);

impl PropertyName {
    #[must_use]
    pub fn new(qname: QName) -> Self {
        Self(qname)
    }

    #[must_use]
    pub fn qname(&self) -> &QName {
        &self.0
    }

    #[must_use]
    pub fn namespace(&self) -> &str {
        self.0.namespace_uri()
    }

    #[must_use]
    pub fn local_name(&self) -> &str {
        self.0.local_name()
    }

    /// Whether this names `qname`.
    #[must_use]
    pub fn is(&self, qname: &QName) -> bool {
        &self.0 == qname
    }
}

impl From<QName> for PropertyName {
    fn from(qname: QName) -> Self {
        Self(qname)
    }
}

/// A DAV property with name and optional value.
#[derive(Debug, Clone)]
pub struct DavProperty {
    pub name: QName,
    /// `None` renders an empty element, as used in 404 propstats.
    pub value: Option<PropertyValue>,
}

impl DavProperty {
    #[must_use]
    pub fn not_found(name: QName) -> Self {
        Self { name, value: None }
    }

    #[must_use]
    pub fn text(name: QName, value: impl Into<String>) -> Self {
        Self {
            name,
            value: Some(PropertyValue::Text(value.into())),
        }
    }

    #[must_use]
    pub fn href(name: QName, href: impl Into<String>) -> Self {
        Self {
            name,
            value: Some(PropertyValue::Href(href.into())),
        }
    }

    #[must_use]
    pub fn integer(name: QName, value: i64) -> Self {
        Self {
            name,
            value: Some(PropertyValue::Integer(value)),
        }
    }

    /// `DAV:resourcetype` listing the given types.
    #[must_use]
    pub fn resourcetype(types: Vec<QName>) -> Self {
        Self {
            name: QName::dav("resourcetype"),
            value: Some(PropertyValue::ResourceType(types)),
        }
    }

    /// `DAV:supported-report-set` listing the given reports.
    #[must_use]
    pub fn supported_reports(reports: Vec<QName>) -> Self {
        Self {
            name: QName::dav("supported-report-set"),
            value: Some(PropertyValue::SupportedReports(reports)),
        }
    }

    /// `DAV:getetag`, quoting the opaque tag.
    #[must_use]
    pub fn etag(etag: &str) -> Self {
        Self::text(QName::dav("getetag"), format!("\"{etag}\""))
    }

    /// `CARDDAV:address-data` carrying a serialized vCard.
    #[must_use]
    pub fn address_data(vcard: impl Into<String>) -> Self {
        Self {
            name: QName::carddav("address-data"),
            value: Some(PropertyValue::ContentData(vcard.into())),
        }
    }
}

/// A property value.
#[derive(Debug, Clone)]
pub enum PropertyValue {
    Empty,
    Text(String),
    /// Single `DAV:href` child.
    Href(String),
    Integer(i64),
    /// Empty child elements naming the resource types.
    ResourceType(Vec<QName>),
    /// `supported-report`/`report` wrappers around each report name.
    SupportedReports(Vec<QName>),
    /// Large text payload such as a vCard.
    ContentData(String),
}

impl PropertyValue {
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) | Self::ContentData(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_href(&self) -> Option<&str> {
        match self {
            Self::Href(s) => Some(s),
            _ => None,
        }
    }
}
