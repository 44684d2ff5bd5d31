//! XML namespaces and qualified names.

use std::borrow::Cow;

/// `DAV:` namespace URI.
pub const DAV_NS: &str = "DAV:";

/// `CardDAV` namespace URI.
pub const CARDDAV_NS: &str = "urn:ietf:params:xml:ns:carddav";

/// `CalendarServer` namespace URI, home of `getctag`.
pub const CS_NS: &str = "http://calendarserver.org/ns/";

/// An XML namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Namespace(pub Cow<'static, str>);

impl Namespace {
    pub const DAV: Self = Self(Cow::Borrowed(DAV_NS));
    pub const CARDDAV: Self = Self(Cow::Borrowed(CARDDAV_NS));
    pub const CS: Self = Self(Cow::Borrowed(CS_NS));

    #[must_use]
    pub fn new(uri: impl Into<Cow<'static, str>>) -> Self {
        Self(uri.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Prefix used for this namespace in serialized responses.
    #[must_use]
    pub fn prefix(&self) -> &'static str {
        match self.0.as_ref() {
            DAV_NS => "D",
            CARDDAV_NS => "CR",
            CS_NS => "CS",
            _ => "X",
        }
    }
}

impl From<&'static str> for Namespace {
    fn from(s: &'static str) -> Self {
        Self(Cow::Borrowed(s))
    }
}

impl From<String> for Namespace {
    fn from(s: String) -> Self {
        Self(Cow::Owned(s))
    }
}

/// A qualified XML name (namespace + local name).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QName {
    pub namespace: Namespace,
    pub local_name: Cow<'static, str>,
}

impl QName {
    #[must_use]
    pub fn new(namespace: impl Into<Namespace>, local_name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            namespace: namespace.into(),
            local_name: local_name.into(),
        }
    }

    /// Creates a `DAV:` qualified name.
    #[must_use]
    pub fn dav(local_name: impl Into<Cow<'static, str>>) -> Self {
        Self::new(Namespace::DAV, local_name)
    }

    /// Creates a `CardDAV` qualified name.
    #[must_use]
    pub fn carddav(local_name: impl Into<Cow<'static, str>>) -> Self {
        Self::new(Namespace::CARDDAV, local_name)
    }

    /// Creates a `CalendarServer` qualified name.
    #[must_use]
    pub fn cs(local_name: impl Into<Cow<'static, str>>) -> Self {
        Self::new(Namespace::CS, local_name)
    }

    #[must_use]
    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    #[must_use]
    pub fn namespace_uri(&self) -> &str {
        self.namespace.as_str()
    }

    /// Prefixed element name as written in responses, e.g. `D:getetag`.
    #[must_use]
    pub fn prefixed(&self) -> String {
        format!("{}:{}", self.namespace.prefix(), self.local_name)
    }
}

impl std::fmt::Display for QName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}}}{}", self.namespace.as_str(), self.local_name)
    }
}

/// `DAV:` property and element names.
pub mod dav_props {
    use super::QName;

    #[must_use]
    pub fn resourcetype() -> QName {
        QName::dav("resourcetype")
    }
    #[must_use]
    pub fn displayname() -> QName {
        QName::dav("displayname")
    }
    #[must_use]
    pub fn getcontenttype() -> QName {
        QName::dav("getcontenttype")
    }
    #[must_use]
    pub fn getetag() -> QName {
        QName::dav("getetag")
    }
    #[must_use]
    pub fn current_user_principal() -> QName {
        QName::dav("current-user-principal")
    }
    #[must_use]
    pub fn principal_url() -> QName {
        QName::dav("principal-URL")
    }
    #[must_use]
    pub fn supported_report_set() -> QName {
        QName::dav("supported-report-set")
    }
    #[must_use]
    pub fn sync_token() -> QName {
        QName::dav("sync-token")
    }
    #[must_use]
    pub fn collection() -> QName {
        QName::dav("collection")
    }
    #[must_use]
    pub fn principal() -> QName {
        QName::dav("principal")
    }
    #[must_use]
    pub fn sync_collection() -> QName {
        QName::dav("sync-collection")
    }
}

/// `CardDAV` property and element names.
pub mod carddav_props {
    use super::QName;

    #[must_use]
    pub fn addressbook_home_set() -> QName {
        QName::carddav("addressbook-home-set")
    }
    #[must_use]
    pub fn addressbook() -> QName {
        QName::carddav("addressbook")
    }
    #[must_use]
    pub fn address_data() -> QName {
        QName::carddav("address-data")
    }
    #[must_use]
    pub fn max_resource_size() -> QName {
        QName::carddav("max-resource-size")
    }
    #[must_use]
    pub fn addressbook_multiget() -> QName {
        QName::carddav("addressbook-multiget")
    }
    #[must_use]
    pub fn addressbook_query() -> QName {
        QName::carddav("addressbook-query")
    }
}

/// `CalendarServer` property names.
pub mod cs_props {
    use super::QName;

    #[must_use]
    pub fn getctag() -> QName {
        QName::cs("getctag")
    }
}
