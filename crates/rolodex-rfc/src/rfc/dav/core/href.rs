//! DAV href type.

use std::fmt;

/// A `WebDAV` href (URL reference).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Href(pub String);

impl Href {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the last path segment (resource name), still percent-encoded.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.0
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|s| !s.is_empty())
    }

    /// Returns the percent-decoded resource name with `suffix` removed, or
    /// `None` when the href does not name such a resource.
    #[must_use]
    pub fn resource_name(&self, suffix: &str) -> Option<String> {
        let name = self.name()?.strip_suffix(suffix)?;
        let decoded = urlencoding::decode(name).ok()?;
        (!decoded.is_empty()).then(|| decoded.into_owned())
    }
}

impl fmt::Display for Href {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Href {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Href {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for Href {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
