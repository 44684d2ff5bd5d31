//! Namespace bookkeeping shared by the request parsers.

use quick_xml::events::BytesStart;

use super::error::ParseResult;
use crate::rfc::dav::core::{DAV_NS, Namespace, QName};

/// Prefix → URI declarations seen so far. Later declarations shadow
/// earlier ones; unprefixed names with no default namespace fall back to
/// `DAV:`.
#[derive(Debug, Default)]
pub(super) struct Namespaces(Vec<(String, String)>);

impl Namespaces {
    /// Records the `xmlns` attributes of an element.
    pub(super) fn collect(&mut self, e: &BytesStart<'_>) -> ParseResult<()> {
        for attr in e.attributes() {
            let attr = attr?;
            let key = std::str::from_utf8(attr.key.as_ref())?;
            let value = std::str::from_utf8(&attr.value)?;
            if let Some(prefix) = key.strip_prefix("xmlns:") {
                self.0.push((prefix.to_string(), value.to_string()));
            } else if key == "xmlns" {
                self.0.push((String::new(), value.to_string()));
            } else {
                // Other attributes ignored
            }
        }
        Ok(())
    }

    /// Resolves the element's qualified name.
    pub(super) fn resolve(&self, e: &BytesStart<'_>) -> ParseResult<QName> {
        let name = std::str::from_utf8(e.name().as_ref())?.to_owned();
        let (prefix, local_name) = match name.split_once(':') {
            Some((prefix, local)) => (prefix.to_owned(), local.to_owned()),
            None => (String::new(), name),
        };
        let namespace = self
            .0
            .iter()
            .rev()
            .find(|(p, _)| *p == prefix)
            .map_or(DAV_NS, |(_, ns)| ns.as_str());

        Ok(QName::new(Namespace::new(namespace.to_string()), local_name))
    }
}

/// Local name of an element, ignoring its prefix.
pub(super) fn local_name(e: &BytesStart<'_>) -> ParseResult<String> {
    Ok(std::str::from_utf8(e.local_name().as_ref())?.to_owned())
}
