//! Request classification.
//!
//! `PROPFIND` is routed by which properties the client asked for rather than
//! by URL shape: clients probe principal properties against collection
//! paths and vice versa. The probing order below is significant because
//! several of these properties may appear in one request.

use rolodex_core::constants::{CONTACTS_COMPONENT, SYNC_TOKEN_PREFIX, VCARD_SUFFIX};
use rolodex_rfc::rfc::dav::core::{
    Href, PropfindRequest, carddav_props, cs_props, dav_props,
};

/// What a `PROPFIND` is after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropfindIntent {
    PrincipalDiscovery,
    HomeSetDiscovery,
    CollectionListing,
    /// Carries the resource identifier.
    SingleResource(String),
}

/// Classifies a `PROPFIND` by requested properties, then by path.
#[must_use]
pub fn classify_propfind(request: &PropfindRequest, path: &str) -> PropfindIntent {
    let resource = || resource_identifier(path).map(PropfindIntent::SingleResource);

    let intent = if request.names(&dav_props::current_user_principal())
        || request.names(&dav_props::principal_url())
    {
        PropfindIntent::PrincipalDiscovery
    } else if request.names(&carddav_props::addressbook_home_set()) {
        PropfindIntent::HomeSetDiscovery
    } else if request.names(&dav_props::resourcetype())
        || request.names(&dav_props::sync_token())
        || request.names(&cs_props::getctag())
    {
        resource().unwrap_or(PropfindIntent::CollectionListing)
    } else if is_getetag_only(request) {
        PropfindIntent::CollectionListing
    } else if let Some(intent) = resource() {
        intent
    } else if path.contains(&format!("/{CONTACTS_COMPONENT}")) {
        PropfindIntent::CollectionListing
    } else {
        PropfindIntent::PrincipalDiscovery
    };

    tracing::debug!(?intent, path, "Classified PROPFIND");
    intent
}

fn is_getetag_only(request: &PropfindRequest) -> bool {
    let getetag = dav_props::getetag();
    let props = request.named_properties();
    !props.is_empty() && props.iter().all(|p| p.is(&getetag))
}

/// Identifier of a `.vcf` resource path, percent-decoded.
#[must_use]
pub fn resource_identifier(path: &str) -> Option<String> {
    if path.ends_with('/') {
        return None;
    }
    Href::new(path).resource_name(VCARD_SUFFIX)
}

/// Identifier addressed by `GET`/`HEAD`/`PUT`/`DELETE`: the last path
/// segment with any `.vcf` suffix removed, percent-decoded.
#[must_use]
pub fn object_identifier(path: &str) -> Option<String> {
    resource_identifier(path).or_else(|| {
        let href = Href::new(path);
        if path.ends_with('/') {
            return None;
        }
        let name = href.name()?;
        urlencoding::decode(name)
            .ok()
            .map(std::borrow::Cow::into_owned)
            .filter(|n| !n.is_empty())
    })
}

/// Wire form of a collection version.
#[must_use]
pub fn format_sync_token(version: i64) -> String {
    format!("{SYNC_TOKEN_PREFIX}{version}")
}

/// Collection version named by a client token.
///
/// An empty token asks for an initial sync. The digits after the last `:`
/// or `/` are the version; anything unparseable falls back to a full
/// resync.
#[must_use]
pub fn parse_sync_token(token: &str) -> i64 {
    let token = token.trim();
    if token.is_empty() {
        return 0;
    }
    let tail = token.rsplit([':', '/']).next().unwrap_or(token);
    match tail.parse::<i64>() {
        Ok(version) if version >= 0 => version,
        _ => {
            tracing::warn!(token, "Unparseable sync token, falling back to full sync");
            0
        }
    }
}
