//! Request-scoped principal context.
//!
//! Everything that varies per request (who is asking, which URL they reached
//! the server on, whether they may write, which vCard dialect they speak)
//! lives in a [`RequestContext`] stored in the salvo [`Depot`]. Nothing of
//! this is kept on shared state.

use salvo::Depot;
use uuid::Uuid;

use rolodex_core::constants::{CARDDAV_ROUTE_PREFIX, CONTACTS_COMPONENT, VCARD_SUFFIX};

use crate::error::{ServiceError, ServiceResult};

pub mod depot_keys {
    pub const REQUEST_CONTEXT: &str = "__request_context";
}

/// The authenticated principal and per-request flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub user_id: Uuid,
    pub principal: String,
    /// Origin used to build absolute hrefs, without trailing slash.
    pub base_url: String,
    pub read_only: bool,
    /// Client speaks the Apple vCard dialect.
    pub is_apple: bool,
}

impl RequestContext {
    #[must_use]
    pub fn new(user_id: Uuid, principal: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            user_id,
            principal: principal.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            read_only: false,
            is_apple: false,
        }
    }

    #[must_use]
    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Sets the dialect from a `User-Agent` header value.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: Option<&str>) -> Self {
        self.is_apple = user_agent.is_some_and(is_apple_user_agent);
        self
    }

    /// `{base}/carddav/{principal}/`
    #[must_use]
    pub fn principal_href(&self) -> String {
        format!(
            "{}{CARDDAV_ROUTE_PREFIX}/{}/",
            self.base_url,
            urlencoding::encode(&self.principal)
        )
    }

    /// `{base}/carddav/{principal}/contacts/`
    #[must_use]
    pub fn contacts_href(&self) -> String {
        format!("{}{CONTACTS_COMPONENT}/", self.principal_href())
    }

    /// `{base}/carddav/{principal}/contacts/{uid}.vcf`
    #[must_use]
    pub fn contact_href(&self, uid: &str) -> String {
        format!(
            "{}{}{VCARD_SUFFIX}",
            self.contacts_href(),
            urlencoding::encode(uid)
        )
    }
}

/// Apple clients identify as iOS or macOS in their `User-Agent`.
#[must_use]
pub fn is_apple_user_agent(user_agent: &str) -> bool {
    let ua = user_agent.to_ascii_lowercase();
    ua.contains("ios") || ua.contains("macos")
}

/// Get the request context from the depot.
///
/// ## Errors
///
/// Returns `NotAuthenticated` if no principal was resolved for the request.
pub fn get_context_from_depot(depot: &Depot) -> ServiceResult<&RequestContext> {
    depot
        .get::<RequestContext>(depot_keys::REQUEST_CONTEXT)
        .map_err(|_e| ServiceError::NotAuthenticated)
}

pub fn set_context_in_depot(depot: &mut Depot, context: RequestContext) {
    depot.insert(depot_keys::REQUEST_CONTEXT, context);
}
