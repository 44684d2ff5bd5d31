use rolodex_core::constants::VCARD_SUFFIX;
use rolodex_rfc::rfc::dav::core::{
    AddressbookMultiget, AddressbookQuery, Multistatus, PropertyName, ReportRequest,
    carddav_props,
};
use rolodex_store::ContactStore;

use super::{contact_response, labels_if, sync_collection};
use crate::context::RequestContext;
use crate::error::ServiceResult;

fn wants_address_data(properties: &[PropertyName]) -> bool {
    let address_data = carddav_props::address_data();
    properties.iter().any(|p| p.is(&address_data))
}

/// Runs a decoded `REPORT`.
///
/// ## Errors
/// Propagates store failures.
pub fn run_report(
    store: &dyn ContactStore,
    ctx: &RequestContext,
    request: &ReportRequest,
) -> ServiceResult<Multistatus> {
    tracing::debug!(kind = ?request.kind(), "Running REPORT");
    match request {
        ReportRequest::SyncCollection(r) => sync_collection(store, ctx, r),
        ReportRequest::AddressbookMultiget(r) => addressbook_multiget(store, ctx, r),
        ReportRequest::AddressbookQuery(r) => addressbook_query(store, ctx, r),
    }
}

/// Returns the requested contacts. Hrefs that do not resolve to a live
/// contact are left out of the response.
///
/// ## Errors
/// Propagates store failures.
#[tracing::instrument(skip(store, ctx, request), fields(hrefs = request.hrefs.len()))]
pub fn addressbook_multiget(
    store: &dyn ContactStore,
    ctx: &RequestContext,
    request: &AddressbookMultiget,
) -> ServiceResult<Multistatus> {
    let wants_data = wants_address_data(&request.properties);
    let labels = labels_if(store, ctx, wants_data)?;

    let mut ms = Multistatus::new();
    for href in &request.hrefs {
        let Some(identifier) = href.resource_name(VCARD_SUFFIX) else {
            tracing::debug!(%href, "Skipping href without resource name");
            continue;
        };
        match store.get_contact(ctx.user_id, &identifier, false)? {
            Some(contact) => {
                ms.add_response(contact_response(ctx, &contact, wants_data.then_some(&labels)));
            }
            None => tracing::debug!(%identifier, "Skipping unknown contact"),
        }
    }
    Ok(ms)
}

/// Returns every live contact.
///
/// The filter is parsed but not evaluated: the whole collection is
/// returned regardless of what it says.
///
/// ## Errors
/// Propagates store failures.
#[tracing::instrument(skip(store, ctx, request), fields(has_filter = request.has_filter))]
pub fn addressbook_query(
    store: &dyn ContactStore,
    ctx: &RequestContext,
    request: &AddressbookQuery,
) -> ServiceResult<Multistatus> {
    let wants_data = wants_address_data(&request.properties);
    let labels = labels_if(store, ctx, wants_data)?;

    let mut ms = Multistatus::new();
    for contact in store.list_contacts(ctx.user_id, !wants_data, false)? {
        ms.add_response(contact_response(ctx, &contact, wants_data.then_some(&labels)));
    }
    Ok(ms)
}
