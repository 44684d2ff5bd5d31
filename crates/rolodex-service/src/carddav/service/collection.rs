use rolodex_core::config::CardDavConfig;
use rolodex_rfc::rfc::dav::core::{
    DavProperty, Depth, Multistatus, PropstatResponse, carddav_props, cs_props, dav_props,
};
use rolodex_store::ContactStore;

use super::{contact_listing_entry, supported_reports};
use crate::carddav::dispatch::format_sync_token;
use crate::context::RequestContext;
use crate::error::ServiceResult;

/// Describes the contacts collection and, at depth 1, each live contact.
/// Address data is never inlined here.
///
/// ## Errors
/// Propagates store failures.
#[tracing::instrument(skip(store, ctx, config), fields(principal = %ctx.principal))]
pub fn collection_listing(
    store: &dyn ContactStore,
    ctx: &RequestContext,
    config: &CardDavConfig,
    depth: Depth,
) -> ServiceResult<Multistatus> {
    let token = format_sync_token(store.sync_token(ctx.user_id)?);

    let mut ms = Multistatus::new();
    ms.add_response(PropstatResponse::ok(
        ctx.contacts_href(),
        vec![
            DavProperty::resourcetype(vec![dav_props::collection(), carddav_props::addressbook()]),
            DavProperty::text(dav_props::displayname(), config.display_name.clone()),
            DavProperty::text(dav_props::sync_token(), token.clone()),
            DavProperty::text(cs_props::getctag(), token),
            DavProperty::supported_reports(supported_reports()),
            DavProperty::integer(
                carddav_props::max_resource_size(),
                i64::try_from(config.max_resource_size).unwrap_or(i64::MAX),
            ),
        ],
    ));

    if depth.includes_members() {
        let contacts = store.list_contacts(ctx.user_id, true, false)?;
        tracing::debug!(count = contacts.len(), "Listing contacts");
        for contact in &contacts {
            ms.add_response(contact_listing_entry(ctx, contact));
        }
    }

    Ok(ms)
}

/// Describes one contact, or answers 404 for it inside the multistatus.
///
/// ## Errors
/// Propagates store failures.
#[tracing::instrument(skip(store, ctx))]
pub fn single_resource(
    store: &dyn ContactStore,
    ctx: &RequestContext,
    identifier: &str,
) -> ServiceResult<Multistatus> {
    let mut ms = Multistatus::new();
    match store.get_contact(ctx.user_id, identifier, false)? {
        Some(contact) => ms.add_response(contact_listing_entry(ctx, &contact)),
        None => ms.add_response(PropstatResponse::gone(ctx.contact_href(identifier))),
    }
    Ok(ms)
}
