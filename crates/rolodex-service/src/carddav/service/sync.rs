use rolodex_rfc::rfc::dav::core::{Multistatus, PropstatResponse, SyncCollection, carddav_props};
use rolodex_store::ContactStore;

use super::{contact_response, labels_if};
use crate::carddav::dispatch::{format_sync_token, parse_sync_token};
use crate::context::RequestContext;
use crate::error::ServiceResult;

/// Reports every contact changed after the client's token: tombstones as a
/// bare 404 response, live contacts with their ETag (and address data when
/// requested), followed by the current token.
///
/// ## Errors
/// Propagates store failures.
#[tracing::instrument(skip(store, ctx, request), fields(token = %request.sync_token))]
pub fn sync_collection(
    store: &dyn ContactStore,
    ctx: &RequestContext,
    request: &SyncCollection,
) -> ServiceResult<Multistatus> {
    let since = parse_sync_token(&request.sync_token);
    let address_data = carddav_props::address_data();
    let wants_data = request.properties.iter().any(|p| p.is(&address_data));
    let labels = labels_if(store, ctx, wants_data)?;

    // The token is read first and bounds the diff, so a write racing this
    // request is reported on the next sync instead of being skipped.
    let token = store.sync_token(ctx.user_id)?;
    let mut changed = store.contacts_changed_since(ctx.user_id, since)?;
    changed.retain(|c| c.version <= token);
    tracing::debug!(since, token, count = changed.len(), "Computed sync diff");

    let mut ms = Multistatus::new();
    for contact in &changed {
        if contact.is_deleted() {
            ms.add_response(PropstatResponse::gone(ctx.contact_href(&contact.uid)));
        } else {
            ms.add_response(contact_response(ctx, contact, wants_data.then_some(&labels)));
        }
    }
    ms.set_sync_token(format_sync_token(token));
    Ok(ms)
}
