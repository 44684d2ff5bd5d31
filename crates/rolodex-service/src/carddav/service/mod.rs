//! Response generators. Each takes the request context and the store and
//! returns either a multistatus document or an object-level result.

mod collection;
mod discovery;
mod object;
mod report;
mod sync;

pub use collection::{collection_listing, single_resource};
pub use discovery::{home_set_discovery, principal_discovery};
pub use object::{
    ObjectResponse, PutObjectContext, PutObjectResult, delete_object, etag_matches, get_object,
    put_object,
};
pub use report::{addressbook_multiget, addressbook_query, run_report};
pub use sync::sync_collection;

use rolodex_core::constants::VCARD_CONTENT_TYPE;
use rolodex_rfc::rfc::dav::core::{
    DavProperty, PropstatResponse, QName, carddav_props, dav_props,
};
use rolodex_store::ContactStore;
use rolodex_store::model::Contact;

use crate::carddav::codec::{LabelBook, encode_to_string};
use crate::context::RequestContext;
use crate::error::ServiceResult;

/// Reports advertised in `supported-report-set`.
fn supported_reports() -> Vec<QName> {
    vec![
        carddav_props::addressbook_multiget(),
        carddav_props::addressbook_query(),
        dav_props::sync_collection(),
    ]
}

/// Loads the label book only when address data will be encoded.
fn labels_if(store: &dyn ContactStore, ctx: &RequestContext, wanted: bool) -> ServiceResult<LabelBook> {
    if wanted {
        Ok(LabelBook::new(store.labels(ctx.user_id)?))
    } else {
        Ok(LabelBook::default())
    }
}

/// `getetag`, plus `address-data` when `labels` is given.
fn contact_response(
    ctx: &RequestContext,
    contact: &Contact,
    labels: Option<&LabelBook>,
) -> PropstatResponse {
    let mut props = vec![DavProperty::etag(&contact.etag)];
    if let Some(labels) = labels {
        props.push(DavProperty::address_data(encode_to_string(
            contact,
            labels,
            ctx.is_apple,
        )));
    }
    PropstatResponse::ok(ctx.contact_href(&contact.uid), props)
}

/// `getetag` and `getcontenttype` of one contact.
fn contact_listing_entry(ctx: &RequestContext, contact: &Contact) -> PropstatResponse {
    PropstatResponse::ok(
        ctx.contact_href(&contact.uid),
        vec![
            DavProperty::etag(&contact.etag),
            DavProperty::text(dav_props::getcontenttype(), VCARD_CONTENT_TYPE),
        ],
    )
}
