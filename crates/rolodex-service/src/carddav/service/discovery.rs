use rolodex_rfc::rfc::dav::core::{
    DavProperty, Multistatus, PropstatResponse, carddav_props, dav_props,
};

use super::supported_reports;
use crate::context::RequestContext;

/// Describes the principal: where it lives and where its address books are.
#[must_use]
pub fn principal_discovery(ctx: &RequestContext) -> Multistatus {
    let principal = ctx.principal_href();
    let mut ms = Multistatus::new();
    ms.add_response(PropstatResponse::ok(
        principal.clone(),
        vec![
            DavProperty::resourcetype(vec![dav_props::collection(), dav_props::principal()]),
            DavProperty::href(dav_props::current_user_principal(), principal.clone()),
            DavProperty::href(dav_props::principal_url(), principal),
            DavProperty::href(carddav_props::addressbook_home_set(), ctx.contacts_href()),
            DavProperty::text(dav_props::displayname(), ctx.principal.clone()),
        ],
    ));
    ms
}

/// Advertises the contacts collection as the address-book home.
#[must_use]
pub fn home_set_discovery(ctx: &RequestContext) -> Multistatus {
    let mut ms = Multistatus::new();
    ms.add_response(PropstatResponse::ok(
        ctx.principal_href(),
        vec![
            DavProperty::href(carddav_props::addressbook_home_set(), ctx.contacts_href()),
            DavProperty::supported_reports(supported_reports()),
        ],
    ));
    ms
}
