//! GET and HEAD method handlers for contact resources.

use salvo::http::StatusCode;
use salvo::{Depot, Request, Response, handler};

use rolodex_core::constants::VCARD_CONTENT_TYPE;
use rolodex_service::carddav::service::get_object;
use rolodex_service::context::get_context_from_depot;

use crate::app::api::carddav::extract;
use crate::app::api::carddav::response::{http_date, set_header, write_body};
use crate::error::AppResult;
use crate::store_handler::get_store_from_depot;

/// ## Summary
/// Returns the vCard of one contact.
///
/// ## Errors
/// Returns 404 for unknown or deleted contacts.
#[handler]
#[tracing::instrument(skip_all, fields(method = "GET", path = %req.uri().path()))]
pub async fn get(req: &mut Request, res: &mut Response, depot: &Depot) {
    if let Err(e) = handle_get_or_head(req, res, depot, false) {
        e.write_to(res);
    }
}

/// ## Summary
/// Like `GET`, without the body.
#[handler]
#[tracing::instrument(skip_all, fields(method = "HEAD", path = %req.uri().path()))]
pub async fn head(req: &mut Request, res: &mut Response, depot: &Depot) {
    if let Err(e) = handle_get_or_head(req, res, depot, true) {
        e.write_to(res);
    }
}

fn handle_get_or_head(
    req: &Request,
    res: &mut Response,
    depot: &Depot,
    is_head: bool,
) -> AppResult<()> {
    let identifier = extract::contact_identifier(req)?;
    let ctx = get_context_from_depot(depot)?;
    let store = get_store_from_depot(depot)?;

    let object = get_object(store.as_ref(), ctx, &identifier)?;

    set_header(res, "ETag", &format!("\"{}\"", object.etag));
    set_header(res, "Last-Modified", &http_date(object.last_modified));
    set_header(res, "Content-Type", VCARD_CONTENT_TYPE);
    res.status_code(StatusCode::OK);

    if !is_head {
        write_body(res, object.body);
    }
    Ok(())
}
