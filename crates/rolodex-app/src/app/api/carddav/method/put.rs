//! PUT method handler for contact resources.

use salvo::http::StatusCode;
use salvo::{Depot, Request, Response, handler};

use rolodex_rfc::rfc::dav::core::PreconditionError;
use rolodex_service::carddav::service::{PutObjectContext, put_object};
use rolodex_service::context::get_context_from_depot;
use rolodex_service::error::ServiceError;

use crate::app::api::carddav::extract::{self, header};
use crate::app::api::carddav::response::set_header;
use crate::config::get_config_from_depot;
use crate::error::AppResult;
use crate::store_handler::get_store_from_depot;

/// ## Summary
/// Stores a vCard under the addressed identifier.
///
/// ## Side Effects
/// - Creates or replaces the contact, bumping its ETag and the sync token
/// - Returns 201 Created or 204 No Content with the new `ETag`
///
/// ## Errors
/// Returns 403 with a precondition body for unsupported, oversized or
/// invalid vCards, 412 when `If-Match`/`If-None-Match` do not hold, and 404
/// for `If-Match` against a missing contact.
#[handler]
#[tracing::instrument(skip_all, fields(method = "PUT", path = %req.uri().path()))]
pub async fn put(req: &mut Request, res: &mut Response, depot: &Depot) {
    tracing::info!("Handling PUT request for vCard object");

    if let Err(e) = handle_put(req, res, depot).await {
        e.write_to(res);
    }
}

async fn handle_put(req: &mut Request, res: &mut Response, depot: &Depot) -> AppResult<()> {
    let identifier = extract::contact_identifier(req)?;
    let config = get_config_from_depot(depot)?;
    let max_resource_size = config.carddav.max_resource_size;

    if let Some(length) = header(req, "Content-Length").and_then(|v| v.parse::<usize>().ok())
        && length > max_resource_size
    {
        tracing::warn!(length, max = max_resource_size, "Declared body too large");
        return Err(ServiceError::from(PreconditionError::MaxResourceSize(max_resource_size)).into());
    }

    let content_type = header(req, "Content-Type").map(str::to_string);
    let if_match = header(req, "If-Match").map(str::to_string);
    let if_none_match = header(req, "If-None-Match").map(str::to_string);

    // Undeclared lengths are read with headroom; put_object enforces the limit
    let body = req
        .payload_with_max_size(max_resource_size.saturating_mul(2))
        .await?
        .to_vec();
    tracing::debug!(bytes = body.len(), "Request body read successfully");

    let ctx = get_context_from_depot(depot)?;
    let store = get_store_from_depot(depot)?;

    let put_ctx = PutObjectContext {
        identifier: &identifier,
        content_type: content_type.as_deref(),
        if_match: if_match.as_deref(),
        if_none_match: if_none_match.as_deref(),
        max_resource_size,
    };
    let result = put_object(store.as_ref(), ctx, &put_ctx, &body)?;

    set_header(res, "ETag", &format!("\"{}\"", result.etag));
    res.status_code(if result.created {
        StatusCode::CREATED
    } else {
        StatusCode::NO_CONTENT
    });
    Ok(())
}
