//! DELETE method handler for contact resources.

use salvo::http::StatusCode;
use salvo::{Depot, Request, Response, handler};

use rolodex_service::carddav::service::delete_object;
use rolodex_service::context::get_context_from_depot;

use crate::app::api::carddav::extract::{self, header};
use crate::error::AppResult;
use crate::store_handler::get_store_from_depot;

/// ## Summary
/// Soft-deletes a contact. The tombstone is reported by later
/// sync-collection reports.
///
/// ## Errors
/// Returns 404 if the contact is not found, 412 on `If-Match` mismatch.
#[handler]
#[tracing::instrument(skip_all, fields(
    method = "DELETE",
    path = %req.uri().path()
))]
pub async fn delete(req: &mut Request, res: &mut Response, depot: &Depot) {
    tracing::info!("Handling DELETE request");

    if let Err(e) = handle_delete(req, res, depot) {
        e.write_to(res);
    }
}

fn handle_delete(req: &Request, res: &mut Response, depot: &Depot) -> AppResult<()> {
    let identifier = extract::contact_identifier(req)?;
    let ctx = get_context_from_depot(depot)?;
    let store = get_store_from_depot(depot)?;

    delete_object(store.as_ref(), ctx, &identifier, header(req, "If-Match"))?;

    res.status_code(StatusCode::NO_CONTENT);
    Ok(())
}
