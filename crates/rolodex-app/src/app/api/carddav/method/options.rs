//! OPTIONS method handler.

use salvo::http::StatusCode;
use salvo::{Depot, Request, Response, handler};

use rolodex_core::constants::{ALLOW_READ_ONLY, ALLOW_READ_WRITE, DAV_COMPLIANCE};
use rolodex_service::context::get_context_from_depot;

use crate::app::api::carddav::response::set_header;
use crate::config::get_config_from_depot;
use crate::middleware::auth::resolve_principal;

/// ## Summary
/// Advertises `CardDAV` support and the methods the caller may use.
///
/// `OPTIONS` skips authentication, so the principal is resolved here on a
/// best-effort basis; when none is known the full method set is listed.
///
/// ## Side Effects
/// Sets the `DAV`, `Allow` and `Public` headers on the response.
#[handler]
#[tracing::instrument(skip_all, fields(path = %req.uri().path()))]
pub async fn options(req: &mut Request, res: &mut Response, depot: &Depot) {
    tracing::info!("Handling OPTIONS request");

    let read_only = match get_context_from_depot(depot) {
        Ok(ctx) => ctx.read_only,
        Err(_) => get_config_from_depot(depot)
            .ok()
            .and_then(|config| resolve_principal(&config.auth, req.headers()).ok())
            .is_some_and(|principal| principal.read_only),
    };
    let allow = allowed_methods(read_only);

    set_header(res, "DAV", DAV_COMPLIANCE);
    set_header(res, "Allow", allow);
    set_header(res, "Public", allow);
    res.status_code(StatusCode::OK);

    tracing::debug!(read_only, "OPTIONS response sent");
}

#[must_use]
pub fn allowed_methods(read_only: bool) -> &'static str {
    if read_only {
        ALLOW_READ_ONLY
    } else {
        ALLOW_READ_WRITE
    }
}
