//! `/.well-known/carddav` bootstrap (RFC 6764).

use salvo::http::StatusCode;
use salvo::{Request, Response, handler};

use super::CARDDAV_ROUTE_PREFIX;
use super::carddav::response::set_header;

/// Permanently redirects service discovery to the `CardDAV` root.
#[handler]
#[tracing::instrument(skip_all, fields(path = %req.uri().path()))]
pub async fn well_known(req: &mut Request, res: &mut Response) {
    let location = format!("{CARDDAV_ROUTE_PREFIX}/");
    tracing::debug!(%location, "Redirecting well-known request");
    res.status_code(StatusCode::MOVED_PERMANENTLY);
    set_header(res, "Location", &location);
}
