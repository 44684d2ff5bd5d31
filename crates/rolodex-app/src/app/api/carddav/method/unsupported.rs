//! Methods the address book does not implement.

use salvo::http::StatusCode;
use salvo::{Request, Response, handler};

use rolodex_core::constants::ALLOW_READ_WRITE;

use crate::app::api::carddav::response::set_header;

/// `PROPPATCH` and `MKCOL`: the single address book and its properties are
/// fixed.
#[handler]
#[tracing::instrument(skip_all, fields(method = %req.method(), path = %req.uri().path()))]
pub async fn method_not_allowed(req: &mut Request, res: &mut Response) {
    tracing::debug!("Rejecting unsupported method");
    res.status_code(StatusCode::METHOD_NOT_ALLOWED);
    set_header(res, "Allow", ALLOW_READ_WRITE);
}

/// `POST` is advertised for clients that probe for it but carries no
/// operation.
#[handler]
#[tracing::instrument(skip_all, fields(method = "POST", path = %req.uri().path()))]
pub async fn not_implemented(req: &mut Request, res: &mut Response) {
    tracing::debug!("POST has no operation");
    res.status_code(StatusCode::NOT_IMPLEMENTED);
}
