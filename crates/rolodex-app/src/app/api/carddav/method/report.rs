//! REPORT method handler.

use salvo::{Depot, Request, Response, handler};

use rolodex_rfc::rfc::dav::parse::{parse_report, peek_report_kind};
use rolodex_service::carddav::service::run_report;
use rolodex_service::context::get_context_from_depot;
use rolodex_service::error::ServiceError;

use crate::app::api::carddav::response::write_multistatus;
use crate::error::AppResult;
use crate::store_handler::get_store_from_depot;

/// ## Summary
/// Handles REPORT requests.
///
/// The root element picks the report; only then is the body fully decoded.
///
/// ## Errors
/// Returns 400 for malformed XML and 501 for reports this server does not
/// implement.
#[handler]
#[tracing::instrument(skip_all, fields(
    method = "REPORT",
    path = %req.uri().path()
))]
pub async fn report(req: &mut Request, res: &mut Response, depot: &Depot) {
    tracing::info!("Handling REPORT request");

    if let Err(e) = handle_report(req, res, depot).await {
        e.write_to(res);
    }
}

async fn handle_report(req: &mut Request, res: &mut Response, depot: &Depot) -> AppResult<()> {
    let body = req.payload().await?.to_vec();

    let Some(kind) = peek_report_kind(&body)? else {
        return Err(ServiceError::UnsupportedReport("unrecognized report root".to_string()).into());
    };
    tracing::debug!(?kind, "REPORT kind recognized");

    let request = parse_report(&body)?;
    let ctx = get_context_from_depot(depot)?;
    let store = get_store_from_depot(depot)?;

    let multistatus = run_report(store.as_ref(), ctx, &request)?;
    write_multistatus(res, &multistatus)
}
