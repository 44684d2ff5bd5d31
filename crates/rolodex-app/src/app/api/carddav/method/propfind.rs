//! PROPFIND method handler.

use salvo::{Depot, Request, Response, handler};

use rolodex_rfc::rfc::dav::parse::parse_propfind;
use rolodex_service::carddav::dispatch::{PropfindIntent, classify_propfind};
use rolodex_service::carddav::service::{
    collection_listing, home_set_discovery, principal_discovery, single_resource,
};
use rolodex_service::context::get_context_from_depot;

use crate::app::api::carddav::extract;
use crate::app::api::carddav::response::write_multistatus;
use crate::config::get_config_from_depot;
use crate::error::AppResult;
use crate::store_handler::get_store_from_depot;

/// ## Summary
/// Handles PROPFIND requests.
///
/// The body is parsed into a property request (empty body = `allprop`),
/// classified by what it asks for, and answered by the matching generator.
///
/// ## Errors
/// Returns 400 for malformed XML, 500 for store or serialization failures.
#[handler]
#[tracing::instrument(skip_all, fields(
    method = "PROPFIND",
    path = %req.uri().path()
))]
pub async fn propfind(req: &mut Request, res: &mut Response, depot: &Depot) {
    tracing::info!("Handling PROPFIND request");

    if let Err(e) = handle_propfind(req, res, depot).await {
        e.write_to(res);
    }
}

async fn handle_propfind(req: &mut Request, res: &mut Response, depot: &Depot) -> AppResult<()> {
    let depth = extract::depth(req);
    tracing::debug!(depth = ?depth, "Depth header parsed");

    let body = req.payload().await?.to_vec();
    let request = parse_propfind(&body)?;

    let ctx = get_context_from_depot(depot)?;
    let store = get_store_from_depot(depot)?;

    let multistatus = match classify_propfind(&request, req.uri().path()) {
        PropfindIntent::PrincipalDiscovery => principal_discovery(ctx),
        PropfindIntent::HomeSetDiscovery => home_set_discovery(ctx),
        PropfindIntent::CollectionListing => {
            let config = get_config_from_depot(depot)?;
            collection_listing(store.as_ref(), ctx, &config.carddav, depth)?
        }
        PropfindIntent::SingleResource(identifier) => {
            single_resource(store.as_ref(), ctx, &identifier)?
        }
    };

    write_multistatus(res, &multistatus)
}
