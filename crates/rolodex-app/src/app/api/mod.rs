pub mod carddav;
mod well_known;

use salvo::Router;

use crate::middleware::{auth::AuthMiddleware, read_only::ReadOnlyGuard};

pub use rolodex_core::constants::{
    CARDDAV_ROUTE_COMPONENT, CARDDAV_ROUTE_PREFIX, WELL_KNOWN_CARDDAV,
};

/// ## Summary
/// Constructs the router: the well-known redirect plus the `CardDAV` tree
/// behind authentication and the read-only guard.
///
/// ## Errors
/// Returns an error if any child route handler fails to initialize.
pub fn routes() -> anyhow::Result<Router> {
    Ok(Router::new()
        .push(
            Router::with_path(WELL_KNOWN_CARDDAV.trim_start_matches('/'))
                .goal(well_known::well_known),
        )
        .push(
            Router::with_path(CARDDAV_ROUTE_COMPONENT)
                .hoop(AuthMiddleware)
                .hoop(ReadOnlyGuard)
                .push(carddav::routes()?),
        ))
}
