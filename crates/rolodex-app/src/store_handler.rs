use salvo::async_trait;
use std::sync::Arc;

use crate::error::AppResult;
use rolodex_core::error::CoreError;
use rolodex_store::ContactStore;

/// Shares one contact store with every request.
pub struct StoreHandler {
    pub store: Arc<dyn ContactStore>,
}

#[async_trait]
impl salvo::Handler for StoreHandler {
    #[tracing::instrument(skip(self, _req, depot, _res, _ctrl))]
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        depot.inject(Arc::clone(&self.store));
    }
}

/// ## Summary
/// Retrieves the contact store from the depot.
///
/// ## Errors
/// Returns an error if the store is not found in the depot.
pub fn get_store_from_depot(depot: &salvo::Depot) -> AppResult<Arc<dyn ContactStore>> {
    depot
        .obtain::<Arc<dyn ContactStore>>()
        .cloned()
        .map_err(|_err| CoreError::InvariantViolation("Contact store not found in depot").into())
}
