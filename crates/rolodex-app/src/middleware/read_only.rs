use salvo::http::{Method, StatusCode};

use rolodex_core::constants::ALLOW_READ_ONLY;
use rolodex_service::context::get_context_from_depot;

/// Methods that modify the address book.
const WRITE_METHODS: &[&str] = &["PUT", "DELETE", "PROPPATCH", "MKCOL", "POST"];

#[must_use]
pub fn is_write_method(method: &Method) -> bool {
    WRITE_METHODS.contains(&method.as_str())
}

/// ## Summary
/// Rejects writes from read-only principals with 405 and the reduced
/// `Allow` list. Runs after [`super::auth::AuthMiddleware`].
pub struct ReadOnlyGuard;

#[salvo::async_trait]
impl salvo::Handler for ReadOnlyGuard {
    #[tracing::instrument(skip(self, req, depot, res, ctrl), fields(
        method = %req.method(),
        path = %req.uri().path()
    ))]
    async fn handle(
        &self,
        req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        res: &mut salvo::Response,
        ctrl: &mut salvo::FlowCtrl,
    ) {
        let Ok(context) = get_context_from_depot(depot) else {
            return;
        };

        if context.read_only && is_write_method(req.method()) {
            tracing::warn!(principal = %context.principal, "Write rejected for read-only principal");
            res.status_code(StatusCode::METHOD_NOT_ALLOWED);
            #[expect(
                clippy::let_underscore_must_use,
                reason = "Header addition failure is non-fatal"
            )]
            let _ = res.add_header("Allow", ALLOW_READ_ONLY, true);
            ctrl.skip_rest();
        }
    }
}
