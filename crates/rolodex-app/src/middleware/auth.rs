use salvo::Depot;
use salvo::http::{HeaderMap, StatusCode};
use tracing::error;
use uuid::Uuid;

use crate::config::{AuthConfig, AuthMethod, get_config_from_depot};
use rolodex_service::context::{RequestContext, set_context_in_depot};
use rolodex_service::error::{ServiceError, ServiceResult};

/// A principal resolved from settings or proxy headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub name: String,
    pub read_only: bool,
}

impl Principal {
    /// Stable store key for the principal name.
    #[must_use]
    pub fn user_id(&self) -> Uuid {
        Uuid::new_v5(&Uuid::NAMESPACE_URL, self.name.as_bytes())
    }
}

/// ## Summary
/// Resolves the requesting principal.
///
/// Single-user mode always yields the configured user. Proxy mode trusts the
/// configured user header; the read-only header is honored when it is
/// `true` or `1`.
///
/// ## Errors
/// - `NotAuthenticated` if the proxy did not supply a user
/// - `CoreError` if single-user settings are missing
pub fn resolve_principal(auth: &AuthConfig, headers: &HeaderMap) -> ServiceResult<Principal> {
    match auth.method {
        AuthMethod::SingleUser => {
            let user = auth.single_user()?;
            Ok(Principal {
                name: user.name.clone(),
                read_only: user.read_only,
            })
        }
        AuthMethod::Proxy => {
            let proxy = auth.proxy();
            let name = headers
                .get(proxy.user_header.as_str())
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .ok_or(ServiceError::NotAuthenticated)?;
            let read_only = headers
                .get(proxy.read_only_header.as_str())
                .and_then(|v| v.to_str().ok())
                .is_some_and(|v| {
                    let v = v.trim();
                    v == "1" || v.eq_ignore_ascii_case("true")
                });
            Ok(Principal {
                name: name.to_string(),
                read_only,
            })
        }
    }
}

/// ## Summary
/// Authentication middleware that resolves the principal and stores a
/// [`RequestContext`] in the depot. `OPTIONS` passes through unauthenticated.
///
/// ## Errors
/// Returns an HTTP 401 Unauthorized response if no principal can be resolved.
#[salvo::async_trait]
impl salvo::Handler for AuthMiddleware {
    #[tracing::instrument(skip(self, req, depot, res, ctrl), fields(
        method = %req.method(),
        path = %req.uri().path()
    ))]
    async fn handle(
        &self,
        req: &mut salvo::Request,
        depot: &mut Depot,
        res: &mut salvo::Response,
        ctrl: &mut salvo::FlowCtrl,
    ) {
        tracing::trace!("Authenticating request");

        if req.method() == salvo::http::Method::OPTIONS {
            return;
        }

        let config = match get_config_from_depot(depot) {
            Ok(cfg) => cfg,
            Err(e) => {
                error!(error = ?e, "Failed to get config from depot");
                res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
                ctrl.skip_rest();
                return;
            }
        };

        match resolve_principal(&config.auth, req.headers()) {
            Ok(principal) => {
                let user_agent = req
                    .headers()
                    .get("User-Agent")
                    .and_then(|v| v.to_str().ok());
                let context =
                    RequestContext::new(principal.user_id(), &principal.name, config.server.origin())
                        .with_read_only(principal.read_only)
                        .with_user_agent(user_agent);
                tracing::debug!(
                    principal = %context.principal,
                    read_only = context.read_only,
                    is_apple = context.is_apple,
                    "Principal resolved"
                );
                set_context_in_depot(depot, context);
            }
            Err(ServiceError::NotAuthenticated) => {
                tracing::warn!("Request carried no principal");
                res.status_code(StatusCode::UNAUTHORIZED);
                ctrl.skip_rest();
            }
            Err(service_err) => {
                error!(error = ?service_err, "Principal resolution failed");
                res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
                ctrl.skip_rest();
            }
        }
    }
}

/// ## Summary
/// Middleware handler for authentication.
/// Use this as a hoop on routes that need a principal.
pub struct AuthMiddleware;
