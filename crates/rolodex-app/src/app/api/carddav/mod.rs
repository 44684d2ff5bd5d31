//! `CardDAV` handlers.

use salvo::{Router, http::Method, routing::MethodFilter};

pub mod extract;
pub mod method;
pub mod response;

pub fn routes() -> anyhow::Result<Router> {
    Ok(Router::with_path("{**rest}")
        .options(method::options::options)
        .get(method::get_head::get)
        .head(method::get_head::head)
        .put(method::put::put)
        .delete(method::delete::delete)
        .post(method::unsupported::not_implemented)
        .push(
            Router::new()
                .filter(MethodFilter(Method::from_bytes(b"PROPFIND")?))
                .goal(method::propfind::propfind),
        )
        .push(
            Router::new()
                .filter(MethodFilter(Method::from_bytes(b"REPORT")?))
                .goal(method::report::report),
        )
        .push(
            // Collections and their properties are fixed
            Router::new()
                .filter(MethodFilter(Method::from_bytes(b"PROPPATCH")?))
                .goal(method::unsupported::method_not_allowed),
        )
        .push(
            Router::new()
                .filter(MethodFilter(Method::from_bytes(b"MKCOL")?))
                .goal(method::unsupported::method_not_allowed),
        ))
}
