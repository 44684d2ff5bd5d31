//! Request header and path extraction.

use salvo::Request;

use rolodex_rfc::rfc::dav::core::Depth;
use rolodex_service::carddav::dispatch::object_identifier;
use rolodex_service::error::ServiceError;

use crate::error::AppResult;

/// A request header as text; headers that are not valid UTF-8 are ignored.
#[must_use]
pub fn header<'a>(req: &'a Request, name: &str) -> Option<&'a str> {
    req.headers().get(name).and_then(|v| v.to_str().ok())
}

/// `Depth` header, `0` when absent or unrecognized.
#[must_use]
pub fn depth(req: &Request) -> Depth {
    match header(req, "Depth") {
        Some(value) => Depth::from_header(value).unwrap_or_else(|| {
            tracing::warn!(value, "Unrecognized Depth header, using 0");
            Depth::Zero
        }),
        None => Depth::default(),
    }
}

/// ## Summary
/// Identifier of the contact a `GET`/`HEAD`/`PUT`/`DELETE` targets.
///
/// ## Errors
/// Returns `BadRequest` if the path has no final segment.
pub fn contact_identifier(req: &Request) -> AppResult<String> {
    let path = req.uri().path();
    object_identifier(path)
        .ok_or_else(|| ServiceError::BadRequest(format!("no resource in path {path}")).into())
}
