//! Shared response writers.

use salvo::Response;
use salvo::http::StatusCode;

use rolodex_core::constants::XML_CONTENT_TYPE;
use rolodex_rfc::error::RfcError;
use rolodex_rfc::rfc::dav::build::serialize_multistatus;
use rolodex_rfc::rfc::dav::core::Multistatus;

use crate::error::AppResult;

/// Sets a header, replacing any previous value.
pub fn set_header(res: &mut Response, name: &'static str, value: &str) {
    if let Err(e) = res.add_header(name, value, true) {
        tracing::error!(error = %e, header = name, "Failed to set response header");
    }
}

pub fn write_body(res: &mut Response, body: impl Into<Vec<u8>>) {
    if let Err(e) = res.write_body(body.into()) {
        tracing::error!(error = %e, "Failed to write response body");
    }
}

/// ## Summary
/// Serializes `multistatus` and writes it as a 207 response.
///
/// ## Errors
/// Returns an error if XML serialization fails.
pub fn write_multistatus(res: &mut Response, multistatus: &Multistatus) -> AppResult<()> {
    let xml = serialize_multistatus(multistatus).map_err(RfcError::from)?;

    tracing::debug!(
        responses = multistatus.responses.len(),
        "Multistatus response built"
    );
    res.status_code(StatusCode::MULTI_STATUS);
    set_header(res, "Content-Type", XML_CONTENT_TYPE);
    write_body(res, xml);
    Ok(())
}

/// Formats a timestamp as an HTTP date.
#[must_use]
pub fn http_date(at: chrono::DateTime<chrono::Utc>) -> String {
    at.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}
