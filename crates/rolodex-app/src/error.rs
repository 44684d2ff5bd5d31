use salvo::Response;
use salvo::http::StatusCode;
use thiserror::Error;

use rolodex_rfc::error::RfcError;
use rolodex_rfc::rfc::dav::build::serialize_precondition;
use rolodex_service::error::ServiceError;
use rolodex_store::StoreError;

use crate::app::api::carddav::response::{set_header, write_body};
use rolodex_core::constants::XML_CONTENT_TYPE;

/// Application-level errors (HTTP layer)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    ServiceError(#[from] ServiceError),

    #[error(transparent)]
    StoreError(#[from] StoreError),

    #[error(transparent)]
    RfcError(#[from] RfcError),

    #[error(transparent)]
    CoreError(#[from] rolodex_core::error::CoreError),

    #[error("Failed to read request body: {0}")]
    Payload(#[from] salvo::http::ParseError),
}

impl From<rolodex_rfc::rfc::dav::parse::ParseError> for AppError {
    fn from(error: rolodex_rfc::rfc::dav::parse::ParseError) -> Self {
        Self::RfcError(error.into())
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;

impl AppError {
    /// The HTTP status a failed request answers with.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::ServiceError(e) => service_status(e),
            Self::StoreError(e) => store_status(e),
            Self::RfcError(e) => rfc_status(e),
            Self::Payload(_) => StatusCode::BAD_REQUEST,
            Self::CoreError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Writes the status and, for `CardDAV` preconditions, a `DAV:error`
    /// body onto `res`.
    pub fn write_to(&self, res: &mut Response) {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, %status, "Request failed");
        } else {
            tracing::warn!(error = %self, %status, "Request rejected");
        }
        res.status_code(status);

        if let Self::ServiceError(ServiceError::Precondition(precondition)) = self {
            match serialize_precondition(precondition) {
                Ok(xml) => {
                    set_header(res, "Content-Type", XML_CONTENT_TYPE);
                    write_body(res, xml);
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to serialize precondition body");
                }
            }
        }
    }
}

fn service_status(error: &ServiceError) -> StatusCode {
    match error {
        ServiceError::StoreError(e) => store_status(e),
        ServiceError::RfcError(e) => rfc_status(e),
        ServiceError::NotAuthenticated => StatusCode::UNAUTHORIZED,
        ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        ServiceError::PreconditionFailed(_) => StatusCode::PRECONDITION_FAILED,
        ServiceError::Precondition(_) => StatusCode::FORBIDDEN,
        ServiceError::UnsupportedReport(_) => StatusCode::NOT_IMPLEMENTED,
        ServiceError::BadRequest(_) | ServiceError::DecodeError(_) => StatusCode::BAD_REQUEST,
        ServiceError::CoreError(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn store_status(error: &StoreError) -> StatusCode {
    match error {
        StoreError::NotFound(_) => StatusCode::NOT_FOUND,
        StoreError::Conflict(_) => StatusCode::CONFLICT,
        StoreError::LockPoisoned | StoreError::CoreError(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn rfc_status(error: &RfcError) -> StatusCode {
    match error {
        RfcError::DavParse(_) | RfcError::VCardParse(_) => StatusCode::BAD_REQUEST,
        RfcError::XmlWrite(_) | RfcError::CoreError(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
