use thiserror::Error;

use rolodex_rfc::rfc::dav::core::PreconditionError;

use crate::carddav::codec::DecodeError;

/// Service layer errors - combines all error types
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    StoreError(#[from] rolodex_store::StoreError),

    #[error(transparent)]
    RfcError(#[from] rolodex_rfc::error::RfcError),

    #[error(transparent)]
    CoreError(#[from] rolodex_core::error::CoreError),

    #[error(transparent)]
    DecodeError(#[from] DecodeError),

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Not found: {0}")]
    NotFound(String),

    /// An `If-Match`/`If-None-Match` condition did not hold.
    #[error("Precondition failed: {0}")]
    PreconditionFailed(String),

    /// A CardDAV precondition element is reported to the client.
    #[error("Precondition violated: {}", .0.message())]
    Precondition(PreconditionError),

    #[error("Unsupported report: {0}")]
    UnsupportedReport(String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl From<PreconditionError> for ServiceError {
    fn from(error: PreconditionError) -> Self {
        Self::Precondition(error)
    }
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
