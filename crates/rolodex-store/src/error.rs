use thiserror::Error;

/// Store layer errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Contact not found: {0}")]
    NotFound(String),

    #[error("Contact already exists: {0}")]
    Conflict(String),

    #[error("Store lock poisoned")]
    LockPoisoned,

    #[error(transparent)]
    CoreError(#[from] rolodex_core::error::CoreError),
}

impl<T> From<std::sync::PoisonError<T>> for StoreError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        Self::LockPoisoned
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
