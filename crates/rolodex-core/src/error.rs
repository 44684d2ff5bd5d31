use thiserror::Error;

/// Core error type with minimal dependencies
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invariant violation: {0}")]
    InvariantViolation(&'static str),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
