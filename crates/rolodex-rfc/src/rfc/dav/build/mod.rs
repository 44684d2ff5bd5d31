//! `WebDAV` XML serialization.

mod error;
mod multistatus;

pub use error::serialize_precondition;
pub use multistatus::serialize_multistatus;
