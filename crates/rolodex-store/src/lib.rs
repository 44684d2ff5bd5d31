//! Contact data model and the data-access contract the CardDAV layer
//! consumes, with an in-memory reference implementation.

pub mod error;
pub mod etag;
pub mod model;
pub mod seed;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use store::{ContactStore, MemoryStore};
