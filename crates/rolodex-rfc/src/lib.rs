//! Wire formats spoken by the CardDAV server: `WebDAV` XML request and
//! response bodies, and vCard documents.

pub mod error;
pub mod rfc;
