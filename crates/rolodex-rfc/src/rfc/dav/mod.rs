//! `WebDAV` and `CardDAV` XML: the element model, request parsing and
//! multistatus serialization.

pub mod build;
pub mod core;
pub mod parse;
