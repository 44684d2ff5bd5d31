//! CardDAV request handling independent of the HTTP server: the
//! request-scoped context, the vCard codec, request classification and the
//! multistatus generators.

pub mod carddav;
pub mod context;
pub mod error;
