//! CardDAV semantics: codec, request classification and response generation.

pub mod codec;
pub mod dispatch;
pub mod service;
