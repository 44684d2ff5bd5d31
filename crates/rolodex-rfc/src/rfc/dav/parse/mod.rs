//! `WebDAV` XML parsing.
//!
//! Request bodies are read with `quick-xml` events; only the elements the
//! server acts on are retained.

mod error;
mod propfind;
mod report;
mod xml;

pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use propfind::parse_propfind;
pub use report::{parse_report, peek_report_kind};
