//! vCard documents (RFC 6350, with RFC 2426 input accepted).
//!
//! A [`VCard`] is an ordered list of property occurrences. Each occurrence
//! keeps its optional group, its parameters and its value in escaped wire
//! form, so repeated properties and `itemN.` group linkage survive a parse.
//! Interpreting values (names, dates, photos) is left to callers.
//!
//! ```rust
//! use rolodex_rfc::rfc::vcard::{parse_single, serialize_single};
//!
//! let card = parse_single("BEGIN:VCARD\r\nVERSION:3.0\r\nFN:Jane Doe\r\nitem1.EMAIL:jane@example.com\r\nitem1.X-ABLABEL:Club\r\nEND:VCARD\r\n").unwrap();
//! assert_eq!(card.get_property("FN").map(|p| p.text()).as_deref(), Some("Jane Doe"));
//! assert_eq!(card.group_members("item1").count(), 2);
//! assert!(serialize_single(&card).contains("item1.X-ABLABEL:Club"));
//! ```

pub mod build;
pub mod core;
pub mod parse;

pub use build::{serialize, serialize_single};
pub use core::{VCard, VCardParameter, VCardProperty, VCardVersion};
pub use parse::{ParseError, ParseResult, parse, parse_single};
