//! vCard parsing.
//!
//! Accepts 3.0 and 4.0 input, CRLF or bare LF line endings, folded lines,
//! property groups and RFC 6868 caret-encoded parameter values.

mod error;
mod lexer;
mod parser;
pub(crate) mod values;

pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use lexer::{ContentLine, parse_content_line, unfold};
pub use parser::{parse, parse_single};
pub use values::{split_structured, unescape_text};
