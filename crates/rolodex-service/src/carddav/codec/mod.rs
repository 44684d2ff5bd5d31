//! Translation between stored contacts and vCard documents.
//!
//! The encoder and decoder are pure. Everything they need from the store
//! (labels, relationship types, other contacts) is passed in.

mod dates;
mod decode;
mod encode;
mod labels;
mod photo;

pub use dates::{format_date, parse_date};
pub use decode::{DecodeContext, DecodeError, decode, decode_str};
pub use encode::{encode, encode_to_string};
pub use labels::{LabelBook, known_types, unwrap_apple_label, wrap_apple_label};
pub use photo::{Photo, PhotoError, parse_photo};

/// Prefix of the synthetic groups that bind a value to its `X-ABLabel`.
const GROUP_PREFIX: &str = "item";
