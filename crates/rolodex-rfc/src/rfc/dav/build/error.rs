//! `DAV:error` bodies for failed preconditions (RFC 4918 §16).

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};

use super::multistatus::{into_string, write_text_element};
use crate::rfc::dav::core::{CARDDAV_NS, DAV_NS, PreconditionError};

/// Serializes a precondition failure as a `DAV:error` document.
///
/// ## Errors
/// Returns an error if XML writing fails.
pub fn serialize_precondition(error: &PreconditionError) -> Result<String, quick_xml::Error> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

    let mut elem = BytesStart::new("D:error");
    elem.push_attribute(("xmlns:D", DAV_NS));
    elem.push_attribute(("xmlns:CR", CARDDAV_NS));
    writer.write_event(Event::Start(elem))?;
    writer.write_event(Event::Empty(BytesStart::new(error.element().prefixed())))?;
    write_text_element(&mut writer, "D:responsedescription", &error.message())?;
    writer.write_event(Event::End(BytesEnd::new("D:error")))?;

    into_string(writer)
}
