//! Multistatus XML serialization.

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::rfc::dav::core::{
    CARDDAV_NS, CS_NS, DAV_NS, DavProperty, Multistatus, PropertyValue, PropstatResponse, QName,
};

/// Serializes a multistatus response to an indented XML document with an
/// XML declaration.
///
/// ## Errors
/// Returns an error if XML writing fails.
pub fn serialize_multistatus(multistatus: &Multistatus) -> Result<String, quick_xml::Error> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

    let mut elem = BytesStart::new("D:multistatus");
    elem.push_attribute(("xmlns:D", DAV_NS));
    elem.push_attribute(("xmlns:CR", CARDDAV_NS));
    elem.push_attribute(("xmlns:CS", CS_NS));
    writer.write_event(Event::Start(elem))?;

    for response in &multistatus.responses {
        write_response(&mut writer, response)?;
    }

    if let Some(ref token) = multistatus.sync_token {
        write_text_element(&mut writer, "D:sync-token", token)?;
    }

    writer.write_event(Event::End(BytesEnd::new("D:multistatus")))?;

    into_string(writer)
}

pub(super) fn into_string(writer: Writer<Vec<u8>>) -> Result<String, quick_xml::Error> {
    String::from_utf8(writer.into_inner()).map_err(|e| {
        tracing::error!(error = %e, "Generated invalid UTF-8 in XML output");
        quick_xml::Error::Io(std::sync::Arc::new(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "Invalid UTF-8 in XML output",
        )))
    })
}

fn write_response<W: std::io::Write>(
    writer: &mut Writer<W>,
    response: &PropstatResponse,
) -> Result<(), quick_xml::Error> {
    writer.write_event(Event::Start(BytesStart::new("D:response")))?;
    write_text_element(writer, "D:href", response.href.as_str())?;

    for propstat in &response.propstats {
        writer.write_event(Event::Start(BytesStart::new("D:propstat")))?;
        writer.write_event(Event::Start(BytesStart::new("D:prop")))?;
        for prop in &propstat.properties {
            write_property(writer, prop)?;
        }
        writer.write_event(Event::End(BytesEnd::new("D:prop")))?;
        write_text_element(writer, "D:status", &propstat.status.status_line())?;
        writer.write_event(Event::End(BytesEnd::new("D:propstat")))?;
    }

    if let Some(status) = response.status {
        write_text_element(writer, "D:status", &status.status_line())?;
    }

    writer.write_event(Event::End(BytesEnd::new("D:response")))?;
    Ok(())
}

fn write_property<W: std::io::Write>(
    writer: &mut Writer<W>,
    prop: &DavProperty,
) -> Result<(), quick_xml::Error> {
    let elem_name = prop.name.prefixed();

    match &prop.value {
        Some(PropertyValue::Text(text) | PropertyValue::ContentData(text)) => {
            write_text_element(writer, &elem_name, text)?;
        }
        Some(PropertyValue::Href(href)) => {
            writer.write_event(Event::Start(BytesStart::new(elem_name.as_str())))?;
            write_text_element(writer, "D:href", href)?;
            writer.write_event(Event::End(BytesEnd::new(elem_name.as_str())))?;
        }
        Some(PropertyValue::Integer(n)) => {
            write_text_element(writer, &elem_name, &n.to_string())?;
        }
        Some(PropertyValue::ResourceType(types)) => {
            write_empty_children(writer, &elem_name, types)?;
        }
        Some(PropertyValue::SupportedReports(reports)) => {
            writer.write_event(Event::Start(BytesStart::new(elem_name.as_str())))?;
            for report in reports {
                writer.write_event(Event::Start(BytesStart::new("D:supported-report")))?;
                write_empty_children(writer, "D:report", std::slice::from_ref(report))?;
                writer.write_event(Event::End(BytesEnd::new("D:supported-report")))?;
            }
            writer.write_event(Event::End(BytesEnd::new(elem_name.as_str())))?;
        }
        Some(PropertyValue::Empty) | None => {
            writer.write_event(Event::Empty(BytesStart::new(elem_name.as_str())))?;
        }
    }

    Ok(())
}

/// Writes `<name>` wrapping one empty element per child name.
fn write_empty_children<W: std::io::Write>(
    writer: &mut Writer<W>,
    name: &str,
    children: &[QName],
) -> Result<(), quick_xml::Error> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    for child in children {
        writer.write_event(Event::Empty(BytesStart::new(child.prefixed())))?;
    }
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

pub(super) fn write_text_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    name: &str,
    text: &str,
) -> Result<(), quick_xml::Error> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}
