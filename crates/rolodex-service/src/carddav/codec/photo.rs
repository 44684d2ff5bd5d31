//! `PHOTO` property parsing across client dialects.
//!
//! Two encodings are in the wild:
//! - 4.0 data URIs: `PHOTO;VALUE=URI:data:image/png;base64,iVBOR...`
//! - 3.0 inline binary: `PHOTO;ENCODING=b;TYPE=JPEG:/9j/4AAQ...`

use thiserror::Error;

use rolodex_rfc::rfc::vcard::VCardProperty;

/// Base64 prefix of an ISO-BMFF `ftypheic` box.
const HEIC_SIGNATURE: &str = "AAAAJGZ0eXBoZWlj";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PhotoError {
    #[error("photo uses neither a data URI nor inline binary encoding")]
    UnrecognizedDialect,

    #[error("photo URI has no data: marker")]
    MissingDataMarker,

    #[error("photo data URI has no comma")]
    MissingComma,

    #[error("photo media type could not be determined")]
    UndeterminedType,
}

/// MIME type and still-encoded base64 payload of a photo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    pub mime_type: String,
    pub payload: String,
}

/// Extracts the media type and payload from a `PHOTO` property.
///
/// ## Errors
/// Returns a [`PhotoError`] naming which part of the value could not be
/// interpreted.
#[tracing::instrument(skip(prop), fields(value_len = prop.value.len()))]
pub fn parse_photo(prop: &VCardProperty) -> Result<Photo, PhotoError> {
    let value_uri = prop
        .get_param_value("VALUE")
        .is_some_and(|v| v.eq_ignore_ascii_case("uri"));

    if value_uri || prop.value.trim_start().starts_with("data:") {
        return parse_data_uri(&prop.value);
    }

    let binary = prop
        .get_param("ENCODING")
        .is_some_and(|p| p.has_value("b") || p.has_value("base64"));
    if binary {
        return parse_inline_binary(prop);
    }

    Err(PhotoError::UnrecognizedDialect)
}

fn parse_data_uri(value: &str) -> Result<Photo, PhotoError> {
    let value = value.replace("\\,", ",");
    let marker = value.find("data:").ok_or(PhotoError::MissingDataMarker)?;
    let comma = value.find(',').ok_or(PhotoError::MissingComma)?;
    if comma < marker {
        return Err(PhotoError::MissingDataMarker);
    }

    let header = &value[marker + "data:".len()..comma];
    let mime_type = header.split(';').next().unwrap_or_default().trim();

    Ok(Photo {
        mime_type: mime_type.to_string(),
        payload: value[comma + 1..].trim().to_string(),
    })
}

fn parse_inline_binary(prop: &VCardProperty) -> Result<Photo, PhotoError> {
    let payload = prop
        .value
        .rsplit(':')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string();

    let declared = prop.type_values().next().map(str::to_ascii_lowercase);
    let mime_type = match declared.as_deref() {
        None | Some("heic") => sniff_heic(&payload).ok_or(PhotoError::UndeterminedType)?,
        Some("jpg") => "image/jpeg".to_string(),
        Some(t) if t.contains('/') => t.to_string(),
        Some(t) => format!("image/{t}"),
    };

    Ok(Photo { mime_type, payload })
}

fn sniff_heic(payload: &str) -> Option<String> {
    payload
        .get(..HEIC_SIGNATURE.len())
        .is_some_and(|head| head == HEIC_SIGNATURE)
        .then(|| "image/heic".to_string())
}
