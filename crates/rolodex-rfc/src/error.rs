use thiserror::Error;

/// RFC parsing and serialization errors
#[derive(Error, Debug)]
pub enum RfcError {
    #[error("DAV XML error: {0}")]
    DavParse(#[from] crate::rfc::dav::parse::ParseError),

    #[error("vCard error: {0}")]
    VCardParse(#[from] crate::rfc::vcard::parse::ParseError),

    #[error("XML serialization error: {0}")]
    XmlWrite(#[from] quick_xml::Error),

    #[error(transparent)]
    CoreError(#[from] rolodex_core::error::CoreError),
}

pub type RfcResult<T> = std::result::Result<T, RfcError>;
