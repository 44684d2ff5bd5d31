//! `CardDAV` precondition failures reported in a `DAV:error` body.

use super::namespace::QName;

/// Preconditions a `PUT` of a contact can violate (RFC 6352 §6.3.2.1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreconditionError {
    /// Body media type is not a vCard.
    SupportedAddressData,
    /// Body is not a usable vCard; carries the reason.
    ValidAddressData(String),
    /// Body exceeds the advertised maximum size.
    MaxResourceSize(usize),
    /// Body carries a UID other than the one the resource is stored under.
    NoUidConflict(String),
}

impl PreconditionError {
    /// Element named inside `DAV:error`.
    #[must_use]
    pub fn element(&self) -> QName {
        match self {
            Self::SupportedAddressData => QName::carddav("supported-address-data"),
            Self::ValidAddressData(_) => QName::carddav("valid-address-data"),
            Self::MaxResourceSize(_) => QName::carddav("max-resource-size"),
            Self::NoUidConflict(_) => QName::carddav("no-uid-conflict"),
        }
    }

    /// Human readable explanation for logs and the response description.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::SupportedAddressData => "content type must be text/vcard".to_string(),
            Self::ValidAddressData(reason) => format!("invalid vCard: {reason}"),
            Self::MaxResourceSize(max) => format!("vCard larger than {max} bytes"),
            Self::NoUidConflict(uid) => format!("UID {uid} does not match the resource name"),
        }
    }
}
