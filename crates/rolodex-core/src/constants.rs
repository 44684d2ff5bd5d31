/// Route component constants shared across crates
pub const CARDDAV_ROUTE_COMPONENT: &str = "carddav";
pub const CARDDAV_ROUTE_PREFIX: &str = const_str::concat!("/", CARDDAV_ROUTE_COMPONENT);

/// Path segment of the single address book under every principal.
pub const CONTACTS_COMPONENT: &str = "contacts";

/// Suffix carried by every contact resource name.
pub const VCARD_SUFFIX: &str = ".vcf";

pub const WELL_KNOWN_CARDDAV: &str = "/.well-known/carddav";

pub const VCARD_CONTENT_TYPE: &str = "text/vcard; charset=utf-8";
pub const XML_CONTENT_TYPE: &str = "application/xml; charset=utf-8";

/// Value of the `DAV` header advertised on `OPTIONS`.
pub const DAV_COMPLIANCE: &str = "1, 2, 3, addressbook";

/// Prefix of the opaque sync token URI; the collection version follows it.
pub const SYNC_TOKEN_PREFIX: &str = "urn:rolodex:sync:";

/// Methods advertised and accepted when the principal may only read.
pub const ALLOW_READ_ONLY: &str = "OPTIONS, GET, HEAD, PROPFIND, REPORT";
/// Methods advertised to a principal with write access.
pub const ALLOW_READ_WRITE: &str = "OPTIONS, GET, HEAD, PROPFIND, REPORT, PUT, DELETE, POST";
