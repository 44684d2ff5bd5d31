//! `WebDAV` XML types.
//!
//! Request shapes for `PROPFIND` and `REPORT`, and the multistatus
//! response tree.

mod depth;
mod href;
mod multistatus;
mod namespace;
mod precondition;
mod property;
mod propfind;
mod report;

pub use depth::Depth;
pub use href::Href;
pub use multistatus::{Multistatus, Propstat, PropstatResponse, Status};
pub use namespace::{
    CARDDAV_NS, CS_NS, DAV_NS, Namespace, QName, carddav_props, cs_props, dav_props,
};
pub use precondition::PreconditionError;
pub use property::{DavProperty, PropertyName, PropertyValue};
pub use propfind::PropfindRequest;
pub use report::{
    AddressbookMultiget, AddressbookQuery, ReportKind, ReportRequest, SyncCollection, SyncLevel,
};
