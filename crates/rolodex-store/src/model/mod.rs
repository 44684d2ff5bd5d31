//! Contact records as the store keeps them.

mod contact;
mod date;
mod label;

pub use contact::{
    Address, Avatar, Contact, Email, LabeledEntry, Organization, OtherDate, OtherRelationship,
    Phone, Relationship, Url,
};
pub use date::ContactDate;
pub use label::{Label, LabelKind, RelationshipType};
