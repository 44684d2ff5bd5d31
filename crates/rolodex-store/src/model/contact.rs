use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::date::ContactDate;

/// A contact record.
///
/// `uid` is the identity clients see and is immutable once stored; `id` is
/// the store-local key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contact {
    pub id: Uuid,
    pub uid: String,

    pub full_name: Option<String>,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub middle_name: Option<String>,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    pub nickname: Option<String>,
    pub maiden_name: Option<String>,

    pub phonetic_given_name: Option<String>,
    pub phonetic_middle_name: Option<String>,
    pub phonetic_family_name: Option<String>,

    pub gender: Option<String>,

    pub birthday: Option<ContactDate>,
    pub anniversary: Option<ContactDate>,
    pub other_dates: Vec<OtherDate>,

    pub emails: Vec<Email>,
    pub phones: Vec<Phone>,
    pub addresses: Vec<Address>,
    pub urls: Vec<Url>,
    pub organizations: Vec<Organization>,

    pub relationships: Vec<Relationship>,
    pub other_relationships: Vec<OtherRelationship>,

    pub avatar: Option<Avatar>,

    /// Opaque, unquoted entity tag.
    pub etag: String,
    /// Sync-token value at the last mutation.
    pub version: i64,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Contact {
    #[must_use]
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            ..Self::default()
        }
    }

    /// Stored full name, else `given family` trimmed.
    #[must_use]
    pub fn display_name(&self) -> String {
        if let Some(full) = self.full_name.as_deref().filter(|s| !s.trim().is_empty()) {
            return full.trim().to_string();
        }
        let given = self.given_name.as_deref().unwrap_or_default();
        let family = self.family_name.as_deref().unwrap_or_default();
        format!("{given} {family}").trim().to_string()
    }

    #[must_use]
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Shared shape of emails, phones, addresses and URLs.
pub trait LabeledEntry {
    fn label_id(&self) -> Uuid;
    fn custom_label(&self) -> Option<&str>;
    fn is_primary(&self) -> bool;
}

macro_rules! labeled_entry {
    ($($ty:ty),+) => {
        $(impl LabeledEntry for $ty {
            fn label_id(&self) -> Uuid {
                self.label_id
            }

            fn custom_label(&self) -> Option<&str> {
                self.custom_label.as_deref()
            }

            fn is_primary(&self) -> bool {
                self.is_primary
            }
        })+
    };
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub value: String,
    pub label_id: Uuid,
    pub custom_label: Option<String>,
    pub is_primary: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phone {
    pub value: String,
    pub label_id: Uuid,
    pub custom_label: Option<String>,
    pub is_primary: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Url {
    pub value: String,
    pub label_id: Uuid,
    pub custom_label: Option<String>,
    pub is_primary: bool,
}

/// Postal address in `ADR` component order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    pub po_box: String,
    pub extended: String,
    pub street: String,
    pub locality: String,
    pub region: String,
    pub postal_code: String,
    pub country: String,
    pub label_id: Uuid,
    pub custom_label: Option<String>,
    pub is_primary: bool,
}

labeled_entry!(Email, Phone, Url, Address);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Organization {
    pub name: String,
    pub department: Option<String>,
    pub title: Option<String>,
    pub phonetic_name: Option<String>,
}

/// A dated event other than birthday or anniversary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtherDate {
    pub name: String,
    pub date: ContactDate,
}

/// Link to another contact in the same book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub contact_id: Uuid,
    pub relationship_type_id: Uuid,
    /// Display name of the related contact, resolved by the store.
    pub contact_name: String,
    /// Name of the relationship type, resolved by the store.
    pub relationship_name: String,
}

/// Relationship to someone who is not a stored contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtherRelationship {
    pub name: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Avatar {
    pub mime_type: String,
    pub data: Vec<u8>,
}
