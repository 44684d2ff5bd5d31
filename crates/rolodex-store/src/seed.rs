//! Labels and relationship types every address book starts with.

use uuid::Uuid;

use crate::model::{Label, LabelKind, RelationshipType};

const EMAIL_LABELS: &[&str] = &["home", "work", "other"];
const PHONE_LABELS: &[&str] = &["cell", "home", "work", "main", "fax", "pager", "iphone", "other"];
const ADDRESS_LABELS: &[&str] = &["home", "work", "other"];
const URL_LABELS: &[&str] = &["home", "work", "profile", "other"];

const RELATIONSHIP_TYPES: &[&str] = &[
    "spouse",
    "partner",
    "parent",
    "mother",
    "father",
    "child",
    "sibling",
    "brother",
    "sister",
    "friend",
    "assistant",
    "manager",
];

/// Deterministic id so the same label keeps its id across books and runs.
fn seed_id(user: Uuid, scope: &str, name: &str) -> Uuid {
    Uuid::new_v5(&user, format!("{scope}:{name}").as_bytes())
}

#[must_use]
pub fn system_labels(user: Uuid) -> Vec<Label> {
    [
        (LabelKind::Email, EMAIL_LABELS),
        (LabelKind::Phone, PHONE_LABELS),
        (LabelKind::Address, ADDRESS_LABELS),
        (LabelKind::Url, URL_LABELS),
    ]
    .into_iter()
    .flat_map(|(kind, names)| {
        names.iter().map(move |name| Label {
            id: seed_id(user, kind.as_str(), name),
            kind,
            name: (*name).to_string(),
            is_system: true,
        })
    })
    .collect()
}

#[must_use]
pub fn relationship_types(user: Uuid) -> Vec<RelationshipType> {
    RELATIONSHIP_TYPES
        .iter()
        .map(|name| RelationshipType {
            id: seed_id(user, "relationship", name),
            name: (*name).to_string(),
        })
        .collect()
}
