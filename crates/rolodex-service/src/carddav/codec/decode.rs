//! vCard → contact.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;
use uuid::Uuid;

use rolodex_rfc::rfc::vcard::core::names;
use rolodex_rfc::rfc::vcard::{ParseError, VCard, VCardProperty, parse_single};
use rolodex_store::model::{
    Address, Avatar, Contact, Email, LabelKind, Organization, OtherDate, OtherRelationship, Phone,
    Relationship, RelationshipType, Url,
};

use super::GROUP_PREFIX;
use super::dates::parse_date;
use super::labels::{LabelBook, unwrap_apple_label};
use super::photo::{PhotoError, parse_photo};

/// Label name folded into the contact's anniversary when found on an
/// `X-ABDATE` group.
const ANNIVERSARY_LABEL: &str = "anniversary";
/// Fallback label of `X-SOCIALPROFILE` URLs.
const SOCIAL_PROFILE_LABEL: &str = "profile";

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("invalid photo: {0}")]
    Photo(#[from] PhotoError),

    #[error("photo payload is not valid base64: {0}")]
    PhotoPayload(#[from] base64::DecodeError),
}

/// What the decoder may consult besides the document itself.
#[derive(Debug, Clone, Copy)]
pub struct DecodeContext<'a> {
    /// Contacts relationships may point at.
    pub known_contacts: &'a [Contact],
    pub relationship_types: &'a [RelationshipType],
    pub labels: &'a LabelBook,
}

/// Parses and decodes a vCard document.
///
/// ## Errors
/// Fails when the document does not parse or its photo is unusable.
pub fn decode_str(input: &str, ctx: &DecodeContext<'_>) -> Result<Contact, DecodeError> {
    let card = parse_single(input)?;
    decode(&card, ctx)
}

/// Decodes a vCard into a contact.
///
/// Everything except the photo is best-effort: values that cannot be
/// interpreted are skipped.
///
/// ## Errors
/// Fails when a `PHOTO` property is present but cannot be decoded.
#[tracing::instrument(skip_all, fields(properties = card.properties.len()))]
pub fn decode(card: &VCard, ctx: &DecodeContext<'_>) -> Result<Contact, DecodeError> {
    let uid = card
        .text_of(names::UID)
        .map(|u| u.trim().to_string())
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let mut contact = Contact::new(uid);

    let groups = Groups::collect(card);

    decode_names(card, &mut contact);
    decode_dates(card, &mut contact);
    decode_labeled(card, &groups, ctx.labels, &mut contact);
    decode_organization(card, &mut contact);
    decode_grouped_triples(&groups, ctx, &mut contact);

    if let Some(photo) = card.get_property(names::PHOTO) {
        contact.avatar = Some(decode_photo(photo)?);
    }

    Ok(contact)
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn decode_names(card: &VCard, contact: &mut Contact) {
    if let Some(n) = card.get_property(names::N) {
        let mut parts = n.components().into_iter().map(non_empty);
        contact.family_name = parts.next().flatten();
        contact.given_name = parts.next().flatten();
        contact.middle_name = parts.next().flatten();
        contact.prefix = parts.next().flatten();
        contact.suffix = parts.next().flatten();
    }

    contact.full_name = card.text_of(names::FN).and_then(non_empty).or_else(|| {
        let synthesized = contact.display_name();
        tracing::trace!(%synthesized, "FN missing, synthesizing");
        non_empty(synthesized)
    });

    contact.nickname = card.text_of(names::NICKNAME).and_then(non_empty);
    contact.maiden_name = card.text_of(names::X_MAIDENNAME).and_then(non_empty);
    contact.phonetic_given_name = card.text_of(names::X_PHONETIC_FIRST_NAME).and_then(non_empty);
    contact.phonetic_middle_name = card.text_of(names::X_PHONETIC_MIDDLE_NAME).and_then(non_empty);
    contact.phonetic_family_name = card.text_of(names::X_PHONETIC_LAST_NAME).and_then(non_empty);
    contact.gender = card.text_of(names::GENDER).and_then(non_empty);
}

fn decode_dates(card: &VCard, contact: &mut Contact) {
    contact.birthday = card.get_properties(names::BDAY).find_map(parse_date);
    contact.anniversary = card.get_properties(names::ANNIVERSARY).find_map(parse_date);
}

/// `item*` groups in document order, with their `X-ABLABEL` text.
struct Groups<'a> {
    buckets: Vec<(String, Vec<&'a VCardProperty>)>,
}

impl<'a> Groups<'a> {
    fn collect(card: &'a VCard) -> Self {
        let mut buckets: Vec<(String, Vec<&'a VCardProperty>)> = Vec::new();
        for prop in &card.properties {
            let Some(group) = prop.group.as_deref() else {
                continue;
            };
            let key = group.to_ascii_lowercase();
            match buckets.iter_mut().find(|(k, _)| *k == key) {
                Some((_, props)) => props.push(prop),
                None => buckets.push((key, vec![prop])),
            }
        }
        Self { buckets }
    }

    fn members(&self, group: &str) -> &[&'a VCardProperty] {
        let key = group.to_ascii_lowercase();
        self.buckets
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, props)| props.as_slice())
            .unwrap_or_default()
    }

    fn label(&self, group: &str) -> Option<String> {
        label_of(self.members(group))
    }

    fn label_for(&self, prop: &VCardProperty) -> Option<String> {
        prop.group.as_deref().and_then(|g| self.label(g))
    }
}

fn label_of(members: &[&VCardProperty]) -> Option<String> {
    members
        .iter()
        .find(|p| p.name == names::X_ABLABEL)
        .map(|p| unwrap_apple_label(&p.text()))
        .filter(|l| !l.is_empty())
}

/// Resolves an entry's label: group label, then a known `TYPE`, then the
/// per-kind fallback. A group label missing from the book is kept as the
/// entry's custom label.
fn resolve_label(
    kind: LabelKind,
    prop: &VCardProperty,
    groups: &Groups<'_>,
    labels: &LabelBook,
    fallback: &str,
) -> (Uuid, Option<String>) {
    match groups.label_for(prop) {
        Some(name) => match labels.find(kind, &name) {
            Some(label) => (label.id, None),
            None => (labels.id_or(kind, fallback), Some(name)),
        },
        None => (
            labels
                .from_types(kind, prop.type_values())
                .unwrap_or_else(|| labels.id_or(kind, fallback)),
            None,
        ),
    }
}

fn decode_labeled(card: &VCard, groups: &Groups<'_>, labels: &LabelBook, contact: &mut Contact) {
    for prop in card.get_properties(names::EMAIL) {
        let Some(value) = non_empty(prop.text()) else {
            continue;
        };
        let (label_id, custom_label) =
            resolve_label(LabelKind::Email, prop, groups, labels, LabelKind::Email.default_label());
        contact.emails.push(Email {
            value,
            label_id,
            custom_label,
            is_primary: prop.is_pref(),
        });
    }

    for prop in card.get_properties(names::TEL) {
        let Some(value) = non_empty(prop.text()) else {
            continue;
        };
        let (label_id, custom_label) =
            resolve_label(LabelKind::Phone, prop, groups, labels, LabelKind::Phone.default_label());
        contact.phones.push(Phone {
            value,
            label_id,
            custom_label,
            is_primary: prop.is_pref(),
        });
    }

    for prop in card.get_properties(names::ADR) {
        let mut parts = prop.components().into_iter();
        let mut next = || parts.next().unwrap_or_default();
        let (label_id, custom_label) = resolve_label(
            LabelKind::Address,
            prop,
            groups,
            labels,
            LabelKind::Address.default_label(),
        );
        let address = Address {
            po_box: next(),
            extended: next(),
            street: next(),
            locality: next(),
            region: next(),
            postal_code: next(),
            country: next(),
            label_id,
            custom_label,
            is_primary: prop.is_pref(),
        };
        contact.addresses.push(address);
    }

    let urls = card
        .get_properties(names::URL)
        .map(|p| (p, LabelKind::Url.default_label()))
        .chain(
            card.get_properties(names::X_SOCIALPROFILE)
                .map(|p| (p, SOCIAL_PROFILE_LABEL)),
        );
    for (prop, fallback) in urls {
        let Some(value) = non_empty(prop.text()) else {
            continue;
        };
        let (label_id, custom_label) = resolve_label(LabelKind::Url, prop, groups, labels, fallback);
        contact.urls.push(Url {
            value,
            label_id,
            custom_label,
            is_primary: prop.is_pref(),
        });
    }
}

fn decode_organization(card: &VCard, contact: &mut Contact) {
    let org = card.get_property(names::ORG).map(VCardProperty::components);
    let title = card.text_of(names::TITLE).and_then(non_empty);
    let phonetic_name = card.text_of(names::X_PHONETIC_ORG).and_then(non_empty);

    if org.is_none() && title.is_none() && phonetic_name.is_none() {
        return;
    }

    let mut parts = org.unwrap_or_default().into_iter();
    contact.organizations.push(Organization {
        name: parts.next().unwrap_or_default().trim().to_string(),
        department: parts.next().and_then(non_empty),
        title,
        phonetic_name,
    });
}

fn decode_grouped_triples(groups: &Groups<'_>, ctx: &DecodeContext<'_>, contact: &mut Contact) {
    for (group, members) in &groups.buckets {
        if !group.starts_with(GROUP_PREFIX) {
            tracing::trace!(%group, "Skipping group outside the item namespace");
            continue;
        }
        let Some(label) = label_of(members) else {
            tracing::trace!(%group, "Discarding group without label");
            continue;
        };

        for prop in members {
            if prop.name == names::X_ABDATE {
                let Some(date) = parse_date(prop) else {
                    continue;
                };
                if label.eq_ignore_ascii_case(ANNIVERSARY_LABEL) {
                    contact.anniversary = Some(date);
                } else {
                    contact.other_dates.push(OtherDate {
                        name: label.clone(),
                        date,
                    });
                }
            } else if prop.name == names::X_ABRELATEDNAMES {
                let Some(name) = non_empty(prop.text()) else {
                    continue;
                };
                push_relationship(contact, name, &label, ctx);
            }
        }
    }
}

/// A related name matching a stored contact, under a label matching a
/// relationship type, links the two; anything else is kept as free text.
fn push_relationship(contact: &mut Contact, name: String, label: &str, ctx: &DecodeContext<'_>) {
    let target = ctx
        .known_contacts
        .iter()
        .filter(|c| !c.is_deleted())
        .find(|c| c.display_name().eq_ignore_ascii_case(&name));
    let kind = ctx
        .relationship_types
        .iter()
        .find(|t| t.name.eq_ignore_ascii_case(label));

    match (target, kind) {
        (Some(target), Some(kind)) => contact.relationships.push(Relationship {
            contact_id: target.id,
            relationship_type_id: kind.id,
            contact_name: target.display_name(),
            relationship_name: kind.name.clone(),
        }),
        _ => contact.other_relationships.push(OtherRelationship {
            name,
            label: label.to_string(),
        }),
    }
}

fn decode_photo(prop: &VCardProperty) -> Result<Avatar, DecodeError> {
    let photo = parse_photo(prop).inspect_err(|e| tracing::warn!(error = %e, "Rejecting photo"))?;
    let compact: String = photo
        .payload
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let data = STANDARD.decode(compact)?;
    Ok(Avatar {
        mime_type: photo.mime_type,
        data,
    })
}
