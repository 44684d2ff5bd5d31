//! Contact → vCard.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::SecondsFormat;

use rolodex_rfc::rfc::vcard::core::names;
use rolodex_rfc::rfc::vcard::{VCard, VCardParameter, VCardProperty, VCardVersion, serialize_single};
use rolodex_store::model::{Avatar, Contact, LabelKind, LabeledEntry};

use super::GROUP_PREFIX;
use super::dates::format_date;
use super::labels::{LabelBook, wrap_apple_label};

/// Allocates `item1`, `item2`, ... within one encode call.
#[derive(Debug, Default)]
struct GroupCounter(u32);

impl GroupCounter {
    fn next(&mut self) -> String {
        self.0 += 1;
        format!("{GROUP_PREFIX}{}", self.0)
    }
}

struct Encoder<'a> {
    card: VCard,
    groups: GroupCounter,
    labels: &'a LabelBook,
    is_apple: bool,
}

/// Encodes a contact as a vCard 4.0 document.
///
/// `is_apple` selects inline binary photos and adds `TYPE=pref` next to
/// `PREF=1` for primary entries.
#[must_use]
#[tracing::instrument(skip(contact, labels), fields(uid = %contact.uid))]
pub fn encode(contact: &Contact, labels: &LabelBook, is_apple: bool) -> VCard {
    let mut enc = Encoder {
        card: VCard::new(VCardVersion::V4),
        groups: GroupCounter::default(),
        labels,
        is_apple,
    };
    enc.identity(contact);
    enc.dates(contact);
    enc.labeled_fields(contact);
    enc.organization(contact);
    enc.grouped_triples(contact);
    if let Some(avatar) = &contact.avatar {
        enc.photo(avatar);
    }
    enc.card.add_property(VCardProperty::raw(
        names::REV,
        contact.updated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
    ));
    enc.card
}

/// Encodes and serializes a contact.
#[must_use]
pub fn encode_to_string(contact: &Contact, labels: &LabelBook, is_apple: bool) -> String {
    serialize_single(&encode(contact, labels, is_apple))
}

impl Encoder<'_> {
    fn add(&mut self, prop: VCardProperty) {
        self.card.add_property(prop);
    }

    fn text_if_set(&mut self, name: &str, value: Option<&String>) {
        if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
            self.add(VCardProperty::from_text(name, value));
        }
    }

    fn identity(&mut self, contact: &Contact) {
        self.add(VCardProperty::from_text(names::UID, &contact.uid));

        let part = |p: &Option<String>| p.clone().unwrap_or_default();
        let n = [
            part(&contact.family_name),
            part(&contact.given_name),
            part(&contact.middle_name),
            part(&contact.prefix),
            part(&contact.suffix),
        ];
        let n: Vec<&str> = n.iter().map(String::as_str).collect();
        self.add(VCardProperty::structured(names::N, &n));
        self.add(VCardProperty::from_text(names::FN, &contact.display_name()));

        self.text_if_set(names::NICKNAME, contact.nickname.as_ref());
        self.text_if_set(names::X_MAIDENNAME, contact.maiden_name.as_ref());
        self.text_if_set(
            names::X_PHONETIC_FIRST_NAME,
            contact.phonetic_given_name.as_ref(),
        );
        self.text_if_set(
            names::X_PHONETIC_MIDDLE_NAME,
            contact.phonetic_middle_name.as_ref(),
        );
        self.text_if_set(
            names::X_PHONETIC_LAST_NAME,
            contact.phonetic_family_name.as_ref(),
        );
        self.text_if_set(names::GENDER, contact.gender.as_ref());
    }

    fn dates(&mut self, contact: &Contact) {
        if let Some(date) = &contact.birthday {
            self.add(format_date(names::BDAY, date, self.is_apple));
        }
        if let Some(date) = &contact.anniversary {
            self.add(format_date(names::ANNIVERSARY, date, self.is_apple));
        }
    }

    fn labeled_fields(&mut self, contact: &Contact) {
        for email in &contact.emails {
            let prop = VCardProperty::from_text(names::EMAIL, &email.value);
            self.labeled(LabelKind::Email, prop, email);
        }
        for phone in &contact.phones {
            let prop = VCardProperty::from_text(names::TEL, &phone.value);
            self.labeled(LabelKind::Phone, prop, phone);
        }
        for adr in &contact.addresses {
            let prop = VCardProperty::structured(
                names::ADR,
                &[
                    adr.po_box.as_str(),
                    adr.extended.as_str(),
                    adr.street.as_str(),
                    adr.locality.as_str(),
                    adr.region.as_str(),
                    adr.postal_code.as_str(),
                    adr.country.as_str(),
                ],
            );
            self.labeled(LabelKind::Address, prop, adr);
        }
        for url in &contact.urls {
            let prop = VCardProperty::raw(names::URL, url.value.clone());
            self.labeled(LabelKind::Url, prop, url);
        }
    }

    /// Known system labels become `TYPE`; custom and user labels travel as a
    /// grouped `X-ABLABEL`.
    fn labeled(&mut self, kind: LabelKind, mut prop: VCardProperty, entry: &impl LabeledEntry) {
        let labels = self.labels;
        let label = labels.get(entry.label_id());
        let type_param = labels.type_param_for(kind, entry.label_id());

        if let Some(t) = type_param {
            prop = prop.with_param(VCardParameter::type_param(t));
        }
        if entry.is_primary() {
            prop = prop.with_param(VCardParameter::pref(1));
            if self.is_apple {
                prop = prop.with_param(VCardParameter::type_param("pref"));
            }
        }

        let ablabel = match entry.custom_label().filter(|c| !c.trim().is_empty()) {
            Some(custom) => Some(custom.to_string()),
            None => match label {
                Some(l) if !l.is_system => Some(l.name.clone()),
                Some(l) if type_param.is_none() => Some(wrap_apple_label(&l.name)),
                _ => None,
            },
        };

        match ablabel {
            Some(text) => self.grouped(prop, &text),
            None => self.add(prop),
        }
    }

    fn grouped(&mut self, prop: VCardProperty, label: &str) {
        let group = self.groups.next();
        self.add(prop.in_group(group.clone()));
        self.add(VCardProperty::from_text(names::X_ABLABEL, label).in_group(group));
    }

    fn organization(&mut self, contact: &Contact) {
        let Some(org) = contact.organizations.first() else {
            return;
        };
        let department = org.department.as_deref().filter(|d| !d.is_empty());
        let value: Vec<&str> = std::iter::once(org.name.as_str()).chain(department).collect();
        if value.iter().any(|v| !v.is_empty()) {
            self.add(VCardProperty::structured(names::ORG, &value));
        }
        self.text_if_set(names::TITLE, org.title.as_ref());
        self.text_if_set(names::X_PHONETIC_ORG, org.phonetic_name.as_ref());
    }

    fn grouped_triples(&mut self, contact: &Contact) {
        for other in &contact.other_dates {
            let prop = format_date(names::X_ABDATE, &other.date, self.is_apple);
            self.grouped(prop, &other.name);
        }
        for rel in &contact.relationships {
            let prop = VCardProperty::from_text(names::X_ABRELATEDNAMES, &rel.contact_name);
            self.grouped(prop, &rel.relationship_name);
        }
        for rel in &contact.other_relationships {
            let prop = VCardProperty::from_text(names::X_ABRELATEDNAMES, &rel.name);
            self.grouped(prop, &rel.label);
        }
    }

    fn photo(&mut self, avatar: &Avatar) {
        let payload = STANDARD.encode(&avatar.data);
        let prop = if self.is_apple {
            let subtype = avatar
                .mime_type
                .split_once('/')
                .map_or(avatar.mime_type.as_str(), |(_, sub)| sub)
                .to_ascii_uppercase();
            VCardProperty::raw(names::PHOTO, payload)
                .with_param(VCardParameter::new("ENCODING", "b"))
                .with_param(VCardParameter::type_param(subtype))
        } else {
            VCardProperty::raw(
                names::PHOTO,
                format!("data:{};base64,{payload}", avatar.mime_type),
            )
            .with_param(VCardParameter::value_type("URI"))
        };
        self.add(prop);
    }
}
