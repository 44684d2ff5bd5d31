//! vCard property occurrences.

use super::parameter::VCardParameter;
use crate::rfc::vcard::build::escape::{escape_component, escape_text};
use crate::rfc::vcard::parse::values::{split_structured, unescape_text};

/// Property names used by the contact codec, including the Apple extensions.
pub mod names {
    pub const VERSION: &str = "VERSION";
    pub const UID: &str = "UID";
    pub const N: &str = "N";
    pub const FN: &str = "FN";
    pub const NICKNAME: &str = "NICKNAME";
    pub const GENDER: &str = "GENDER";
    pub const BDAY: &str = "BDAY";
    pub const ANNIVERSARY: &str = "ANNIVERSARY";
    pub const EMAIL: &str = "EMAIL";
    pub const TEL: &str = "TEL";
    pub const ADR: &str = "ADR";
    pub const URL: &str = "URL";
    pub const ORG: &str = "ORG";
    pub const TITLE: &str = "TITLE";
    pub const PHOTO: &str = "PHOTO";
    pub const REV: &str = "REV";

    pub const X_MAIDENNAME: &str = "X-MAIDENNAME";
    pub const X_PHONETIC_FIRST_NAME: &str = "X-PHONETIC-FIRST-NAME";
    pub const X_PHONETIC_MIDDLE_NAME: &str = "X-PHONETIC-MIDDLE-NAME";
    pub const X_PHONETIC_LAST_NAME: &str = "X-PHONETIC-LAST-NAME";
    pub const X_PHONETIC_ORG: &str = "X-PHONETIC-ORG";
    pub const X_ABLABEL: &str = "X-ABLABEL";
    pub const X_ABDATE: &str = "X-ABDATE";
    pub const X_ABRELATEDNAMES: &str = "X-ABRELATEDNAMES";
    pub const X_SOCIALPROFILE: &str = "X-SOCIALPROFILE";
}

/// One content line of a vCard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VCardProperty {
    /// Group prefix, e.g. `item1` in `item1.X-ABLABEL`.
    pub group: Option<String>,
    /// Property name (uppercase).
    pub name: String,
    pub params: Vec<VCardParameter>,
    /// Value exactly as it appears on the wire (escaped, unfolded).
    pub value: String,
}

impl VCardProperty {
    /// Property whose value is written without escaping (URIs, dates, binary).
    #[must_use]
    pub fn raw(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            group: None,
            name: name.into().to_ascii_uppercase(),
            params: Vec::new(),
            value: value.into(),
        }
    }

    /// Text property; `value` is escaped.
    #[must_use]
    pub fn from_text(name: impl Into<String>, value: &str) -> Self {
        Self::raw(name, escape_text(value))
    }

    /// Structured property (`N`, `ADR`, `ORG`); each component is escaped
    /// and components are joined with `;`.
    #[must_use]
    pub fn structured(name: impl Into<String>, components: &[&str]) -> Self {
        let value = components
            .iter()
            .map(|c| escape_component(c))
            .collect::<Vec<_>>()
            .join(";");
        Self::raw(name, value)
    }

    #[must_use]
    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    #[must_use]
    pub fn with_param(mut self, param: VCardParameter) -> Self {
        self.params.push(param);
        self
    }

    /// Unescaped text value.
    #[must_use]
    pub fn text(&self) -> String {
        unescape_text(&self.value)
    }

    /// Unescaped components of a structured value.
    #[must_use]
    pub fn components(&self) -> Vec<String> {
        split_structured(&self.value)
            .iter()
            .map(|c| unescape_text(c))
            .collect()
    }

    #[must_use]
    pub fn get_param(&self, name: &str) -> Option<&VCardParameter> {
        self.params.iter().find(|p| p.name.eq_ignore_ascii_case(name))
    }

    #[must_use]
    pub fn get_param_value(&self, name: &str) -> Option<&str> {
        self.get_param(name).and_then(VCardParameter::value)
    }

    /// All `TYPE` values across repeated `TYPE` parameters, in order.
    pub fn type_values(&self) -> impl Iterator<Item = &str> {
        self.params
            .iter()
            .filter(|p| p.name == "TYPE")
            .flat_map(|p| p.values.iter())
            .flat_map(|v| v.split(','))
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    #[must_use]
    pub fn has_type(&self, type_value: &str) -> bool {
        self.type_values().any(|t| t.eq_ignore_ascii_case(type_value))
    }

    /// Whether the property is marked preferred, by `TYPE=pref` (3.0) or any
    /// `PREF` parameter (4.0).
    #[must_use]
    pub fn is_pref(&self) -> bool {
        self.has_type("pref") || self.get_param("PREF").is_some()
    }
}
