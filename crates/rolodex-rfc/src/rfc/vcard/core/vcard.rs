//! The vCard document.

use super::property::VCardProperty;

/// Accepted vCard versions. Serialization always writes 4.0 from the codec;
/// a parsed card remembers what it declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VCardVersion {
    V3,
    #[default]
    V4,
}

impl VCardVersion {
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "3.0" => Some(Self::V3),
            "4.0" => Some(Self::V4),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::V3 => "3.0",
            Self::V4 => "4.0",
        }
    }
}

/// An ordered multi-map of property occurrences.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VCard {
    pub version: VCardVersion,
    pub properties: Vec<VCardProperty>,
}

impl VCard {
    #[must_use]
    pub fn new(version: VCardVersion) -> Self {
        Self {
            version,
            properties: Vec::new(),
        }
    }

    pub fn add_property(&mut self, property: VCardProperty) {
        self.properties.push(property);
    }

    /// First occurrence of `name`.
    #[must_use]
    pub fn get_property(&self, name: &str) -> Option<&VCardProperty> {
        self.properties
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// All occurrences of `name`, grouped or not, in document order.
    pub fn get_properties<'a, 'n>(
        &'a self,
        name: &'n str,
    ) -> impl Iterator<Item = &'a VCardProperty> {
        self.properties
            .iter()
            .filter(move |p| p.name.eq_ignore_ascii_case(name))
    }

    /// Properties sharing `group`, compared case-insensitively.
    pub fn group_members<'a, 'g>(
        &'a self,
        group: &'g str,
    ) -> impl Iterator<Item = &'a VCardProperty> {
        self.properties.iter().filter(move |p| {
            p.group
                .as_deref()
                .is_some_and(|g| g.eq_ignore_ascii_case(group))
        })
    }

    /// Unescaped text of the first non-empty occurrence of `name`.
    #[must_use]
    pub fn text_of(&self, name: &str) -> Option<String> {
        self.get_properties(name)
            .map(VCardProperty::text)
            .find(|s| !s.trim().is_empty())
    }
}
