use uuid::Uuid;

/// Which repeatable contact field a label applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelKind {
    Email,
    Phone,
    Address,
    Url,
}

impl LabelKind {
    /// Label name used when nothing else identifies an entry.
    #[must_use]
    pub const fn default_label(self) -> &'static str {
        match self {
            Self::Email | Self::Address | Self::Url => "home",
            Self::Phone => "cell",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Address => "address",
            Self::Url => "url",
        }
    }
}

/// A named type label for emails, phones, addresses or URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub id: Uuid,
    pub kind: LabelKind,
    pub name: String,
    /// System labels are seeded by the store; user labels are created by
    /// other surfaces and always travel as `X-ABLABEL`.
    pub is_system: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipType {
    pub id: Uuid,
    pub name: String,
}
