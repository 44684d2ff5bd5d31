//! Label lookup and the Apple `_$!<Label>!$_` convention.

use uuid::Uuid;

use rolodex_store::model::{Label, LabelKind};

/// vCard `TYPE` values that map onto a seeded label of the same name.
#[must_use]
pub const fn known_types(kind: LabelKind) -> &'static [&'static str] {
    match kind {
        LabelKind::Email | LabelKind::Address | LabelKind::Url => &["home", "work"],
        LabelKind::Phone => &["cell", "home", "work", "main", "fax", "pager", "iphone"],
    }
}

fn is_known_type(kind: LabelKind, name: &str) -> bool {
    known_types(kind).iter().any(|t| t.eq_ignore_ascii_case(name))
}

/// Labels of one address book, looked up by id or by kind and name.
#[derive(Debug, Clone, Default)]
pub struct LabelBook {
    labels: Vec<Label>,
}

impl LabelBook {
    #[must_use]
    pub fn new(labels: Vec<Label>) -> Self {
        Self { labels }
    }

    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<&Label> {
        self.labels.iter().find(|l| l.id == id)
    }

    /// Case-insensitive lookup by name within a kind.
    #[must_use]
    pub fn find(&self, kind: LabelKind, name: &str) -> Option<&Label> {
        let name = name.trim();
        self.labels
            .iter()
            .find(|l| l.kind == kind && l.name.eq_ignore_ascii_case(name))
    }

    /// Id of the label named `fallback`, or nil when the book lacks it.
    #[must_use]
    pub fn id_or(&self, kind: LabelKind, fallback: &str) -> Uuid {
        self.find(kind, fallback).map_or(Uuid::nil(), |l| l.id)
    }

    #[must_use]
    pub fn default_id(&self, kind: LabelKind) -> Uuid {
        self.id_or(kind, kind.default_label())
    }

    /// The `TYPE` value a label is written as, if it has one.
    #[must_use]
    pub fn type_param_for(&self, kind: LabelKind, id: Uuid) -> Option<&str> {
        self.get(id)
            .filter(|l| l.is_system && l.kind == kind && is_known_type(kind, &l.name))
            .map(|l| l.name.as_str())
    }

    /// First `TYPE` value that names a known type for `kind` and exists in
    /// the book.
    #[must_use]
    pub fn from_types<'a>(
        &self,
        kind: LabelKind,
        types: impl Iterator<Item = &'a str>,
    ) -> Option<Uuid> {
        types
            .filter(|t| !t.eq_ignore_ascii_case("pref"))
            .find(|t| is_known_type(kind, t))
            .and_then(|t| self.find(kind, t))
            .map(|l| l.id)
    }
}

/// Unwraps `_$!<HomePage>!$_` to `Home Page`; other labels are trimmed.
#[must_use]
pub fn unwrap_apple_label(label: &str) -> String {
    let label = label.trim();
    let Some(inner) = label
        .strip_prefix("_$!<")
        .and_then(|s| s.strip_suffix(">!$_"))
    else {
        return label.to_string();
    };

    let mut out = String::with_capacity(inner.len() + 4);
    let mut prev: Option<char> = None;
    for c in inner.chars() {
        if c.is_uppercase() && prev.is_some_and(char::is_lowercase) {
            out.push(' ');
        }
        out.push(c);
        prev = Some(c);
    }
    out
}

/// Wraps a system label name the way Apple clients write built-in labels:
/// `other` → `_$!<Other>!$_`.
#[must_use]
pub fn wrap_apple_label(name: &str) -> String {
    let camel: String = name
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect();
    format!("_$!<{camel}>!$_")
}
