//! PROPFIND request types.

use super::namespace::QName;
use super::property::PropertyName;

/// A parsed PROPFIND body.
#[derive(Debug, Clone)]
pub enum PropfindRequest {
    /// `allprop`, optionally with `include`d extras. Also what an empty body means.
    AllProp { include: Vec<PropertyName> },
    /// `propname`: names only, no values.
    PropName,
    /// `prop`: an explicit property list.
    Prop(Vec<PropertyName>),
}

impl PropfindRequest {
    #[must_use]
    pub fn allprop() -> Self {
        Self::AllProp {
            include: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_allprop(&self) -> bool {
        matches!(self, Self::AllProp { .. })
    }

    /// Properties named explicitly in the body (`prop` list or `include`).
    #[must_use]
    pub fn named_properties(&self) -> &[PropertyName] {
        match self {
            Self::Prop(props) | Self::AllProp { include: props } => props,
            Self::PropName => &[],
        }
    }

    /// Whether `qname` was named explicitly in the body.
    #[must_use]
    pub fn names(&self, qname: &QName) -> bool {
        self.named_properties().iter().any(|p| p.is(qname))
    }
}

impl Default for PropfindRequest {
    fn default() -> Self {
        Self::allprop()
    }
}
