//! Parsed annotation record

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A `@Kind(key = "value", ...)` directive parsed from a documentation line.
///
/// An absent attribute and an attribute set to `""` are different things:
/// [`Annotation::attribute`] returns `None` for the former and `Some("")` for
/// the latter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// Kind identifier, e.g. `Event`
    pub kind: String,

    /// Attribute values keyed by parameter name
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl Annotation {
    /// Create an annotation without attributes
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Add an attribute
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Look up an attribute value
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Whether the attribute is present at all (possibly with an empty value)
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Whether this annotation is of the given kind
    pub fn is_kind(&self, kind: &str) -> bool {
        self.kind == kind
    }
}

/// Find the annotation of `kind` in a declaration's annotation list.
pub(crate) fn find<'a>(annotations: &'a [Annotation], kind: &str) -> Option<&'a Annotation> {
    annotations.iter().find(|a| a.is_kind(kind))
}
