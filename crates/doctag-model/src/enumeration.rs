//! Enumerations (typed constant groups) and type aliases

use crate::annotation::{self, Annotation};
use serde::{Deserialize, Serialize};

/// A run of constants sharing one declared type.
///
/// Enumerations have no documentation of their own: the linker copies it
/// from the same-named [`TypeAlias`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enumeration {
    pub package_name: String,
    pub filename: String,

    #[serde(default)]
    pub doc_lines: Vec<String>,

    /// Name of the shared constant type
    pub name: String,

    #[serde(default)]
    pub literals: Vec<EnumLiteral>,

    #[serde(default)]
    pub comment_lines: Vec<String>,

    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl Enumeration {
    /// Look up the annotation of the given kind
    pub fn annotation(&self, kind: &str) -> Option<&Annotation> {
        annotation::find(&self.annotations, kind)
    }
}

/// One constant of an [`Enumeration`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumLiteral {
    pub name: String,

    /// Only set when the constant is a string literal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// A `type Name = Underlying;` item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeAlias {
    pub package_name: String,
    pub filename: String,

    #[serde(default)]
    pub doc_lines: Vec<String>,

    pub name: String,

    /// Rendered underlying type
    pub type_name: String,

    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl TypeAlias {
    /// Look up the annotation of the given kind
    pub fn annotation(&self, kind: &str) -> Option<&Annotation> {
        annotation::find(&self.annotations, kind)
    }
}
